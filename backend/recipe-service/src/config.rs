/// Configuration management for Recipe Service
///
/// Loads configuration from environment variables (a `.env` file is read
/// first by the binary when present).
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Recipe store backend
    pub store: StoreBackend,
    /// Database configuration
    pub database: DatabaseConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
    /// Number of HTTP workers
    pub workers: usize,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> impl Iterator<Item = &str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
    }
}

/// Which recipe store the service persists to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::Config(format!(
                "RECIPE_STORE must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
    /// Min connections in pool
    pub min_connections: u32,
    /// Apply embedded schema migrations at startup
    pub run_migrations: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let app = AppConfig {
            env: app_env,
            host: std::env::var("RECIPE_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_or_default("RECIPE_SERVICE_PORT", 8080)?,
            workers: parse_env_or_default("RECIPE_SERVICE_WORKERS", 4)?,
        };

        let cors = {
            let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                Ok(value) => value,
                Err(_) if app.is_production() => {
                    return Err(AppError::Config(
                        "CORS_ALLOWED_ORIGINS must be set in production".to_string(),
                    ))
                }
                Err(_) => "http://localhost:3000".to_string(),
            };

            if app.is_production() && allowed_origins.trim() == "*" {
                return Err(AppError::Config(
                    "CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string(),
                ));
            }

            CorsConfig { allowed_origins }
        };

        let store = parse_env_or_default("RECIPE_STORE", StoreBackend::Postgres)?;

        let database = DatabaseConfig {
            url: match std::env::var("DATABASE_URL") {
                Ok(url) => url,
                Err(_) if app.is_production() && store == StoreBackend::Postgres => {
                    return Err(AppError::Config(
                        "DATABASE_URL must be set in production".to_string(),
                    ))
                }
                Err(_) => "postgres://localhost/pantry".to_string(),
            },
            max_connections: parse_env_or_default("DATABASE_MAX_CONNECTIONS", 10)?,
            min_connections: parse_env_or_default("DATABASE_MIN_CONNECTIONS", 2)?,
            run_migrations: parse_env_or_default("DATABASE_RUN_MIGRATIONS", true)?,
        };

        Ok(Config {
            app,
            cors,
            store,
            database,
        })
    }
}

fn parse_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse()
            .map_err(|e| AppError::Config(format!("Failed to parse {}='{}': {}", key, val, e))),
        Err(_) => Ok(default),
    }
}
