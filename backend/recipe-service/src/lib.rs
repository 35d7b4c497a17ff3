/// Recipe Service Library
///
/// Accepts a pantry list, produces a recipe, persists it and serves
/// history and lookups over HTTP.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Recipe and ingredient aggregate
/// - `services`: Recipe generation and history
/// - `db`: Repository contract and store backends
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

/// Name used in logs, health responses and metric labels
pub const SERVICE_NAME: &str = "recipe-service";
