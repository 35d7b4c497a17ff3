use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use recipe_service::db::{connect_store, RecipeRepository};
use recipe_service::handlers;
use recipe_service::services::{DefaultRecipeService, RecipeService, StubRecipeGenerator};
use recipe_service::{Config, SERVICE_NAME};
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into());

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Recipe Service
///
/// # Routes
///
/// - `POST /recipes/generate` - Generate and store a recipe from a pantry list
/// - `GET /recipes/history` - Every generated recipe
/// - `GET /recipes/analytics` - Ingredient frequency and recipes per day
/// - `GET /recipes/{id}` - A single recipe
/// - `/health`, `/health/ready`, `/health/live`, `/metrics` - Operations
#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting {} v{}", SERVICE_NAME, env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let repo: Arc<dyn RecipeRepository> = match connect_store(&config).await {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!("Recipe store initialization failed: {}", e);
            eprintln!("ERROR: Failed to initialize recipe store: {}", e);
            std::process::exit(1);
        }
    };

    let service: Arc<dyn RecipeService> = Arc::new(DefaultRecipeService::new(
        repo.clone(),
        Arc::new(StubRecipeGenerator),
    ));

    let repo_data = web::Data::from(repo);
    let service_data = web::Data::from(service);
    let cors_config = config.cors.clone();

    let bind_address = config.app.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in cors_config.origins() {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(repo_data.clone())
            .app_data(service_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .configure(handlers::configure)
    })
    .bind(&bind_address)?
    .workers(config.app.workers)
    .disable_signals()
    .run();

    let handle = server.handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping HTTP server");
        handle.stop(true).await;
    });

    server.await?;
    tracing::info!("{} stopped", SERVICE_NAME);
    Ok(())
}
