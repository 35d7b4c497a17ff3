/// HTTP handlers
///
/// - Recipes: generate, get by id, history, analytics
/// - Health: summary, readiness, liveness
pub mod health;
pub mod recipes;

pub use health::{health_summary, liveness_check, readiness_summary};
pub use recipes::{generate_recipe, get_analytics, get_history, get_recipe};

use crate::error::AppError;
use actix_web::web;

/// Register every route plus extractor error handlers.
///
/// Expects `web::Data<dyn RecipeService>` and `web::Data<dyn RecipeRepository>`
/// in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .route("/metrics", web::get().to(crate::metrics::serve_metrics))
    .route("/health", web::get().to(health_summary))
    .route("/health/ready", web::get().to(readiness_summary))
    .route("/health/live", web::get().to(liveness_check))
    .service(
        web::scope("/recipes")
            .route("/generate", web::post().to(generate_recipe))
            .route("/history", web::get().to(get_history))
            .route("/analytics", web::get().to(get_analytics))
            .route("/{recipe_id}", web::get().to(get_recipe)),
    );
}
