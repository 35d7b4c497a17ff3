//! Prometheus metrics for recipe-service.
//!
//! Exposes generation collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use prometheus::{
    register_histogram, register_int_counter, Encoder, Histogram, IntCounter, TextEncoder,
};

lazy_static::lazy_static! {
    /// Recipes successfully generated and stored
    pub static ref RECIPES_GENERATED_TOTAL: IntCounter = register_int_counter!(
        "recipes_generated_total",
        "Recipes generated and persisted"
    ).expect("Prometheus metrics registration should succeed at startup");

    /// Pantry size of each generation request
    pub static ref RECIPE_INGREDIENTS_PER_GENERATION: Histogram = register_histogram!(
        "recipe_ingredients_per_generation",
        "Number of ingredients in each generated recipe",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0]
    ).expect("Prometheus metrics registration should succeed at startup");
}

/// Record a stored recipe
pub fn record_generation(ingredient_count: usize) {
    RECIPES_GENERATED_TOTAL.inc();
    RECIPE_INGREDIENTS_PER_GENERATION.observe(ingredient_count as f64);
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
