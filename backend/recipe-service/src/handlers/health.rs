/// Health check endpoints
use crate::db::RecipeRepository;
use crate::SERVICE_NAME;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    latency_ms: u64,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

pub async fn health_summary(repo: web::Data<dyn RecipeRepository>) -> HttpResponse {
    match repo.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": SERVICE_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("Recipe store check failed: {}", e),
            "service": SERVICE_NAME
        })),
    }
}

pub async fn readiness_summary(repo: web::Data<dyn RecipeRepository>) -> HttpResponse {
    let start = Instant::now();
    let result = repo.health_check().await;
    let latency_ms = start.elapsed().as_millis() as u64;

    let (ready, store_check) = match result {
        Ok(()) => (
            true,
            ComponentCheck {
                status: ComponentStatus::Healthy,
                message: "Recipe store reachable".to_string(),
                latency_ms,
            },
        ),
        Err(e) => (
            false,
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("Recipe store check failed: {}", e),
                latency_ms,
            },
        ),
    };

    let mut checks = HashMap::new();
    checks.insert("store".to_string(), store_check);

    let response = ReadinessResponse {
        ready,
        status: if ready {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        },
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}
