//! HTTP tests for the recipe endpoints
//!
//! Runs the real route table against the in-memory store, plus a store that
//! always fails to check the 500 mapping.

use actix_web::{http::header, http::StatusCode, test, web, App};
use async_trait::async_trait;
use recipe_service::db::{InMemoryRecipeRepository, RecipeRepository};
use recipe_service::handlers;
use recipe_service::models::Recipe;
use recipe_service::services::{
    DefaultRecipeService, GeneratedContent, RecipeGenerator, RecipeService, StubRecipeGenerator,
};
use recipe_service::{AppError, Result};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

struct UnavailableStore;

#[async_trait]
impl RecipeRepository for UnavailableStore {
    async fn list_all(&self) -> Result<Vec<Recipe>> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn get_by_id(&self, _id: Uuid) -> Result<Option<Recipe>> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn add(&self, _recipe: &Recipe) -> Result<()> {
        Err(AppError::Database("connection refused".into()))
    }

    async fn health_check(&self) -> Result<()> {
        Err(AppError::Database("connection refused".into()))
    }
}

/// Remembers the preferences of every generation request
#[derive(Default)]
struct RecordingGenerator {
    preferences: Mutex<Vec<Vec<String>>>,
}

#[async_trait]
impl RecipeGenerator for RecordingGenerator {
    async fn generate_content(
        &self,
        pantry: &[String],
        preferences: &[String],
    ) -> Result<GeneratedContent> {
        self.preferences
            .lock()
            .expect("generator lock")
            .push(preferences.to_vec());
        StubRecipeGenerator.generate_content(pantry, preferences).await
    }
}

fn app_data(
    repo: Arc<dyn RecipeRepository>,
    generator: Arc<dyn RecipeGenerator>,
) -> (web::Data<dyn RecipeRepository>, web::Data<dyn RecipeService>) {
    let service: Arc<dyn RecipeService> =
        Arc::new(DefaultRecipeService::new(repo.clone(), generator));
    (web::Data::from(repo), web::Data::from(service))
}

macro_rules! init_app {
    ($repo:expr) => {
        init_app!($repo, Arc::new(StubRecipeGenerator))
    };
    ($repo:expr, $generator:expr) => {{
        let (repo_data, service_data) = app_data($repo, $generator);
        test::init_service(
            App::new()
                .app_data(repo_data)
                .app_data(service_data)
                .configure(handlers::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn generate_returns_201_with_location() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let req = test::TestRequest::post()
        .uri("/recipes/generate?prefs=vegetarian&prefs=quick")
        .set_json(vec!["eggs", "flour"])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .expect("Location header");

    let recipe: Recipe = test::read_body_json(resp).await;
    assert_eq!(location, format!("/recipes/{}", recipe.id));

    let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["eggs", "flour"]);
    assert!(!recipe.title.is_empty());
    assert!(!recipe.instructions.is_empty());
}

#[actix_web::test]
async fn preferences_reach_the_generator_under_both_keys() {
    let generator = Arc::new(RecordingGenerator::default());
    let app = init_app!(
        Arc::new(InMemoryRecipeRepository::new()),
        generator.clone()
    );

    for uri in [
        "/recipes/generate?preferences=vegan&preferences=spicy",
        "/recipes/generate?prefs=quick",
        "/recipes/generate?unrelated=1",
    ] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(vec!["tofu"])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED, "{}", uri);
    }

    let seen = generator.preferences.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![
            vec!["vegan".to_string(), "spicy".to_string()],
            vec!["quick".to_string()],
            Vec::new(),
        ]
    );
}

#[actix_web::test]
async fn generated_recipe_is_reachable_via_location() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let created: Recipe = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/recipes/generate")
            .set_json(vec!["rice"])
            .to_request(),
    )
    .await;

    let fetched: Recipe = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/recipes/{}", created.id))
            .to_request(),
    )
    .await;

    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn response_body_uses_camel_case() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/recipes/generate")
            .set_json(vec!["basil"])
            .to_request(),
    )
    .await;

    for key in ["id", "title", "instructions", "ingredients", "createdAt"] {
        assert!(body.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(body["ingredients"][0]["recipeId"], body["id"]);
}

#[actix_web::test]
async fn empty_pantry_creates_recipe_without_ingredients() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let req = test::TestRequest::post()
        .uri("/recipes/generate")
        .set_json(Vec::<String>::new())
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let recipe: Recipe = test::read_body_json(resp).await;
    assert!(recipe.ingredients.is_empty());
}

#[actix_web::test]
async fn unknown_recipe_returns_404() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let req = test::TestRequest::get()
        .uri(&format!("/recipes/{}", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 404);
}

#[actix_web::test]
async fn malformed_id_returns_400() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let req = test::TestRequest::get()
        .uri("/recipes/not-a-uuid")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn non_array_body_returns_400() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let req = test::TestRequest::post()
        .uri("/recipes/generate")
        .set_json(serde_json::json!({"pantry": ["eggs"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn history_lists_every_generated_recipe() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let empty: Vec<Recipe> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/recipes/history").to_request(),
    )
    .await;
    assert!(empty.is_empty());

    let mut created = Vec::new();
    for pantry in [vec!["eggs"], vec!["milk", "oats"], vec![]] {
        let recipe: Recipe = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/recipes/generate")
                .set_json(pantry)
                .to_request(),
        )
        .await;
        created.push(recipe);
    }

    let history: Vec<Recipe> = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/recipes/history").to_request(),
    )
    .await;

    assert_eq!(history.len(), created.len());
    for recipe in &created {
        assert_eq!(history.iter().filter(|r| r.id == recipe.id).count(), 1);
    }
}

#[actix_web::test]
async fn store_failure_returns_500() {
    let app = init_app!(Arc::new(UnavailableStore));

    let req = test::TestRequest::post()
        .uri("/recipes/generate")
        .set_json(vec!["eggs"])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 500);
    assert!(body["error"]
        .as_str()
        .unwrap_or_default()
        .contains("connection refused"));

    let req = test::TestRequest::get().uri("/recipes/history").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn health_endpoints_reflect_store_state() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));
    for uri in ["/health", "/health/ready", "/health/live"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK, "{}", uri);
    }

    let app = init_app!(Arc::new(UnavailableStore));
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], false);
    assert_eq!(body["checks"]["store"]["status"], "unhealthy");
}

#[actix_web::test]
async fn analytics_summarizes_history() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    for pantry in [vec!["Eggs", "flour"], vec![" eggs", "milk"], vec!["milk"]] {
        let req = test::TestRequest::post()
            .uri("/recipes/generate")
            .set_json(pantry)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let body: serde_json::Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/recipes/analytics").to_request(),
    )
    .await;

    assert_eq!(body["totalRecipes"], 3);
    assert_eq!(
        body["topIngredients"],
        serde_json::json!([
            {"ingredient": "eggs", "frequency": 2},
            {"ingredient": "milk", "frequency": 2},
            {"ingredient": "flour", "frequency": 1},
        ])
    );
    let per_day = body["recipesPerDay"].as_array().expect("recipesPerDay array");
    let total: u64 = per_day.iter().filter_map(|d| d["count"].as_u64()).sum();
    assert_eq!(total, 3);
}

#[actix_web::test]
async fn analytics_store_failure_returns_500() {
    let app = init_app!(Arc::new(UnavailableStore));

    let req = test::TestRequest::get().uri("/recipes/analytics").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn metrics_endpoint_exposes_generation_counter() {
    let app = init_app!(Arc::new(InMemoryRecipeRepository::new()));

    let req = test::TestRequest::post()
        .uri("/recipes/generate")
        .set_json(vec!["eggs"])
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).expect("utf-8 metrics");
    let counter = text
        .lines()
        .find(|line| line.starts_with("recipes_generated_total "))
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|value| value.parse::<f64>().ok())
        .expect("recipes_generated_total sample");
    assert!(counter >= 1.0);
    assert!(text.contains("recipe_ingredients_per_generation"));
}
