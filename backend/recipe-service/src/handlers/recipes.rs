/// Recipe handlers - HTTP endpoints for recipe operations
use crate::error::{AppError, Result};
use crate::services::RecipeService;
use actix_web::{http::header, web, HttpResponse};
use uuid::Uuid;

/// Query keys accepted for generation preferences
const PREFERENCE_KEYS: [&str; 2] = ["prefs", "preferences"];

/// Generate a recipe from a pantry list
///
/// Body: JSON array of pantry items. Preferences arrive as repeated
/// `prefs` (or `preferences`) query parameters.
pub async fn generate_recipe(
    service: web::Data<dyn RecipeService>,
    query: web::Query<Vec<(String, String)>>,
    pantry: web::Json<Vec<String>>,
) -> Result<HttpResponse> {
    let preferences: Vec<String> = query
        .into_inner()
        .into_iter()
        .filter(|(key, _)| PREFERENCE_KEYS.contains(&key.as_str()))
        .map(|(_, value)| value)
        .collect();
    let preferences = (!preferences.is_empty()).then_some(preferences);

    let recipe = service.generate(pantry.into_inner(), preferences).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/recipes/{}", recipe.id)))
        .json(recipe))
}

/// Get a recipe by ID
pub async fn get_recipe(
    service: web::Data<dyn RecipeService>,
    recipe_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let recipe_id = recipe_id.into_inner();
    match service.get_recipe(recipe_id).await? {
        Some(recipe) => Ok(HttpResponse::Ok().json(recipe)),
        None => Err(AppError::NotFound(format!("recipe {}", recipe_id))),
    }
}

/// List every generated recipe
pub async fn get_history(service: web::Data<dyn RecipeService>) -> Result<HttpResponse> {
    let recipes = service.get_history().await?;
    Ok(HttpResponse::Ok().json(recipes))
}

/// Ingredient frequency and generation trend over the history
pub async fn get_analytics(service: web::Data<dyn RecipeService>) -> Result<HttpResponse> {
    let analytics = service.get_analytics().await?;
    Ok(HttpResponse::Ok().json(analytics))
}
