/// Recipe service - generates recipes and serves history
use crate::db::RecipeRepository;
use crate::error::Result;
use crate::metrics;
use crate::models::Recipe;
use crate::services::analytics::{self, HistoryAnalytics};
use crate::services::RecipeGenerator;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Create and persist a recipe with one ingredient per pantry item
    async fn generate(
        &self,
        pantry: Vec<String>,
        preferences: Option<Vec<String>>,
    ) -> Result<Recipe>;

    /// Every stored recipe, exactly as the repository returns them
    async fn get_history(&self) -> Result<Vec<Recipe>>;

    /// A single stored recipe
    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>>;

    /// Ingredient frequency and per-day counts over the whole history
    async fn get_analytics(&self) -> Result<HistoryAnalytics>;
}

pub struct DefaultRecipeService {
    repo: Arc<dyn RecipeRepository>,
    generator: Arc<dyn RecipeGenerator>,
}

impl DefaultRecipeService {
    pub fn new(repo: Arc<dyn RecipeRepository>, generator: Arc<dyn RecipeGenerator>) -> Self {
        Self { repo, generator }
    }
}

#[async_trait]
impl RecipeService for DefaultRecipeService {
    async fn generate(
        &self,
        pantry: Vec<String>,
        preferences: Option<Vec<String>>,
    ) -> Result<Recipe> {
        let preferences = preferences.unwrap_or_default();
        let content = self
            .generator
            .generate_content(&pantry, &preferences)
            .await?;

        let recipe = Recipe::new(content.title, content.instructions, pantry);
        self.repo.add(&recipe).await?;

        metrics::record_generation(recipe.ingredients.len());
        tracing::info!(
            recipe_id = %recipe.id,
            ingredient_count = recipe.ingredients.len(),
            preference_count = preferences.len(),
            "Generated recipe"
        );

        Ok(recipe)
    }

    async fn get_history(&self) -> Result<Vec<Recipe>> {
        self.repo.list_all().await
    }

    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>> {
        self.repo.get_by_id(id).await
    }

    async fn get_analytics(&self) -> Result<HistoryAnalytics> {
        let recipes = self.repo.list_all().await?;
        Ok(analytics::summarize(&recipes, analytics::TOP_INGREDIENTS))
    }
}
