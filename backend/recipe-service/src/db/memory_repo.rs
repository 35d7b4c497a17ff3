use super::RecipeRepository;
use crate::error::{AppError, Result};
use crate::models::Recipe;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local recipe store
///
/// Keeps whole aggregates in insertion order. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryRecipeRepository {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeRepository for InMemoryRecipeRepository {
    async fn list_all(&self) -> Result<Vec<Recipe>> {
        Ok(self.recipes.read().await.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>> {
        Ok(self
            .recipes
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn add(&self, recipe: &Recipe) -> Result<()> {
        let mut recipes = self.recipes.write().await;

        // Mirror the primary key constraint of the relational store
        if recipes.iter().any(|r| r.id == recipe.id) {
            return Err(AppError::Database(format!(
                "duplicate key value violates unique constraint \"recipes_pkey\": {}",
                recipe.id
            )));
        }

        recipes.push(recipe.clone());
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(pantry: &[&str]) -> Recipe {
        Recipe::new(
            "Sample".to_string(),
            "Cook.".to_string(),
            pantry.iter().copied(),
        )
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let repo = InMemoryRecipeRepository::new();
        repo.add(&recipe(&["rice"])).await.unwrap();

        assert!(repo.get_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_add_then_get_round_trips() {
        let repo = InMemoryRecipeRepository::new();
        let stored = recipe(&["eggs", "flour"]);
        repo.add(&stored).await.unwrap();

        let loaded = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn test_list_all_returns_each_recipe_once() {
        let repo = InMemoryRecipeRepository::new();
        let first = recipe(&["a"]);
        let second = recipe(&[]);
        repo.add(&first).await.unwrap();
        repo.add(&second).await.unwrap();

        let all = repo.list_all().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_rejected() {
        let repo = InMemoryRecipeRepository::new();
        let stored = recipe(&["salt"]);
        repo.add(&stored).await.unwrap();

        let err = repo.add(&stored).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(repo.list_all().await.unwrap().len(), 1);
    }
}
