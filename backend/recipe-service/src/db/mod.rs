/// Recipe store access
///
/// `RecipeRepository` is the storage contract; every backend loads and
/// persists a recipe together with its ingredients.
/// - `PgRecipeRepository`: PostgreSQL via sqlx
/// - `InMemoryRecipeRepository`: process-local store
use crate::config::{Config, StoreBackend};
use crate::error::Result;
use crate::models::Recipe;
use crate::SERVICE_NAME;
use async_trait::async_trait;
use db_pool::{create_pool, run_migrations, DbConfig};
use sqlx::migrate::Migrator;
use std::sync::Arc;
use uuid::Uuid;

pub mod memory_repo;
pub mod recipe_repo;

pub use memory_repo::InMemoryRecipeRepository;
pub use recipe_repo::PgRecipeRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Every stored recipe with its ingredients, in store order
    async fn list_all(&self) -> Result<Vec<Recipe>>;

    /// The recipe with `id`, or `None` when nothing matches
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Recipe>>;

    /// Persist a recipe and all of its ingredients atomically
    async fn add(&self, recipe: &Recipe) -> Result<()>;

    /// Check that the store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Schema for the PostgreSQL store
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Build the repository selected by configuration.
///
/// For PostgreSQL this creates the pool and applies the schema when
/// `run_migrations` is set.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn RecipeRepository>> {
    match config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory recipe store; recipes are lost on restart");
            Ok(Arc::new(InMemoryRecipeRepository::new()))
        }
        StoreBackend::Postgres => {
            let db_cfg = DbConfig::new(SERVICE_NAME, config.database.url.clone()).with_connections(
                config.database.max_connections,
                config.database.min_connections,
            );
            db_cfg.log_config();

            let pool = create_pool(db_cfg).await?;
            if config.database.run_migrations {
                run_migrations(&pool, &MIGRATOR).await?;
            }

            tracing::info!("Connected to PostgreSQL recipe store");
            Ok(Arc::new(PgRecipeRepository::new(pool)))
        }
    }
}
