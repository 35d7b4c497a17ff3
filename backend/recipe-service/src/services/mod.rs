/// Business logic layer
///
/// - `analytics`: summaries over the stored history
/// - `generator`: recipe content providers (title and instructions)
/// - `recipes`: recipe generation and history
pub mod analytics;
pub mod generator;
pub mod recipes;

pub use analytics::{DailyCount, HistoryAnalytics, IngredientFrequency};
pub use generator::{GeneratedContent, RecipeGenerator, StubRecipeGenerator};
pub use recipes::{DefaultRecipeService, RecipeService};
