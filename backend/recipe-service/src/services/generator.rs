/// Recipe content generation
///
/// The service asks a `RecipeGenerator` for the title and instructions of a
/// new recipe. `StubRecipeGenerator` returns fixed content; an external
/// provider plugs in behind the same trait.
use crate::error::Result;
use async_trait::async_trait;

pub const STUB_TITLE: &str = "Sample AI Recipe";
pub const STUB_INSTRUCTIONS: &str = "1. Mix ingredients.\n2. Cook.\n3. Serve.";

/// Title and instructions produced for a pantry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContent {
    pub title: String,
    pub instructions: String,
}

#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate_content(
        &self,
        pantry: &[String],
        preferences: &[String],
    ) -> Result<GeneratedContent>;
}

/// Fixed placeholder content; ignores its inputs
#[derive(Debug, Default, Clone, Copy)]
pub struct StubRecipeGenerator;

#[async_trait]
impl RecipeGenerator for StubRecipeGenerator {
    async fn generate_content(
        &self,
        _pantry: &[String],
        _preferences: &[String],
    ) -> Result<GeneratedContent> {
        Ok(GeneratedContent {
            title: STUB_TITLE.to_string(),
            instructions: STUB_INSTRUCTIONS.to_string(),
        })
    }
}
