use async_trait::async_trait;

use crate::{AdjustmentType, Recipe, RecipeInput, RecipeStep, Result, StepAdjustKind};

/// Source of recipe content. Results are generative: identical requests may
/// return different content, so callers never rely on identity across calls.
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn generate(&self, input: &RecipeInput) -> Result<Recipe>;

    async fn adjust_whole(&self, recipe: &Recipe, adjustment: AdjustmentType) -> Result<Recipe>;

    /// Rework steps and nutrition to fit the (possibly edited) ingredient list.
    async fn adjust_by_ingredients(&self, recipe: &Recipe) -> Result<Recipe>;

    async fn adjust_step(&self, step: &RecipeStep, kind: StepAdjustKind) -> Result<String>;

    async fn suggest_substitutes(&self, ingredient_name: &str) -> Result<Vec<String>>;
}
