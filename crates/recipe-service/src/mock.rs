use std::time::Duration;

use async_trait::async_trait;
use recipe_core::{
    AdjustmentType, MockConfig, Recipe, RecipeInput, RecipeService, RecipeStep, Result,
    StepAdjustKind,
};
use tracing::info;

use crate::fixtures::{fixture_recipe, substitutes_for, STEP_DETAIL_TEXT, STEP_SIMPLE_TEXT};

/// Static responses behind an artificial delay, standing in for network latency.
pub struct MockRecipeService {
    delay: Duration,
    step_delay: Duration,
}

impl MockRecipeService {
    pub fn new(config: &MockConfig) -> Self {
        Self::with_delays(config.delay(), config.step_delay())
    }

    pub fn with_delays(delay: Duration, step_delay: Duration) -> Self {
        Self { delay, step_delay }
    }

    pub fn instant() -> Self {
        Self::with_delays(Duration::ZERO, Duration::ZERO)
    }

    async fn pause(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for MockRecipeService {
    fn default() -> Self {
        Self::new(&MockConfig::default())
    }
}

#[async_trait]
impl RecipeService for MockRecipeService {
    async fn generate(&self, input: &RecipeInput) -> Result<Recipe> {
        info!("MOCK_SERVICE: Generating for '{}'", input.query);
        Self::pause(self.delay).await;
        Ok(fixture_recipe())
    }

    async fn adjust_whole(&self, recipe: &Recipe, adjustment: AdjustmentType) -> Result<Recipe> {
        info!("MOCK_SERVICE: {:?} adjustment of {}", adjustment, recipe.id);
        Self::pause(self.delay).await;
        Ok(fixture_recipe())
    }

    async fn adjust_by_ingredients(&self, recipe: &Recipe) -> Result<Recipe> {
        info!(
            "MOCK_SERVICE: Reworking {} around {} ingredients",
            recipe.id,
            recipe.ingredients.len()
        );
        Self::pause(self.delay).await;

        let names: Vec<&str> = recipe.ingredients.iter().map(|i| i.name.as_str()).collect();
        let mut updated = recipe.clone();
        updated.ai_comment = format!("Reworked to use what you have: {}.", names.join(", "));
        Ok(updated)
    }

    async fn adjust_step(&self, step: &RecipeStep, kind: StepAdjustKind) -> Result<String> {
        info!("MOCK_SERVICE: {:?} rewrite of step {}", kind, step.id);
        Self::pause(self.step_delay).await;
        Ok(match kind {
            StepAdjustKind::Detail => STEP_DETAIL_TEXT.to_string(),
            StepAdjustKind::Simple => STEP_SIMPLE_TEXT.to_string(),
        })
    }

    async fn suggest_substitutes(&self, ingredient_name: &str) -> Result<Vec<String>> {
        Self::pause(self.step_delay).await;
        Ok(substitutes_for(ingredient_name))
    }
}
