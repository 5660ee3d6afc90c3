mod fixtures;
mod http;
mod mock;

use std::sync::Arc;

use recipe_core::{Backend, RecipeConfig, RecipeService};
use tracing::info;

pub use fixtures::{fixture_recipe, substitutes_for, FIXTURE_RECIPE_ID, STEP_DETAIL_TEXT, STEP_SIMPLE_TEXT};
pub use http::{
    HttpRecipeService, ADJUST_INGREDIENTS_PATH, ADJUST_PATH, ADJUST_STEP_PATH, GENERATE_PATH,
    SUGGEST_PATH,
};
pub use mock::MockRecipeService;

/// Pick the service implementation the configuration asks for.
pub fn build_service(config: &RecipeConfig) -> Arc<dyn RecipeService> {
    match config.backend() {
        Backend::Http { base_url } => {
            info!("Using recipe API at {}", base_url);
            Arc::new(HttpRecipeService::new(&base_url))
        }
        Backend::Mock(mock) => {
            info!("Using mock recipe service ({}ms delay)", mock.delay_ms);
            Arc::new(MockRecipeService::new(&mock))
        }
    }
}
