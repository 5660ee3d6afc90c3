use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use recipe_core::{
    AdjustmentType, Recipe, RecipeError, RecipeInput, RecipeInputPatch, RecipeService, RecipeStep,
    Result, StepAdjustKind,
};
use recipe_service::{fixture_recipe, MockRecipeService, STEP_DETAIL_TEXT, STEP_SIMPLE_TEXT};
use recipe_store::{GenerateStatus, PrimaryRequest, RecipeStore, StoreHandle};

/// Wraps the mock, counting calls and failing on demand.
#[derive(Default)]
struct FlakyService {
    inner: MockRecipeService,
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl FlakyService {
    fn instant() -> Self {
        Self {
            inner: MockRecipeService::instant(),
            ..Default::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(RecipeError::Server {
                status: 500,
                body: "kitchen on fire".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecipeService for FlakyService {
    async fn generate(&self, input: &RecipeInput) -> Result<Recipe> {
        self.check()?;
        self.inner.generate(input).await
    }

    async fn adjust_whole(&self, recipe: &Recipe, adjustment: AdjustmentType) -> Result<Recipe> {
        self.check()?;
        self.inner.adjust_whole(recipe, adjustment).await
    }

    async fn adjust_by_ingredients(&self, recipe: &Recipe) -> Result<Recipe> {
        self.check()?;
        self.inner.adjust_by_ingredients(recipe).await
    }

    async fn adjust_step(&self, step: &RecipeStep, kind: StepAdjustKind) -> Result<String> {
        self.check()?;
        self.inner.adjust_step(step, kind).await
    }

    async fn suggest_substitutes(&self, ingredient_name: &str) -> Result<Vec<String>> {
        self.check()?;
        self.inner.suggest_substitutes(ingredient_name).await
    }
}

fn mock_store() -> StoreHandle {
    RecipeStore::spawn(Arc::new(MockRecipeService::instant()))
}

async fn store_with_recipe() -> StoreHandle {
    let store = mock_store();
    store.generate().await.unwrap();
    let state = store.settled().await.unwrap();
    assert_eq!(state.status, GenerateStatus::Success);
    store
}

#[tokio::test]
async fn test_generate_scenario() {
    let store = mock_store();
    store
        .set_input(RecipeInputPatch {
            query: Some("chicken and tomato".into()),
            servings: Some(2),
            max_minutes: Some(30),
            ..Default::default()
        })
        .await
        .unwrap();

    store.generate().await.unwrap();
    let state = store.settled().await.unwrap();

    assert_eq!(state.status, GenerateStatus::Success);
    assert!(state.error.is_none());
    assert_eq!(state.input.query, "chicken and tomato");

    let recipe = state.recipe.unwrap();
    assert!(!recipe.ingredients.is_empty());
    assert!(!recipe.steps.is_empty());
    let millis = recipe.id.strip_prefix("recipe-").unwrap();
    assert!(millis.parse::<i64>().is_ok());
}

#[tokio::test]
async fn test_generate_with_empty_query() {
    let service = Arc::new(FlakyService::instant());
    let store = RecipeStore::spawn(service.clone());
    assert!(store.snapshot().input.query.is_empty());

    store.generate().await.unwrap();
    let state = store.settled().await.unwrap();

    assert_eq!(service.calls(), 1);
    assert_eq!(state.status, GenerateStatus::Success);
    assert!(state.recipe.is_some());
}

#[tokio::test]
async fn test_generate_is_loading_until_settled() {
    let service = Arc::new(MockRecipeService::with_delays(
        std::time::Duration::from_millis(50),
        std::time::Duration::ZERO,
    ));
    let store = RecipeStore::spawn(service);

    store.generate().await.unwrap();
    assert_eq!(store.snapshot().status, GenerateStatus::Loading);

    let state = store.settled().await.unwrap();
    assert_eq!(state.status, GenerateStatus::Success);
}

#[tokio::test]
async fn test_each_generate_mints_a_fresh_id() {
    let store = store_with_recipe().await;
    let first = store.snapshot().recipe.unwrap().id;

    store.generate().await.unwrap();
    let second = store.settled().await.unwrap().recipe.unwrap().id;

    assert_ne!(first, second);
    assert_ne!(second, fixture_recipe().id);
}

#[tokio::test]
async fn test_adjust_without_recipe_calls_nothing() {
    let service = Arc::new(FlakyService::instant());
    let store = RecipeStore::spawn(service.clone());

    store.adjust(AdjustmentType::Simpler).await.unwrap();
    store.adjust_by_ingredients().await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.status, GenerateStatus::Idle);
    assert!(state.last_request.is_none());
    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_adjust_replaces_recipe_and_clears_overlays() {
    let store = store_with_recipe().await;
    let before = store.snapshot().recipe.unwrap().id;

    store.adjust_step("s1", StepAdjustKind::Detail).await.unwrap();
    store.suggest_alternatives("i1", "chicken thigh").await.unwrap();
    store.settled().await.unwrap();

    store.adjust(AdjustmentType::Healthier).await.unwrap();
    let state = store.settled().await.unwrap();

    assert_eq!(state.status, GenerateStatus::Success);
    assert_ne!(state.recipe.unwrap().id, before);
    assert!(state.step_adjustments.is_empty());
    assert!(state.ingredient_suggestions.is_empty());
    assert_eq!(
        state.last_request,
        Some(PrimaryRequest::Adjust(AdjustmentType::Healthier))
    );
}

#[tokio::test]
async fn test_suggest_toggles() {
    let store = store_with_recipe().await;

    store.suggest_alternatives("i1", "chicken thigh").await.unwrap();
    let state = store.settled().await.unwrap();
    let suggestions = state.suggestions_for("i1").unwrap();
    assert!(!suggestions.is_empty());

    store.suggest_alternatives("i1", "chicken thigh").await.unwrap();
    let state = store.snapshot();
    assert!(state.suggestions_for("i1").is_none());
}

#[tokio::test]
async fn test_suggest_failure_is_silent() {
    let service = Arc::new(FlakyService::instant());
    let store = RecipeStore::spawn(service.clone());
    store.generate().await.unwrap();
    store.settled().await.unwrap();

    service.set_failing(true);
    store.suggest_alternatives("i1", "chicken thigh").await.unwrap();
    let state = store.settled().await.unwrap();

    assert!(state.suggestions_for("i1").is_none());
    assert!(state.error.is_none());
    assert_eq!(state.status, GenerateStatus::Success);
}

#[tokio::test]
async fn test_step_detail_twice_collapses() {
    let store = store_with_recipe().await;

    store.adjust_step("s2", StepAdjustKind::Detail).await.unwrap();
    let state = store.settled().await.unwrap();
    let entry = state.step_adjustment("s2").unwrap();
    assert_eq!(entry.content, STEP_DETAIL_TEXT);
    assert!(!entry.loading);

    store.adjust_step("s2", StepAdjustKind::Detail).await.unwrap();
    assert!(store.snapshot().step_adjustment("s2").is_none());
}

#[tokio::test]
async fn test_step_detail_then_simple_keeps_one_entry() {
    let store = store_with_recipe().await;

    store.adjust_step("s2", StepAdjustKind::Detail).await.unwrap();
    store.adjust_step("s2", StepAdjustKind::Simple).await.unwrap();
    let state = store.settled().await.unwrap();

    assert_eq!(state.step_adjustments.len(), 1);
    let entry = state.step_adjustment("s2").unwrap();
    assert_eq!(entry.kind, StepAdjustKind::Simple);
    assert_eq!(entry.content, STEP_SIMPLE_TEXT);
}

#[tokio::test]
async fn test_unknown_step_is_ignored() {
    let store = store_with_recipe().await;
    store.adjust_step("s99", StepAdjustKind::Detail).await.unwrap();
    assert!(store.snapshot().step_adjustments.is_empty());
}

#[tokio::test]
async fn test_step_failure_leaves_no_entry_and_no_banner() {
    let service = Arc::new(FlakyService::instant());
    let store = RecipeStore::spawn(service.clone());
    store.generate().await.unwrap();
    store.settled().await.unwrap();

    service.set_failing(true);
    store.adjust_step("s1", StepAdjustKind::Simple).await.unwrap();
    let state = store.settled().await.unwrap();

    assert!(state.step_adjustment("s1").is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn test_delete_then_rework_by_ingredients() {
    let store = store_with_recipe().await;

    store.delete_ingredient("missing").await.unwrap();
    assert!(!store.snapshot().ingredient_edited);

    store.delete_ingredient("i4").await.unwrap();
    let state = store.snapshot();
    assert!(state.ingredient_edited);
    assert_eq!(state.recipe.as_ref().unwrap().ingredients.len(), 5);

    store.adjust_by_ingredients().await.unwrap();
    let state = store.settled().await.unwrap();
    assert!(!state.ingredient_edited);
    let recipe = state.recipe.unwrap();
    assert!(recipe.ingredient("i4").is_none());
    assert!(recipe.ai_comment.starts_with("Reworked"));
}

#[tokio::test]
async fn test_replace_ingredient_in_place() {
    let store = store_with_recipe().await;

    store.suggest_alternatives("i1", "chicken thigh").await.unwrap();
    store.settled().await.unwrap();
    store
        .replace_ingredient("i1", "chicken breast", "300g")
        .await
        .unwrap();

    let state = store.snapshot();
    let recipe = state.recipe.as_ref().unwrap();
    assert_eq!(recipe.ingredients[0].id, "i1");
    assert_eq!(recipe.ingredients[0].name, "chicken breast");
    assert!(state.suggestions_for("i1").is_none());
    assert!(state.ingredient_edited);
}

#[tokio::test]
async fn test_save_moves_to_front() {
    let store = store_with_recipe().await;
    let first = store.snapshot().recipe.unwrap().id;
    store.save().await.unwrap();

    store.generate().await.unwrap();
    store.settled().await.unwrap();
    store.save().await.unwrap();
    store.save().await.unwrap();

    let state = store.snapshot();
    assert_eq!(state.saved_recipes.len(), 2);
    assert_ne!(state.saved_recipes[0].id, first);
    assert_eq!(state.saved_recipes[1].id, first);
    assert!(state.is_saved(&first));
}

#[tokio::test]
async fn test_open_saved_makes_it_active_again() {
    let service = Arc::new(FlakyService::instant());
    let store = RecipeStore::spawn(service.clone());
    store.generate().await.unwrap();
    let first = store.settled().await.unwrap().recipe.unwrap().id;
    store.save().await.unwrap();
    store.generate().await.unwrap();
    store.settled().await.unwrap();
    store.suggest_alternatives("i1", "chicken thigh").await.unwrap();
    store.settled().await.unwrap();

    let calls = service.calls();
    store.open_saved(first.clone()).await.unwrap();
    let state = store.snapshot();
    assert_eq!(service.calls(), calls);
    assert_eq!(state.status, GenerateStatus::Success);
    assert_eq!(state.recipe.as_ref().unwrap().id, first);
    assert!(state.ingredient_suggestions.is_empty());
    assert_eq!(state.saved_recipes.len(), 1);

    store.open_saved("recipe-0").await.unwrap();
    assert_eq!(store.snapshot().recipe.unwrap().id, first);
}

#[tokio::test]
async fn test_error_keeps_recipe_and_retry_recovers() {
    let service = Arc::new(FlakyService::instant());
    let store = RecipeStore::spawn(service.clone());
    store.generate().await.unwrap();
    let kept = store.settled().await.unwrap().recipe.unwrap().id;

    service.set_failing(true);
    store.adjust(AdjustmentType::Faster).await.unwrap();
    let state = store.settled().await.unwrap();
    assert_eq!(state.status, GenerateStatus::Error);
    assert_eq!(state.error.as_deref(), Some("API error 500: kitchen on fire"));
    assert_eq!(state.recipe.as_ref().unwrap().id, kept);

    service.set_failing(false);
    let calls = service.calls();
    store.retry().await.unwrap();
    let state = store.settled().await.unwrap();
    assert_eq!(service.calls(), calls + 1);
    assert_eq!(state.status, GenerateStatus::Success);
    assert!(state.error.is_none());
    assert_ne!(state.recipe.unwrap().id, kept);
}

#[tokio::test]
async fn test_reset_restores_initial_state() {
    let store = store_with_recipe().await;
    store.save().await.unwrap();
    store.reset().await.unwrap();

    let state = store.snapshot();
    assert!(state.recipe.is_none());
    assert!(state.saved_recipes.is_empty());
    assert_eq!(state.status, GenerateStatus::Idle);
    assert_eq!(state.input, RecipeInput::default());
}
