use crate::action::Action;
use crate::state::{AppState, GenerateStatus, PrimaryRequest, StepAdjustment};

/// Pure transition function: `(state, action) -> state`.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    apply(&mut state, action);
    state
}

pub(crate) fn apply(state: &mut AppState, action: Action) {
    match action {
        Action::SetInput(patch) => patch.apply_to(&mut state.input),

        Action::PrimaryStart { ticket, request } => {
            state.status = GenerateStatus::Loading;
            state.error = None;
            clear_overlays(state);
            // Ingredient-driven updates keep the flag until they succeed.
            if request != PrimaryRequest::AdjustByIngredients {
                state.ingredient_edited = false;
            }
            state.primary_ticket = Some(ticket);
            state.last_request = Some(request);
        }
        Action::PrimarySuccess { ticket, recipe } => {
            if state.primary_ticket != Some(ticket) {
                return;
            }
            state.primary_ticket = None;
            state.status = GenerateStatus::Success;
            state.recipe = Some(recipe);
            clear_overlays(state);
            state.ingredient_edited = false;
        }
        Action::PrimaryError { ticket, message } => {
            if state.primary_ticket != Some(ticket) {
                return;
            }
            // The last good recipe stays visible next to the error banner.
            state.primary_ticket = None;
            state.status = GenerateStatus::Error;
            state.error = Some(message);
        }

        Action::StepAdjustStart {
            ticket,
            step_id,
            kind,
        } => {
            state.step_adjustments.insert(
                step_id.clone(),
                StepAdjustment {
                    step_id,
                    kind,
                    content: String::new(),
                    loading: true,
                    ticket,
                },
            );
        }
        Action::StepAdjustSuccess {
            ticket,
            step_id,
            content,
        } => {
            if let Some(entry) = state.step_adjustments.get_mut(&step_id) {
                if entry.ticket == ticket {
                    entry.content = content;
                    entry.loading = false;
                }
            }
        }
        Action::StepAdjustFailed { ticket, step_id } => {
            if state
                .step_adjustments
                .get(&step_id)
                .is_some_and(|entry| entry.ticket == ticket)
            {
                state.step_adjustments.remove(&step_id);
            }
        }
        Action::StepAdjustClear { step_id } => {
            state.step_adjustments.remove(&step_id);
        }

        Action::SuggestStart {
            ticket,
            ingredient_id,
        } => {
            state.pending_suggestions.insert(ingredient_id, ticket);
        }
        Action::SuggestSuccess {
            ticket,
            ingredient_id,
            suggestions,
        } => {
            if state.pending_suggestions.get(&ingredient_id) == Some(&ticket) {
                state.pending_suggestions.remove(&ingredient_id);
                state
                    .ingredient_suggestions
                    .insert(ingredient_id, suggestions);
            }
        }
        Action::SuggestFailed {
            ticket,
            ingredient_id,
        } => {
            if state.pending_suggestions.get(&ingredient_id) == Some(&ticket) {
                state.pending_suggestions.remove(&ingredient_id);
            }
        }
        Action::SuggestClear { ingredient_id } => {
            state.ingredient_suggestions.remove(&ingredient_id);
            state.pending_suggestions.remove(&ingredient_id);
        }

        Action::DeleteIngredient { ingredient_id } => {
            let Some(recipe) = state.recipe.as_mut() else {
                return;
            };
            let before = recipe.ingredients.len();
            recipe.ingredients.retain(|i| i.id != ingredient_id);
            if recipe.ingredients.len() != before {
                state.ingredient_edited = true;
            }
        }
        Action::ReplaceIngredient {
            ingredient_id,
            name,
            amount,
        } => {
            let Some(recipe) = state.recipe.as_mut() else {
                return;
            };
            let Some(ingredient) = recipe
                .ingredients
                .iter_mut()
                .find(|i| i.id == ingredient_id)
            else {
                return;
            };
            ingredient.name = name;
            ingredient.amount = amount;
            state.ingredient_edited = true;
            state.ingredient_suggestions.remove(&ingredient_id);
            state.pending_suggestions.remove(&ingredient_id);
        }

        Action::SaveRecipe => {
            let Some(recipe) = state.recipe.clone() else {
                return;
            };
            state.saved_recipes.retain(|r| r.id != recipe.id);
            state.saved_recipes.insert(0, recipe);
        }
        Action::OpenSaved { recipe_id } => {
            let Some(recipe) = state.saved_recipes.iter().find(|r| r.id == recipe_id).cloned()
            else {
                return;
            };
            // Whatever primary call is in flight loses to the explicit pick.
            state.primary_ticket = None;
            state.status = GenerateStatus::Success;
            state.error = None;
            state.recipe = Some(recipe);
            clear_overlays(state);
            state.ingredient_edited = false;
        }
        Action::Reset => *state = AppState::default(),
    }
}

fn clear_overlays(state: &mut AppState) {
    state.step_adjustments.clear();
    state.ingredient_suggestions.clear();
    state.pending_suggestions.clear();
}
