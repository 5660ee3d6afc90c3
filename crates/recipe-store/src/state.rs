use std::collections::BTreeMap;

use recipe_core::{AdjustmentType, Recipe, RecipeInput, StepAdjustKind};
use serde::Serialize;

/// Issued by the store for every collaborator call; completions carrying a
/// ticket that no longer matches the live entry are dropped.
pub type Ticket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerateStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// The whole-recipe operations that go through the global status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "type")]
pub enum PrimaryRequest {
    Generate,
    Adjust(AdjustmentType),
    AdjustByIngredients,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepAdjustment {
    pub step_id: String,
    pub kind: StepAdjustKind,
    pub content: String,
    pub loading: bool,
    #[serde(skip)]
    pub(crate) ticket: Ticket,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub input: RecipeInput,
    pub recipe: Option<Recipe>,
    pub status: GenerateStatus,
    pub error: Option<String>,
    pub step_adjustments: BTreeMap<String, StepAdjustment>,
    pub ingredient_suggestions: BTreeMap<String, Vec<String>>,
    pub ingredient_edited: bool,
    /// Most recently saved first, unique by id.
    pub saved_recipes: Vec<Recipe>,
    /// What the error banner's retry re-runs.
    pub last_request: Option<PrimaryRequest>,
    #[serde(skip)]
    pub(crate) primary_ticket: Option<Ticket>,
    #[serde(skip)]
    pub(crate) pending_suggestions: BTreeMap<String, Ticket>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status == GenerateStatus::Loading
    }

    pub fn is_saved(&self, recipe_id: &str) -> bool {
        self.saved_recipes.iter().any(|r| r.id == recipe_id)
    }

    pub fn step_adjustment(&self, step_id: &str) -> Option<&StepAdjustment> {
        self.step_adjustments.get(step_id)
    }

    pub fn suggestions_for(&self, ingredient_id: &str) -> Option<&[String]> {
        self.ingredient_suggestions
            .get(ingredient_id)
            .map(Vec::as_slice)
    }

    pub fn is_suggesting(&self, ingredient_id: &str) -> bool {
        self.pending_suggestions.contains_key(ingredient_id)
    }

    /// True while any collaborator call is outstanding.
    pub fn is_busy(&self) -> bool {
        self.primary_ticket.is_some()
            || !self.pending_suggestions.is_empty()
            || self.step_adjustments.values().any(|a| a.loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_json_hides_tickets() {
        let mut state = AppState::new();
        state.primary_ticket = Some(3);
        state.last_request = Some(PrimaryRequest::Adjust(AdjustmentType::Faster));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["status"], "idle");
        assert_eq!(json["ingredientEdited"], false);
        assert_eq!(json["lastRequest"]["kind"], "adjust");
        assert_eq!(json["lastRequest"]["type"], "faster");
        assert!(json.get("primaryTicket").is_none());
        assert!(json.get("pendingSuggestions").is_none());
    }

    #[test]
    fn test_busy_tracks_outstanding_calls() {
        let mut state = AppState::new();
        assert!(!state.is_busy());

        state.step_adjustments.insert(
            "s1".into(),
            StepAdjustment {
                step_id: "s1".into(),
                kind: StepAdjustKind::Detail,
                content: String::new(),
                loading: true,
                ticket: 1,
            },
        );
        assert!(state.is_busy());

        if let Some(entry) = state.step_adjustments.get_mut("s1") {
            entry.loading = false;
        }
        assert!(!state.is_busy());

        state.pending_suggestions.insert("i1".into(), 2);
        assert!(state.is_busy());
        assert!(state.is_suggesting("i1"));
    }
}
