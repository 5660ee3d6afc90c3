use recipe_core::{Recipe, RecipeInputPatch, StepAdjustKind};

use crate::state::{PrimaryRequest, Ticket};

/// Every state transition the reducer knows about.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetInput(RecipeInputPatch),

    PrimaryStart {
        ticket: Ticket,
        request: PrimaryRequest,
    },
    PrimarySuccess {
        ticket: Ticket,
        recipe: Recipe,
    },
    PrimaryError {
        ticket: Ticket,
        message: String,
    },

    StepAdjustStart {
        ticket: Ticket,
        step_id: String,
        kind: StepAdjustKind,
    },
    StepAdjustSuccess {
        ticket: Ticket,
        step_id: String,
        content: String,
    },
    StepAdjustFailed {
        ticket: Ticket,
        step_id: String,
    },
    StepAdjustClear {
        step_id: String,
    },

    SuggestStart {
        ticket: Ticket,
        ingredient_id: String,
    },
    SuggestSuccess {
        ticket: Ticket,
        ingredient_id: String,
        suggestions: Vec<String>,
    },
    SuggestFailed {
        ticket: Ticket,
        ingredient_id: String,
    },
    SuggestClear {
        ingredient_id: String,
    },

    DeleteIngredient {
        ingredient_id: String,
    },
    ReplaceIngredient {
        ingredient_id: String,
        name: String,
        amount: String,
    },

    SaveRecipe,
    /// Make a saved recipe the active one again.
    OpenSaved {
        recipe_id: String,
    },
    Reset,
}
