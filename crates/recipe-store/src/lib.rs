mod action;
mod reducer;
mod state;
mod store;

pub use action::Action;
pub use reducer::reduce;
pub use state::{AppState, GenerateStatus, PrimaryRequest, StepAdjustment, Ticket};
pub use store::{Intent, RecipeStore, StoreHandle};
