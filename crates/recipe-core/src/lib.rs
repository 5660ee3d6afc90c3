pub mod config;
pub mod cooking;
pub mod display;
pub mod error;
pub mod id;
pub mod service;
pub mod types;

pub use config::{Backend, MockConfig, RecipeConfig};
pub use cooking::{format_clock, CookingSession, Countdown};
pub use display::NutritionRow;
pub use error::{RecipeError, Result};
pub use id::mint_recipe_id;
pub use service::RecipeService;
pub use types::*;
