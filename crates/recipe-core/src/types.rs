use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// === Enumerations ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietStyle {
    Japanese,
    Western,
    Chinese,
    Healthy,
    Hearty,
    Diet,
}

impl DietStyle {
    pub const ALL: [DietStyle; 6] = [
        DietStyle::Japanese,
        DietStyle::Western,
        DietStyle::Chinese,
        DietStyle::Healthy,
        DietStyle::Hearty,
        DietStyle::Diet,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CalorieRange {
    Under400,
    #[default]
    Under600,
    Under800,
    Unlimited,
}

impl CalorieRange {
    pub const ALL: [CalorieRange; 4] = [
        CalorieRange::Under400,
        CalorieRange::Under600,
        CalorieRange::Under800,
        CalorieRange::Unlimited,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentType {
    Simpler,
    MoreDetail,
    Healthier,
    Heartier,
    Faster,
    Alternative,
}

impl AdjustmentType {
    /// One-click adjustments offered next to a generated recipe.
    pub const QUICK: [AdjustmentType; 4] = [
        AdjustmentType::Simpler,
        AdjustmentType::Healthier,
        AdjustmentType::Heartier,
        AdjustmentType::Faster,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAdjustKind {
    Detail,
    Simple,
}

/// Relative ingredient cost, 1 (cheap) to 3 (pricey).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct CostLevel(u8);

impl CostLevel {
    pub const LOW: CostLevel = CostLevel(1);
    pub const MEDIUM: CostLevel = CostLevel(2);
    pub const HIGH: CostLevel = CostLevel(3);

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for CostLevel {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1..=3 => Ok(CostLevel(value)),
            other => Err(format!("cost level must be 1-3, got {}", other)),
        }
    }
}

impl From<CostLevel> for u8 {
    fn from(level: CostLevel) -> Self {
        level.0
    }
}

// === Input ===

pub const SERVINGS_MIN: u32 = 1;
pub const SERVINGS_MAX: u32 = 6;
pub const MINUTES_MIN: u32 = 10;
pub const MINUTES_MAX: u32 = 90;
pub const MINUTES_STEP: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    pub query: String,
    pub diet_styles: BTreeSet<DietStyle>,
    pub servings: u32,
    pub max_minutes: u32,
    pub calorie_range: CalorieRange,
    pub skill_level: SkillLevel,
    pub exclude_ingredients: Vec<String>,
}

impl Default for RecipeInput {
    fn default() -> Self {
        Self {
            query: String::new(),
            diet_styles: BTreeSet::new(),
            servings: 2,
            max_minutes: 30,
            calorie_range: CalorieRange::default(),
            skill_level: SkillLevel::default(),
            exclude_ingredients: Vec::new(),
        }
    }
}

impl RecipeInput {
    /// Snap servings and time budget onto the ranges the input surface offers.
    pub fn clamped(mut self) -> Self {
        self.servings = self.servings.clamp(SERVINGS_MIN, SERVINGS_MAX);
        let minutes = self.max_minutes.clamp(MINUTES_MIN, MINUTES_MAX);
        self.max_minutes = (minutes / MINUTES_STEP) * MINUTES_STEP;
        self
    }
}

/// Partial update for [`RecipeInput`]; `None` fields leave the current value alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeInputPatch {
    pub query: Option<String>,
    pub diet_styles: Option<BTreeSet<DietStyle>>,
    pub servings: Option<u32>,
    pub max_minutes: Option<u32>,
    pub calorie_range: Option<CalorieRange>,
    pub skill_level: Option<SkillLevel>,
    pub exclude_ingredients: Option<Vec<String>>,
}

impl RecipeInputPatch {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn apply_to(self, input: &mut RecipeInput) {
        if let Some(query) = self.query {
            input.query = query;
        }
        if let Some(styles) = self.diet_styles {
            input.diet_styles = styles;
        }
        if let Some(servings) = self.servings {
            input.servings = servings;
        }
        if let Some(minutes) = self.max_minutes {
            input.max_minutes = minutes;
        }
        if let Some(range) = self.calorie_range {
            input.calorie_range = range;
        }
        if let Some(level) = self.skill_level {
            input.skill_level = level;
        }
        if let Some(excluded) = self.exclude_ingredients {
            input.exclude_ingredients = excluded;
        }
    }
}

// === Recipe output ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub amount: String,
    /// 0..=1, only used to draw the proportion bar.
    pub ratio: f32,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substitutes: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeStep {
    pub id: String,
    pub number: u32,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat_max: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub description: String,
    pub servings: u32,
    pub total_minutes: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub diet_styles: Vec<DietStyle>,
    pub ingredients: Vec<Ingredient>,
    pub steps: Vec<RecipeStep>,
    pub nutrition: NutritionInfo,
    #[serde(default)]
    pub ai_comment: String,
    pub cost_level: CostLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn step(&self, step_id: &str) -> Option<&RecipeStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn ingredient(&self, ingredient_id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == ingredient_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut input = RecipeInput::default();
        RecipeInputPatch {
            servings: Some(4),
            ..Default::default()
        }
        .apply_to(&mut input);
        RecipeInputPatch::query("miso soup").apply_to(&mut input);

        assert_eq!(input.query, "miso soup");
        assert_eq!(input.servings, 4);
        assert_eq!(input.max_minutes, 30);
        assert_eq!(input.calorie_range, CalorieRange::Under600);
    }

    #[test]
    fn test_clamped_snaps_to_input_ranges() {
        let input = RecipeInput {
            servings: 0,
            max_minutes: 93,
            ..Default::default()
        }
        .clamped();
        assert_eq!(input.servings, 1);
        assert_eq!(input.max_minutes, 90);

        let input = RecipeInput {
            servings: 12,
            max_minutes: 27,
            ..Default::default()
        }
        .clamped();
        assert_eq!(input.servings, 6);
        assert_eq!(input.max_minutes, 25);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let input = RecipeInput {
            diet_styles: [DietStyle::Healthy].into_iter().collect(),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["maxMinutes"], 30);
        assert_eq!(json["calorieRange"], "under600");
        assert_eq!(json["dietStyles"][0], "healthy");
        assert_eq!(
            serde_json::to_value(AdjustmentType::MoreDetail).unwrap(),
            "moreDetail"
        );
    }

    #[test]
    fn test_cost_level_rejects_out_of_range() {
        assert!(serde_json::from_str::<CostLevel>("2").is_ok());
        assert!(serde_json::from_str::<CostLevel>("0").is_err());
        assert!(serde_json::from_str::<CostLevel>("4").is_err());
    }

    #[test]
    fn test_optional_ingredient_fields_default() {
        let ing: Ingredient =
            serde_json::from_str(r#"{"id":"i1","name":"leek","amount":"1","ratio":0.5}"#).unwrap();
        assert!(!ing.optional);
        assert!(ing.substitutes.is_none());
    }
}
