//! Presentation-boundary helpers: labels and bar math. Defaults for missing
//! nutrition maxima are resolved here, never written back into the recipe.

use crate::{AdjustmentType, CalorieRange, DietStyle, Difficulty, Ingredient, NutritionInfo, StepAdjustKind};

pub const DEFAULT_CALORIE_MAX: f64 = 800.0;
pub const DEFAULT_PROTEIN_MAX: f64 = 50.0;
pub const DEFAULT_CARBS_MAX: f64 = 60.0;
pub const DEFAULT_FAT_MAX: f64 = 50.0;

impl DietStyle {
    pub fn label(self) -> &'static str {
        match self {
            DietStyle::Japanese => "Japanese",
            DietStyle::Western => "Western",
            DietStyle::Chinese => "Chinese",
            DietStyle::Healthy => "Healthy",
            DietStyle::Hearty => "Hearty",
            DietStyle::Diet => "Diet",
        }
    }
}

impl CalorieRange {
    pub fn label(self) -> &'static str {
        match self {
            CalorieRange::Under400 => "up to 400 kcal",
            CalorieRange::Under600 => "up to 600 kcal",
            CalorieRange::Under800 => "up to 800 kcal",
            CalorieRange::Unlimited => "no limit",
        }
    }
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl AdjustmentType {
    pub fn label(self) -> &'static str {
        match self {
            AdjustmentType::Simpler => "Make it simpler",
            AdjustmentType::MoreDetail => "More detail",
            AdjustmentType::Healthier => "Make it healthier",
            AdjustmentType::Heartier => "Make it heartier",
            AdjustmentType::Faster => "Quick version",
            AdjustmentType::Alternative => "Something different",
        }
    }
}

impl StepAdjustKind {
    pub fn label(self) -> &'static str {
        match self {
            StepAdjustKind::Detail => "In detail",
            StepAdjustKind::Simple => "Made simple",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NutritionRow {
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub max: f64,
}

impl NutritionRow {
    /// Bar fill in percent, capped at 100.
    pub fn percent(&self) -> f64 {
        if self.max <= 0.0 {
            return 100.0;
        }
        (self.value / self.max * 100.0).clamp(0.0, 100.0)
    }
}

impl NutritionInfo {
    pub fn rows(&self) -> [NutritionRow; 4] {
        [
            NutritionRow {
                label: "Calories",
                value: self.calories,
                unit: "kcal",
                max: self.calorie_max.unwrap_or(DEFAULT_CALORIE_MAX),
            },
            NutritionRow {
                label: "Protein",
                value: self.protein,
                unit: "g",
                max: self.protein_max.unwrap_or(DEFAULT_PROTEIN_MAX),
            },
            NutritionRow {
                label: "Carbs",
                value: self.carbs,
                unit: "g",
                max: self.carbs_max.unwrap_or(DEFAULT_CARBS_MAX),
            },
            NutritionRow {
                label: "Fat",
                value: self.fat,
                unit: "g",
                max: self.fat_max.unwrap_or(DEFAULT_FAT_MAX),
            },
        ]
    }
}

impl Ingredient {
    pub fn ratio_percent(&self) -> f64 {
        (f64::from(self.ratio) * 100.0).clamp(0.0, 100.0)
    }
}

/// Render a fixed-width text bar, e.g. `[#####     ]` for 50% at width 10.
pub fn text_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), " ".repeat(width - filled))
}
