use chrono::Utc;
use recipe_core::{
    CostLevel, DietStyle, Difficulty, Ingredient, NutritionInfo, Recipe, RecipeStep,
};

pub const FIXTURE_RECIPE_ID: &str = "mock-001";

pub const STEP_DETAIL_TEXT: &str = "How to sear the chicken: preheat the pan over medium heat for a minute before adding the oil. \
Keep the garlic moving for about 30 seconds so it does not scorch. Lay the chicken skin side down and leave it untouched \
for two minutes for a crisp skin, then flip, give it one more minute and set it aside.";

pub const STEP_SIMPLE_TEXT: &str = "Use a 400 g can of chopped tomatoes and skip prepping fresh ones: open it and pour it in. \
Garlic from a tube works fine too.";

fn ingredient(id: &str, name: &str, amount: &str, ratio: f32) -> Ingredient {
    Ingredient {
        id: id.into(),
        name: name.into(),
        amount: amount.into(),
        ratio,
        optional: false,
        substitutes: None,
    }
}

fn step(id: &str, number: u32, title: &str, minutes: u32, description: &str, tips: Option<&str>) -> RecipeStep {
    RecipeStep {
        id: id.into(),
        number,
        title: title.into(),
        description: description.into(),
        duration_minutes: minutes,
        tips: tips.map(str::to_string),
    }
}

/// The stand-in recipe every mock generation returns.
pub fn fixture_recipe() -> Recipe {
    Recipe {
        id: FIXTURE_RECIPE_ID.into(),
        name: "Chicken & Tomato Basil Stew".into(),
        emoji: "🍗".into(),
        description: "Tangy tomato and savoury chicken melt together in a simple, deep-flavoured dish.".into(),
        servings: 2,
        total_minutes: 28,
        difficulty: Difficulty::Easy,
        diet_styles: vec![DietStyle::Western, DietStyle::Healthy],
        ingredients: vec![
            ingredient("i1", "chicken thigh", "300g", 0.8),
            ingredient("i2", "tomato (medium)", "2", 0.6),
            ingredient("i3", "garlic", "2 cloves", 0.3),
            Ingredient {
                optional: true,
                ..ingredient("i4", "basil", "to taste", 0.2)
            },
            ingredient("i5", "olive oil", "2 tbsp", 0.25),
            ingredient("i6", "salt & pepper", "a pinch", 0.1),
        ],
        steps: vec![
            step(
                "s1",
                1,
                "Prep",
                3,
                "Cut the chicken into bite-sized pieces and season with salt and pepper. Roughly chop the tomatoes and mince the garlic.",
                Some("Let the chicken come to room temperature so it cooks evenly."),
            ),
            step(
                "s2",
                2,
                "Sear the chicken",
                8,
                "Warm the olive oil and garlic over medium heat until fragrant. Add the chicken skin side down and brown both sides.",
                Some("Press the skin flat against the pan for a crisp finish."),
            ),
            step(
                "s3",
                3,
                "Simmer with tomato",
                15,
                "Add the tomatoes, cover and simmer on low for 15 minutes. Stir once halfway and adjust the salt as the liquid reduces.",
                Some("Simmering too long toughens the chicken."),
            ),
            step(
                "s4",
                4,
                "Finish and plate",
                2,
                "Turn off the heat and tear the basil over the top. Serve over rice or with a baguette and a drizzle of olive oil.",
                None,
            ),
        ],
        nutrition: NutritionInfo {
            calories: 512.0,
            protein: 34.0,
            carbs: 18.0,
            fat: 26.0,
            calorie_max: Some(800.0),
            protein_max: Some(50.0),
            carbs_max: Some(60.0),
            fat_max: Some(50.0),
        },
        ai_comment: "This pairing is a Mediterranean classic. Resting it off the heat for a few minutes keeps the chicken tender, \
and leftovers make a great pasta sauce the next day."
            .into(),
        cost_level: CostLevel::LOW,
        image_url: None,
        created_at: Utc::now(),
    }
}

/// Canned substitutes keyed by lower-cased ingredient name.
pub fn substitutes_for(ingredient_name: &str) -> Vec<String> {
    let options: &[&str] = match ingredient_name.trim().to_lowercase().as_str() {
        "chicken thigh" => &["chicken breast", "pork shoulder", "firm tofu"],
        "tomato (medium)" | "tomato" => &["canned chopped tomatoes", "cherry tomatoes", "tomato paste"],
        "garlic" => &["garlic paste", "shallot", "garlic powder"],
        "basil" => &["parsley", "oregano", "shiso"],
        "olive oil" => &["vegetable oil", "butter"],
        "salt & pepper" => &["soy sauce", "herb salt"],
        _ => &[],
    };
    options.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_steps_are_numbered_contiguously() {
        let recipe = fixture_recipe();
        for (i, step) in recipe.steps.iter().enumerate() {
            assert_eq!(step.number as usize, i + 1);
        }
        assert!(recipe.ingredient("i4").unwrap().optional);
    }

    #[test]
    fn test_substitute_lookup_ignores_case() {
        assert_eq!(substitutes_for("Chicken Thigh").len(), 3);
        assert!(substitutes_for("saffron").is_empty());
    }
}
