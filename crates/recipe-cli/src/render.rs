use recipe_core::display::text_bar;
use recipe_core::{AdjustmentType, Recipe, RecipeInput};
use recipe_store::{AppState, GenerateStatus};

const BAR_WIDTH: usize = 20;

pub fn welcome() {
    println!();
    println!("  ┌─┐┌─┐┌─┐┬┌─┐┌─┐");
    println!("  ├┬┘├┤ │  │├─┘├┤ ");
    println!("  ┴└─└─┘└─┘┴┴  └─┘");
    println!();
    println!("  Tell it what you feel like eating, then `generate`.");
    println!("  Type `help` for every command.");
    println!();
}

pub fn help() {
    println!();
    println!("Input:");
    println!("  query <text>             What you feel like eating");
    println!("  servings <1-6>           Number of servings");
    println!("  minutes <10-90>          Time budget (steps of 5)");
    println!("  calories <400|600|800|none>");
    println!("  diet <style...>          Toggle japanese, western, chinese, healthy, hearty, diet");
    println!("  skill <level>            beginner, intermediate, advanced");
    println!("  exclude <a, b, ...>      Ingredients to avoid (empty clears)");
    println!();
    println!("Recipe:");
    println!("  generate, g              Generate a recipe from the input");
    println!("  adjust <type>            simpler, moreDetail, healthier, heartier, faster, alternative");
    println!("  step <n|id> <mode>       Explain a step in detail or simply (repeat to collapse)");
    println!("  suggest <id>             Toggle substitutes for an ingredient");
    println!("  replace <id> <name>[, <amount>]");
    println!("  delete <id>              Remove an ingredient");
    println!("  apply                    Rework the recipe around the edited ingredients");
    println!("  retry                    Re-run the last failed request");
    println!();
    println!("Other:");
    println!("  save / saved             Save the recipe / list saved recipes");
    println!("  open <n>                 Make saved recipe n the active one");
    println!("  cook                     Step-by-step cooking mode with timers");
    println!("  show, s                  Show the current recipe");
    println!("  json                     Dump the current state as JSON");
    println!("  reset                    Start over");
    println!("  clear, cls               Clear the screen");
    println!("  exit, quit, q            Leave");
    println!();
}

pub fn input(input: &RecipeInput) {
    let styles: Vec<&str> = input.diet_styles.iter().map(|d| d.label()).collect();
    println!("Input:");
    println!("  Query:     {}", or_dash(&input.query));
    println!("  Servings:  {}", input.servings);
    println!("  Time:      {} min", input.max_minutes);
    println!("  Calories:  {}", input.calorie_range.label());
    println!("  Diet:      {}", or_dash(&styles.join(", ")));
    println!("  Skill:     {:?}", input.skill_level);
    println!("  Exclude:   {}", or_dash(&input.exclude_ingredients.join(", ")));
}

pub fn state(state: &AppState) {
    match state.status {
        GenerateStatus::Error => error_banner(state),
        GenerateStatus::Loading => println!("  … working on it"),
        GenerateStatus::Idle | GenerateStatus::Success => {}
    }
    match &state.recipe {
        Some(recipe) => self::recipe(recipe, state),
        None if state.status != GenerateStatus::Loading => {
            println!("No recipe yet. Type `generate` to get one.")
        }
        None => {}
    }
}

pub fn error_banner(state: &AppState) {
    let message = state.error.as_deref().unwrap_or("Something went wrong");
    println!();
    println!("  ! {}", message);
    if state.last_request.is_some() {
        println!("  ! Type `retry` to try again.");
    }
    println!();
}

pub fn recipe(recipe: &Recipe, state: &AppState) {
    let saved = if state.is_saved(&recipe.id) { "  [saved]" } else { "" };
    let cost = "$".repeat(usize::from(recipe.cost_level.value()));

    println!();
    println!("{} {}{}", recipe.emoji, recipe.name, saved);
    println!("{:-<60}", "");
    if !recipe.description.is_empty() {
        println!("{}", recipe.description);
    }
    println!(
        "  {} servings · {} min · {} · {}",
        recipe.servings,
        recipe.total_minutes,
        recipe.difficulty.label(),
        cost
    );
    if !recipe.diet_styles.is_empty() {
        let tags: Vec<&str> = recipe.diet_styles.iter().map(|d| d.label()).collect();
        println!("  {}", tags.join(" · "));
    }

    println!();
    println!("Nutrition (per serving):");
    for row in recipe.nutrition.rows() {
        println!(
            "  {:<9} {} {:>6.0} {}",
            row.label,
            text_bar(row.percent(), BAR_WIDTH),
            row.value,
            row.unit
        );
    }

    println!();
    println!("Ingredients:");
    for ing in &recipe.ingredients {
        let optional = if ing.optional { " (optional)" } else { "" };
        println!(
            "  {:<4} {:<24} {:<12} {}{}",
            ing.id,
            ing.name,
            ing.amount,
            text_bar(ing.ratio_percent(), 10),
            optional
        );
        if state.is_suggesting(&ing.id) {
            println!("         looking for substitutes…");
        }
        if let Some(suggestions) = state.suggestions_for(&ing.id) {
            if suggestions.is_empty() {
                println!("         no substitutes found");
            } else {
                println!("         try: {}", suggestions.join(", "));
            }
        }
    }
    if state.ingredient_edited {
        println!("  * Ingredients changed. Type `apply` to rework the steps.");
    }

    println!();
    println!("Steps:");
    for step in &recipe.steps {
        println!(
            "  {}. {} ({} min)  [{}]",
            step.number, step.title, step.duration_minutes, step.id
        );
        println!("     {}", step.description);
        if let Some(tips) = &step.tips {
            println!("     Tip: {}", tips);
        }
        if let Some(adj) = state.step_adjustment(&step.id) {
            if adj.loading {
                println!("     {}: …", adj.kind.label());
            } else {
                println!("     {}: {}", adj.kind.label(), adj.content);
            }
        }
    }

    if !recipe.ai_comment.is_empty() {
        println!();
        println!("  \"{}\"", recipe.ai_comment);
    }

    println!();
    let quick: Vec<String> = AdjustmentType::QUICK
        .iter()
        .map(|a| format!("{} (`adjust {}`)", a.label(), wire_name(*a)))
        .collect();
    println!("  {}", quick.join(" · "));
    println!();
}

pub fn saved(state: &AppState) {
    if state.saved_recipes.is_empty() {
        println!("Nothing saved yet.");
        return;
    }
    println!();
    println!("Saved recipes:");
    for (i, r) in state.saved_recipes.iter().enumerate() {
        println!(
            "  {:<3} {} {:<36} {}",
            i + 1,
            r.emoji,
            r.name,
            r.created_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!();
}

fn wire_name(adjustment: AdjustmentType) -> String {
    serde_json::to_value(adjustment)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}
