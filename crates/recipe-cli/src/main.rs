mod commands;
mod cook;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use recipe_core::{RecipeConfig, RecipeInput, RecipeInputPatch};
use recipe_service::build_service;
use recipe_store::{AppState, GenerateStatus, RecipeStore, StoreHandle};
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Command;

#[derive(Parser)]
#[command(name = "recipe")]
#[command(about = "Recipe assistant - generate, tweak and cook recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one recipe and print it
    Generate {
        /// What you feel like eating (may be left empty)
        #[arg(short, long, default_value = "")]
        query: String,

        /// Number of servings (1-6)
        #[arg(short, long, default_value = "2")]
        servings: u32,

        /// Time budget in minutes (10-90)
        #[arg(short, long, default_value = "30")]
        minutes: u32,

        /// Print the recipe as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a recipe and walk through it step by step
    Cook {
        /// What you feel like eating (may be left empty)
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let cli = Cli::parse();
    let config = RecipeConfig::from_env()?;
    let store = RecipeStore::spawn(build_service(&config));

    match cli.command {
        Some(Commands::Generate {
            query,
            servings,
            minutes,
            json,
        }) => cmd_generate(&store, query, servings, minutes, json).await?,
        Some(Commands::Cook { query }) => cmd_cook(&store, query).await?,
        None => run_interactive(&store).await?,
    }

    Ok(())
}

async fn generate_once(store: &StoreHandle, input: RecipeInput) -> Result<AppState> {
    store
        .set_input(RecipeInputPatch {
            query: Some(input.query),
            servings: Some(input.servings),
            max_minutes: Some(input.max_minutes),
            ..Default::default()
        })
        .await?;
    store.generate().await?;
    let state = store.settled().await?;

    if state.status == GenerateStatus::Error {
        bail!(state.error.unwrap_or_else(|| "generation failed".into()));
    }
    Ok(state)
}

async fn cmd_generate(
    store: &StoreHandle,
    query: String,
    servings: u32,
    minutes: u32,
    json: bool,
) -> Result<()> {
    let input = RecipeInput {
        query,
        servings,
        max_minutes: minutes,
        ..Default::default()
    }
    .clamped();

    let state = generate_once(store, input).await?;
    let Some(recipe) = &state.recipe else {
        bail!("no recipe returned");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
        return Ok(());
    }
    render::recipe(recipe, &state);
    Ok(())
}

async fn cmd_cook(store: &StoreHandle, query: String) -> Result<()> {
    let input = RecipeInput {
        query,
        ..Default::default()
    };
    let state = generate_once(store, input).await?;
    if let Some(recipe) = &state.recipe {
        render::recipe(recipe, &state);
        cook::run(recipe)?;
    }
    Ok(())
}

async fn run_interactive(store: &StoreHandle) -> Result<()> {
    render::welcome();
    render::input(&store.snapshot().input);
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        if command == Command::Quit {
            println!("  Goodbye!");
            break;
        }
        if let Err(e) = execute(store, command).await {
            println!("Error: {}", e);
        }
    }

    info!("CLI: Leaving interactive mode");
    Ok(())
}

async fn execute(store: &StoreHandle, command: Command) -> Result<()> {
    let state = store.snapshot();

    match command {
        Command::Query(query) => return set_input(store, RecipeInputPatch::query(query)).await,
        Command::Servings(n) => {
            let input = RecipeInput {
                servings: n,
                ..state.input
            }
            .clamped();
            return set_input(
                store,
                RecipeInputPatch {
                    servings: Some(input.servings),
                    ..Default::default()
                },
            )
            .await;
        }
        Command::Minutes(n) => {
            let input = RecipeInput {
                max_minutes: n,
                ..state.input
            }
            .clamped();
            return set_input(
                store,
                RecipeInputPatch {
                    max_minutes: Some(input.max_minutes),
                    ..Default::default()
                },
            )
            .await;
        }
        Command::Calories(range) => {
            return set_input(
                store,
                RecipeInputPatch {
                    calorie_range: Some(range),
                    ..Default::default()
                },
            )
            .await
        }
        Command::Diet(styles) => {
            let mut current = state.input.diet_styles;
            for style in styles {
                if !current.remove(&style) {
                    current.insert(style);
                }
            }
            return set_input(
                store,
                RecipeInputPatch {
                    diet_styles: Some(current),
                    ..Default::default()
                },
            )
            .await;
        }
        Command::Skill(level) => {
            return set_input(
                store,
                RecipeInputPatch {
                    skill_level: Some(level),
                    ..Default::default()
                },
            )
            .await
        }
        Command::Exclude(items) => {
            return set_input(
                store,
                RecipeInputPatch {
                    exclude_ingredients: Some(items),
                    ..Default::default()
                },
            )
            .await
        }

        Command::Generate => {
            println!("Cooking up a recipe…");
            store.generate().await?;
        }
        Command::Adjust(adjustment) => {
            if state.recipe.is_none() {
                println!("Generate a recipe first.");
                return Ok(());
            }
            println!("{}…", adjustment.label());
            store.adjust(adjustment).await?;
        }
        Command::Apply => {
            if !state.ingredient_edited {
                println!("No ingredient changes to apply.");
                return Ok(());
            }
            println!("Reworking the recipe…");
            store.adjust_by_ingredients().await?;
        }
        Command::Retry => {
            if state.status != GenerateStatus::Error {
                println!("Nothing to retry.");
                return Ok(());
            }
            store.retry().await?;
        }
        Command::Step { step, kind } => {
            let step_id = resolve_step(&state, &step).unwrap_or(step);
            store.adjust_step(step_id, kind).await?;
        }
        Command::Delete(id) => store.delete_ingredient(id).await?,
        Command::Suggest(id) => {
            let Some(name) = ingredient_field(&state, &id, |i| i.name.clone()) else {
                println!("No ingredient {}.", id);
                return Ok(());
            };
            store.suggest_alternatives(id, name).await?;
        }
        Command::Replace {
            ingredient,
            name,
            amount,
        } => {
            let Some(current) = ingredient_field(&state, &ingredient, |i| i.amount.clone()) else {
                println!("No ingredient {}.", ingredient);
                return Ok(());
            };
            store
                .replace_ingredient(ingredient, name, amount.unwrap_or(current))
                .await?;
        }
        Command::Save => {
            if state.recipe.is_none() {
                println!("Nothing to save.");
                return Ok(());
            }
            store.save().await?;
            println!("Saved.");
            return Ok(());
        }
        Command::Saved => {
            render::saved(&state);
            return Ok(());
        }
        Command::Open(n) => {
            let Some(recipe_id) = state.saved_recipes.get(n - 1).map(|r| r.id.clone()) else {
                println!("No saved recipe {}.", n);
                return Ok(());
            };
            store.open_saved(recipe_id).await?;
        }
        Command::Cook => {
            match &state.recipe {
                Some(recipe) => cook::run(recipe)?,
                None => println!("Generate a recipe first."),
            }
            return Ok(());
        }
        Command::Reset => {
            store.reset().await?;
            render::input(&store.snapshot().input);
            return Ok(());
        }
        Command::Show => {
            render::input(&state.input);
            render::state(&state);
            return Ok(());
        }
        Command::Json => {
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(());
        }
        Command::Help => {
            render::help();
            return Ok(());
        }
        Command::Clear => {
            print!("\x1B[2J\x1B[1;1H");
            io::stdout().flush()?;
            return Ok(());
        }
        Command::Quit => return Ok(()),
    }

    let state = store.settled().await?;
    render::state(&state);
    Ok(())
}

async fn set_input(store: &StoreHandle, patch: RecipeInputPatch) -> Result<()> {
    store.set_input(patch).await?;
    render::input(&store.snapshot().input);
    Ok(())
}

/// Accept either a step id (`s2`) or its printed number (`2`).
fn resolve_step(state: &AppState, raw: &str) -> Option<String> {
    let number: u32 = raw.parse().ok()?;
    state
        .recipe
        .as_ref()?
        .steps
        .iter()
        .find(|s| s.number == number)
        .map(|s| s.id.clone())
}

fn ingredient_field(
    state: &AppState,
    id: &str,
    field: impl Fn(&recipe_core::Ingredient) -> String,
) -> Option<String> {
    state.recipe.as_ref()?.ingredient(id).map(field)
}
