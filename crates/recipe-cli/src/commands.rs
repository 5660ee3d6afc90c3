use recipe_core::{AdjustmentType, CalorieRange, DietStyle, SkillLevel, StepAdjustKind};
use serde::de::DeserializeOwned;

/// One line of REPL input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Query(String),
    Servings(u32),
    Minutes(u32),
    Calories(CalorieRange),
    Diet(Vec<DietStyle>),
    Skill(SkillLevel),
    Exclude(Vec<String>),
    Generate,
    Adjust(AdjustmentType),
    Apply,
    Step { step: String, kind: StepAdjustKind },
    Delete(String),
    Suggest(String),
    Replace {
        ingredient: String,
        name: String,
        amount: Option<String>,
    },
    Save,
    Saved,
    /// 1-based position in the saved list.
    Open(usize),
    Cook,
    Retry,
    Reset,
    Show,
    Json,
    Help,
    Clear,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match head.to_lowercase().as_str() {
            "query" => {
                if rest.is_empty() {
                    return Err("Usage: query <what you feel like eating>".into());
                }
                Command::Query(rest.to_string())
            }
            "servings" => Command::Servings(number(&args, "servings <1-6>")?),
            "minutes" | "time" => Command::Minutes(number(&args, "minutes <10-90>")?),
            "calories" | "kcal" => {
                let arg = args.first().ok_or("Usage: calories <400|600|800|none>")?;
                Command::Calories(calorie_range(arg)?)
            }
            "diet" => {
                let styles = args
                    .iter()
                    .map(|a| wire::<DietStyle>(a).ok_or_else(|| unknown("diet style", a)))
                    .collect::<Result<Vec<_>, _>>()?;
                Command::Diet(styles)
            }
            "skill" => {
                let arg = args.first().ok_or("Usage: skill <beginner|intermediate|advanced>")?;
                Command::Skill(wire(arg).ok_or_else(|| unknown("skill level", arg))?)
            }
            "exclude" => Command::Exclude(
                rest.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            "generate" | "gen" | "g" => Command::Generate,
            "adjust" | "a" => {
                let arg = args
                    .first()
                    .ok_or("Usage: adjust <simpler|moreDetail|healthier|heartier|faster|alternative>")?;
                Command::Adjust(wire(arg).ok_or_else(|| unknown("adjustment", arg))?)
            }
            "apply" => Command::Apply,
            "step" => {
                let (step, kind) = match args.as_slice() {
                    [step, kind] => (*step, *kind),
                    _ => return Err("Usage: step <number|id> <detail|simple>".into()),
                };
                Command::Step {
                    step: step.to_string(),
                    kind: wire(kind).ok_or_else(|| unknown("step mode", kind))?,
                }
            }
            "delete" | "del" => Command::Delete(id(&args, "delete <ingredient id>")?),
            "suggest" => Command::Suggest(id(&args, "suggest <ingredient id>")?),
            "replace" => {
                let usage = "Usage: replace <ingredient id> <new name>[, <amount>]";
                let (ingredient, tail) = rest.split_once(char::is_whitespace).ok_or(usage)?;
                let (name, amount) = match tail.split_once(',') {
                    Some((name, amount)) => (name.trim(), Some(amount.trim().to_string())),
                    None => (tail.trim(), None),
                };
                if name.is_empty() {
                    return Err(usage.into());
                }
                Command::Replace {
                    ingredient: ingredient.to_string(),
                    name: name.to_string(),
                    amount: amount.filter(|a| !a.is_empty()),
                }
            }
            "save" => Command::Save,
            "saved" => Command::Saved,
            "open" => match number(&args, "open <n from saved>")? {
                0 => return Err("Usage: open <n from saved>".into()),
                n => Command::Open(n as usize),
            },
            "cook" => Command::Cook,
            "retry" => Command::Retry,
            "reset" => Command::Reset,
            "show" | "s" => Command::Show,
            "json" => Command::Json,
            "help" | "h" | "?" => Command::Help,
            "clear" | "cls" => Command::Clear,
            "exit" | "quit" | "q" => Command::Quit,
            other => {
                return Err(format!(
                    "Unknown command: {}. Type 'help' for available commands.",
                    other
                ))
            }
        };
        Ok(command)
    }
}

/// Parse a value by its wire name, e.g. `moreDetail` or `healthy`.
fn wire<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string())).ok()
}

fn calorie_range(raw: &str) -> Result<CalorieRange, String> {
    match raw.to_lowercase().as_str() {
        "400" => Ok(CalorieRange::Under400),
        "600" => Ok(CalorieRange::Under600),
        "800" => Ok(CalorieRange::Under800),
        "none" | "any" | "unlimited" => Ok(CalorieRange::Unlimited),
        _ => wire(raw).ok_or_else(|| unknown("calorie range", raw)),
    }
}

fn number(args: &[&str], usage: &str) -> Result<u32, String> {
    args.first()
        .and_then(|a| a.parse().ok())
        .ok_or_else(|| format!("Usage: {}", usage))
}

fn id(args: &[&str], usage: &str) -> Result<String, String> {
    args.first()
        .map(|a| a.to_string())
        .ok_or_else(|| format!("Usage: {}", usage))
}

fn unknown(what: &str, raw: &str) -> String {
    format!("Unknown {}: {}", what, raw)
}
