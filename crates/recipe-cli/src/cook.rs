use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use recipe_core::display::text_bar;
use recipe_core::{CookingSession, Recipe};

/// Feeds wall-clock time into the session's countdown between prompts.
struct Ticker {
    last: Instant,
}

impl Ticker {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    fn tick(&mut self, session: &mut CookingSession) {
        let secs = self.last.elapsed().as_secs();
        if secs == 0 {
            return;
        }
        self.last += Duration::from_secs(secs);
        session
            .timer_mut()
            .advance(u32::try_from(secs).unwrap_or(u32::MAX));
    }

    fn restart(&mut self) {
        self.last = Instant::now();
    }
}

pub fn run(recipe: &Recipe) -> Result<()> {
    let Some(mut session) = CookingSession::new(recipe.steps.clone()) else {
        println!("This recipe has no steps to cook.");
        return Ok(());
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut ticker = Ticker::new();

    println!();
    println!("Cooking {} {}", recipe.emoji, recipe.name);
    println!("  n next · p prev · t start/pause timer · r reset timer · enter refresh · q done");
    show(&session);

    loop {
        print!("cook> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        ticker.tick(&mut session);

        match line.trim().to_lowercase().as_str() {
            "" => {}
            "n" | "next" => {
                if session.is_last() {
                    println!("That was the last step. Enjoy your meal!");
                    break;
                }
                session.next();
            }
            "p" | "prev" => session.prev(),
            "t" | "timer" => {
                ticker.restart();
                session.timer_mut().toggle();
            }
            "r" | "reset" => session.timer_mut().reset(),
            "q" | "quit" | "exit" => break,
            other => {
                println!("Unknown: {}", other);
                continue;
            }
        }
        show(&session);
    }

    Ok(())
}

fn show(session: &CookingSession) {
    let step = session.current();
    let timer = session.timer();

    println!();
    println!("Step {}  {}", session.counter(), step.title);
    println!("  {}", step.description);
    if let Some(tips) = &step.tips {
        println!("  Tip: {}", tips);
    }

    let state = if timer.is_done() {
        "done"
    } else if timer.is_running() {
        "running"
    } else if timer.is_untouched() {
        "ready"
    } else {
        "paused"
    };
    println!(
        "  {} {} ({})",
        timer.clock(),
        text_bar(timer.progress() * 100.0, 30),
        state
    );

    if let Some(prev) = session.previous_title() {
        println!("  < {}", prev);
    }
    if let Some(next) = session.next_title() {
        println!("  > {}", next);
    }
    println!();
}
