//! Guided cooking walkthrough: one step at a time with a per-step countdown.

use crate::RecipeStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    initial_secs: u32,
    remaining_secs: u32,
    running: bool,
}

impl Countdown {
    pub fn new(initial_secs: u32) -> Self {
        Self {
            initial_secs,
            remaining_secs: initial_secs,
            running: false,
        }
    }

    pub fn for_step(step: &RecipeStep) -> Self {
        Self::new(step.duration_minutes.saturating_mul(60))
    }

    pub fn toggle(&mut self) {
        if self.remaining_secs == 0 {
            self.running = false;
            return;
        }
        self.running = !self.running;
    }

    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.initial_secs;
    }

    /// Count down by `secs` if running. Stops on reaching zero.
    pub fn advance(&mut self, secs: u32) {
        if !self.running {
            return;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        if self.remaining_secs == 0 {
            self.running = false;
        }
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_done(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn is_untouched(&self) -> bool {
        !self.running && self.remaining_secs == self.initial_secs
    }

    /// Elapsed share of the countdown, 0.0..=1.0.
    pub fn progress(&self) -> f64 {
        if self.initial_secs == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.remaining_secs) / f64::from(self.initial_secs)
    }

    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone)]
pub struct CookingSession {
    steps: Vec<RecipeStep>,
    current: usize,
    timer: Countdown,
}

impl CookingSession {
    /// `None` when there is nothing to cook.
    pub fn new(steps: Vec<RecipeStep>) -> Option<Self> {
        let timer = Countdown::for_step(steps.first()?);
        Some(Self {
            steps,
            current: 0,
            timer,
        })
    }

    pub fn current(&self) -> &RecipeStep {
        &self.steps[self.current]
    }

    pub fn index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    pub fn previous_title(&self) -> Option<&str> {
        self.current
            .checked_sub(1)
            .map(|i| self.steps[i].title.as_str())
    }

    pub fn next_title(&self) -> Option<&str> {
        self.steps.get(self.current + 1).map(|s| s.title.as_str())
    }

    /// "02/04"
    pub fn counter(&self) -> String {
        format!("{:02}/{:02}", self.current + 1, self.steps.len())
    }

    pub fn next(&mut self) {
        self.go_to((self.current + 1).min(self.steps.len() - 1));
    }

    pub fn prev(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    fn go_to(&mut self, index: usize) {
        if index != self.current {
            self.current = index;
            self.timer = Countdown::for_step(&self.steps[index]);
        }
    }

    pub fn timer(&self) -> &Countdown {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut Countdown {
        &mut self.timer
    }
}
