use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

use crate::Recipe;

static LAST_MINTED: AtomicI64 = AtomicI64::new(0);

/// Mint a `recipe-<unix millis>` id. Ids are strictly increasing within the
/// process, so two recipes stamped in the same millisecond still differ.
pub fn mint_recipe_id(now: DateTime<Utc>) -> String {
    let millis = now.timestamp_millis();
    let mut prev = LAST_MINTED.load(Ordering::Relaxed);
    loop {
        let next = millis.max(prev + 1);
        match LAST_MINTED.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return format!("recipe-{}", next),
            Err(actual) => prev = actual,
        }
    }
}

impl Recipe {
    /// Give the recipe a new identity: fresh id and creation time.
    pub fn freshened(mut self) -> Self {
        let now = Utc::now();
        self.id = mint_recipe_id(now);
        self.created_at = now;
        self
    }
}
