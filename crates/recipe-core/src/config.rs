use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{RecipeError, Result};

pub const API_BASE_URL_VAR: &str = "RECIPE_API_BASE_URL";
pub const MOCK_DELAY_VAR: &str = "RECIPE_MOCK_DELAY_MS";
pub const MOCK_STEP_DELAY_VAR: &str = "RECIPE_MOCK_STEP_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeConfig {
    /// Remote recipe service. `None` keeps the built-in mock backend.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub mock: MockConfig,
}

impl Default for RecipeConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            mock: MockConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    pub delay_ms: u64,
    pub step_delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1800,
            step_delay_ms: 1000,
        }
    }
}

impl MockConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    Mock(MockConfig),
    Http { base_url: String },
}

impl RecipeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = MockConfig::default();

        let api_base_url = lookup(API_BASE_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let mock = MockConfig {
            delay_ms: parse_millis(&lookup, MOCK_DELAY_VAR, defaults.delay_ms)?,
            step_delay_ms: parse_millis(&lookup, MOCK_STEP_DELAY_VAR, defaults.step_delay_ms)?,
        };

        Ok(Self { api_base_url, mock })
    }

    pub fn backend(&self) -> Backend {
        match &self.api_base_url {
            Some(url) => Backend::Http {
                base_url: url.clone(),
            },
            None => Backend::Mock(self.mock.clone()),
        }
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Result<u64> {
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| RecipeError::Config(format!("{} must be a whole number of milliseconds, got {:?}", key, raw))),
    }
}
