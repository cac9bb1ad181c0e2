//! Batch loop configuration parsing from environment variables.
//!
//! Defaults reproduce the original demo constants, so a run with no
//! environment set behaves identically.

use anyhow::Result;
use std::env;

use super::parse_var;

/// Batch environment configuration
#[derive(Debug, Clone)]
pub struct BatchEnvConfig {
    pub label: String,
    pub iterations: usize,
    pub sql_delay_max_ms: u64,
    pub api_delay_max_ms: u64,
    pub settle_delay_max_ms: u64,
}

impl Default for BatchEnvConfig {
    fn default() -> Self {
        Self {
            label: "eft".to_string(),
            iterations: 40,
            sql_delay_max_ms: 10_000,
            api_delay_max_ms: 1_000,
            settle_delay_max_ms: 2_000,
        }
    }
}

impl BatchEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            label: env::var("BATCH_LABEL").unwrap_or(defaults.label),
            iterations: parse_var("BATCH_ITERATIONS", defaults.iterations)?,
            sql_delay_max_ms: parse_var("SQL_DELAY_MAX_MS", defaults.sql_delay_max_ms)?,
            api_delay_max_ms: parse_var("API_DELAY_MAX_MS", defaults.api_delay_max_ms)?,
            settle_delay_max_ms: parse_var("SETTLE_DELAY_MAX_MS", defaults.settle_delay_max_ms)?,
        })
    }
}
