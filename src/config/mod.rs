//! Configuration module for etlsim.
//!
//! This module provides structured configuration loading from environment
//! variables, organized by concern: Batch and Push.

mod batch_config;
mod push_config;

pub use batch_config::BatchEnvConfig;
pub use push_config::PushEnvConfig;

use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Main application configuration.
///
/// This struct aggregates all configuration from sub-modules and provides
/// flat field access for the rest of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // Batch (from BatchEnvConfig)
    pub batch_label: String,
    pub iterations: usize,
    pub sql_delay_max_ms: u64,
    pub api_delay_max_ms: u64,
    pub settle_delay_max_ms: u64,

    // Push (from PushEnvConfig)
    pub pushgateway_url: String,
    pub push_job: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let batch = BatchEnvConfig::from_env().context("Failed to load batch config")?;
        let push = PushEnvConfig::from_env();

        Ok(Self {
            batch_label: batch.label,
            iterations: batch.iterations,
            sql_delay_max_ms: batch.sql_delay_max_ms,
            api_delay_max_ms: batch.api_delay_max_ms,
            settle_delay_max_ms: batch.settle_delay_max_ms,

            pushgateway_url: push.base_url,
            push_job: push.job,
        })
    }
}

/// Parse an environment variable, falling back to a default when unset.
/// An unparseable value set in the environment is an error.
pub(crate) fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid {key}={raw}: {e}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_defaults() {
        let config = Config::from_env().expect("Should parse with defaults");
        assert_eq!(config.iterations, 40);
        assert_eq!(config.batch_label, "eft");
        assert_eq!(config.pushgateway_url, "http://127.0.0.1:9091");
        assert_eq!(config.push_job, "pushgateway");
    }

    #[test]
    fn test_parse_var_falls_back_when_unset() {
        let value: u64 = parse_var("ETLSIM_UNSET_TEST_KEY", 7).unwrap();
        assert_eq!(value, 7);
    }
}
