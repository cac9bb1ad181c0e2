//! Pushgateway endpoint configuration parsing from environment variables.

use std::env;

/// Push environment configuration
#[derive(Debug, Clone)]
pub struct PushEnvConfig {
    pub base_url: String,
    pub job: String,
}

impl Default for PushEnvConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9091".to_string(),
            job: "pushgateway".to_string(),
        }
    }
}

impl PushEnvConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("PUSHGATEWAY_URL").unwrap_or(defaults.base_url),
            job: env::var("PUSHGATEWAY_JOB").unwrap_or(defaults.job),
        }
    }
}
