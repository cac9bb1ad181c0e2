//! Pushgateway transport for metric snapshots.
//!
//! Each push is a POST, which the Pushgateway treats as an incremental
//! update: metrics pushed earlier under the same grouping survive a failed
//! or partial push. Fire-and-forget; the caller never retries.

use crate::domain::errors::PushError;
use async_trait::async_trait;
use prometheus::{TextEncoder, proto::MetricFamily};
use tracing::debug;

/// Content type of the Prometheus text exposition format.
const EXPOSITION_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Transport capability for submitting a metric snapshot.
#[async_trait]
pub trait MetricsPusher: Send + Sync {
    /// Submit the snapshot as an incremental update.
    async fn push_add(&self, snapshot: &[MetricFamily]) -> Result<(), PushError>;
}

/// HTTP client pushing snapshots to a Prometheus Pushgateway.
pub struct PushgatewayClient {
    client: reqwest::Client,
    push_url: String,
}

impl PushgatewayClient {
    pub fn new(base_url: &str, job: &str) -> Self {
        let push_url = format!("{}/metrics/job/{}", base_url.trim_end_matches('/'), job);
        Self {
            client: reqwest::Client::new(),
            push_url,
        }
    }

    pub fn push_url(&self) -> &str {
        &self.push_url
    }
}

#[async_trait]
impl MetricsPusher for PushgatewayClient {
    async fn push_add(&self, snapshot: &[MetricFamily]) -> Result<(), PushError> {
        let body = TextEncoder::new().encode_to_string(snapshot)?;

        let response = self
            .client
            .post(&self.push_url)
            .header(reqwest::header::CONTENT_TYPE, EXPOSITION_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PushError::Rejected { status });
        }

        debug!("pushed metric snapshot to {}", self.push_url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_url_targets_job_grouping() {
        let client = PushgatewayClient::new("http://127.0.0.1:9091", "pushgateway");
        assert_eq!(
            client.push_url(),
            "http://127.0.0.1:9091/metrics/job/pushgateway"
        );
    }

    #[test]
    fn test_push_url_trims_trailing_slash() {
        let client = PushgatewayClient::new("http://gateway:9091/", "etl");
        assert_eq!(client.push_url(), "http://gateway:9091/metrics/job/etl");
    }
}
