use thiserror::Error;

/// Errors related to the simulated workload stages.
///
/// The shipped workload never produces these; the error channel exists so
/// callers handle failure uniformly and tests can inject it.
#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("source scan failed: {reason}")]
    SourceScan { reason: String },

    #[error("api request failed: {reason}")]
    ApiRequest { reason: String },
}

/// Errors related to pushing metric snapshots to the Pushgateway
#[derive(Debug, Error)]
pub enum PushError {
    #[error("failed to encode metric snapshot: {0}")]
    Encode(#[from] prometheus::Error),

    #[error("pushgateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("pushgateway rejected push with status {status}")]
    Rejected { status: reqwest::StatusCode },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_error_formatting() {
        let err = WorkloadError::ApiRequest {
            reason: "connection reset".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("api request failed"));
        assert!(msg.contains("connection reset"));
    }

    #[test]
    fn test_push_error_formatting() {
        let err = PushError::Rejected {
            status: reqwest::StatusCode::BAD_GATEWAY,
        };

        let msg = err.to_string();
        assert!(msg.contains("502"));
    }
}
