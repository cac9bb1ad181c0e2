//! Simulated ETL work stages.
//!
//! Each stage blocks for a bounded random duration standing in for real
//! I/O, then reports a nominal result. The error channel is part of the
//! contract but the simulated stages never use it.

use crate::domain::errors::WorkloadError;
use crate::infrastructure::simulation::delay_model::DelayModel;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Records-affected count reported by every simulated api call.
const RECORDS_PER_CALL: u64 = 42;

/// Transaction backlog "discovered" by the simulated source scan.
const DISCOVERED_TXN_COUNT: u64 = 345_234_523;

/// A unit of ETL work: one source scan, then one api call per record batch.
#[async_trait]
pub trait Workload: Send + Sync {
    /// Scan the source system for pending transactions. Stands in for a
    /// long-running SQL query; returns the number of transactions found.
    async fn scan_source(&self) -> Result<u64, WorkloadError>;

    /// Process one record batch against the downstream api. Returns the
    /// number of records affected.
    async fn process_record(&self) -> Result<u64, WorkloadError>;
}

/// Workload whose stages are artificial sleeps with fixed nominal results.
pub struct SimulatedWorkload {
    sql_delay: Arc<dyn DelayModel>,
    api_delay: Arc<dyn DelayModel>,
}

impl SimulatedWorkload {
    pub fn new(sql_delay: Arc<dyn DelayModel>, api_delay: Arc<dyn DelayModel>) -> Self {
        Self {
            sql_delay,
            api_delay,
        }
    }
}

#[async_trait]
impl Workload for SimulatedWorkload {
    async fn scan_source(&self) -> Result<u64, WorkloadError> {
        let pause = self.sql_delay.next_delay();
        debug!("source scan sleeping {}ms", pause.as_millis());
        tokio::time::sleep(pause).await;

        Ok(DISCOVERED_TXN_COUNT)
    }

    async fn process_record(&self) -> Result<u64, WorkloadError> {
        let pause = self.api_delay.next_delay();
        debug!("api call sleeping {}ms", pause.as_millis());
        tokio::time::sleep(pause).await;

        Ok(RECORDS_PER_CALL)
    }
}
