//! Batch loop driving the simulated ETL iterations.
//!
//! One source scan, then a fixed number of record iterations. Every
//! iteration ends with a push attempt; a final push follows the loop
//! unconditionally, so a run of N iterations issues exactly N+1 pushes.

use crate::infrastructure::observability::metrics::EtlMetrics;
use crate::infrastructure::observability::pusher::MetricsPusher;
use crate::infrastructure::simulation::delay_model::DelayModel;
use crate::infrastructure::simulation::workload::Workload;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Outcome of a completed batch run, emitted as a JSON log line.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub started_at: String,
    pub iterations: usize,
    pub discovered_txn_count: u64,
    pub last_record_count: u64,
    pub push_attempts: usize,
    pub push_failures: usize,
    pub elapsed_seconds: f64,
}

/// Drives the simulated batch to completion.
pub struct BatchRunner {
    metrics: EtlMetrics,
    workload: Arc<dyn Workload>,
    pusher: Arc<dyn MetricsPusher>,
    settle_delay: Arc<dyn DelayModel>,
    batch_label: String,
    iterations: usize,
}

impl BatchRunner {
    pub fn new(
        metrics: EtlMetrics,
        workload: Arc<dyn Workload>,
        pusher: Arc<dyn MetricsPusher>,
        settle_delay: Arc<dyn DelayModel>,
        batch_label: impl Into<String>,
        iterations: usize,
    ) -> Self {
        Self {
            metrics,
            workload,
            pusher,
            settle_delay,
            batch_label: batch_label.into(),
            iterations,
        }
    }

    /// Run the batch to completion.
    ///
    /// No stage or push failure aborts the run; failures are logged,
    /// counted, and the loop proceeds to the next iteration.
    pub async fn run(&self) -> RunSummary {
        let started_at = Utc::now().to_rfc3339();
        let run_start = Instant::now();
        let mut push_attempts = 0usize;
        let mut push_failures = 0usize;
        let mut last_record_count = 0u64;

        // The source scan happens once, before any record processing.
        let scan_start = Instant::now();
        let discovered = match self.workload.scan_source().await {
            Ok(count) => count,
            Err(e) => {
                warn!("source scan failed: {e}");
                0
            }
        };
        self.metrics
            .observe_sql_duration(&self.batch_label, scan_start.elapsed().as_secs_f64());
        self.metrics
            .set_txn_count(&self.batch_label, discovered as f64);

        info!(
            "starting batch '{}': {} transactions discovered, {} iterations",
            self.batch_label, discovered, self.iterations
        );

        for iteration in 0..self.iterations {
            let iter_start = Instant::now();

            let outcome = self.workload.process_record().await;
            let api_elapsed = iter_start.elapsed().as_secs_f64();
            self.metrics
                .observe_api_duration(&self.batch_label, api_elapsed);
            self.metrics.duration.set(api_elapsed);

            // One timestamp per iteration so a fully successful run leaves
            // the success and completion gauges identical.
            let now = Utc::now().timestamp_millis() as f64 / 1000.0;
            self.metrics.completion_time.set(now);
            match outcome {
                Ok(count) => {
                    last_record_count = count;
                    self.metrics.records.set(count as f64);
                    self.metrics.success_time.set(now);
                }
                Err(e) => warn!("iteration {iteration}: record processing failed: {e}"),
            }

            tokio::time::sleep(self.settle_delay.next_delay()).await;
            self.metrics.inc_operations(&self.batch_label);
            self.metrics
                .observe_operation_duration(&self.batch_label, iter_start.elapsed().as_secs_f64());

            push_attempts += 1;
            if let Err(e) = self.pusher.push_add(&self.metrics.snapshot()).await {
                push_failures += 1;
                warn!("iteration {iteration}: could not push to pushgateway: {e}");
            }
        }

        // Final push runs even when the loop body never did.
        push_attempts += 1;
        if let Err(e) = self.pusher.push_add(&self.metrics.snapshot()).await {
            push_failures += 1;
            warn!("final push to pushgateway failed: {e}");
        }

        RunSummary {
            started_at,
            iterations: self.iterations,
            discovered_txn_count: discovered,
            last_record_count,
            push_attempts,
            push_failures,
            elapsed_seconds: run_start.elapsed().as_secs_f64(),
        }
    }
}
