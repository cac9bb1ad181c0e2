//! etlsim - Headless batch ETL simulator
//!
//! Runs one simulated ETL batch, pushing a metric snapshot to a Prometheus
//! Pushgateway after every iteration and once more on completion.
//!
//! # Usage
//! ```sh
//! BATCH_ITERATIONS=40 cargo run
//! ```
//!
//! # Environment Variables
//! - `PUSHGATEWAY_URL` - Pushgateway base URL (default: http://127.0.0.1:9091)
//! - `PUSHGATEWAY_JOB` - Job grouping name (default: pushgateway)
//! - `BATCH_LABEL` - Value of the `batch` metric label (default: eft)
//! - `BATCH_ITERATIONS` - Number of simulated record iterations (default: 40)
//! - `SQL_DELAY_MAX_MS` / `API_DELAY_MAX_MS` / `SETTLE_DELAY_MAX_MS` -
//!   Upper bounds of the simulated stage delays

use anyhow::Result;
use etlsim::application::BatchRunner;
use etlsim::config::Config;
use etlsim::infrastructure::observability::{EtlMetrics, PushgatewayClient};
use etlsim::infrastructure::simulation::{SimulatedWorkload, UniformDelay};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Setup logging (stdout only)
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("etlsim {} starting...", env!("CARGO_PKG_VERSION"));
    info!("Metrics: Push-based (Prometheus Pushgateway)");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: gateway={}, job={}, batch={}, iterations={}",
        config.pushgateway_url, config.push_job, config.batch_label, config.iterations
    );

    let metrics = EtlMetrics::new()?;
    let pusher = Arc::new(PushgatewayClient::new(
        &config.pushgateway_url,
        &config.push_job,
    ));
    let workload = Arc::new(SimulatedWorkload::new(
        Arc::new(UniformDelay::up_to_millis(config.sql_delay_max_ms)),
        Arc::new(UniformDelay::up_to_millis(config.api_delay_max_ms)),
    ));
    let settle_delay = Arc::new(UniformDelay::up_to_millis(config.settle_delay_max_ms));

    let runner = BatchRunner::new(
        metrics,
        workload,
        pusher,
        settle_delay,
        config.batch_label.clone(),
        config.iterations,
    );

    let summary = runner.run().await;

    info!(
        "Batch complete: {} iterations, {} of {} pushes failed, {:.1}s elapsed",
        summary.iterations, summary.push_failures, summary.push_attempts, summary.elapsed_seconds
    );
    // Structured summary line so logs can be easily filtered
    println!("RUN_SUMMARY:{}", serde_json::to_string(&summary)?);

    Ok(())
}
