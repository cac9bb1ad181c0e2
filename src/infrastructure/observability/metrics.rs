//! Prometheus metric definitions for the ETL batch simulator.
//!
//! Metric names, label dimensions, and bucket boundaries are a wire
//! contract shared with the bundled Grafana dashboard
//! (`demo_dashboard.json`) and must not change.

use prometheus::{
    CounterVec, Gauge, GaugeVec, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::{AtomicF64, Collector, GenericGauge},
    proto::MetricFamily,
};
use std::sync::Arc;

/// Prometheus metrics for one ETL batch run
#[derive(Clone)]
pub struct EtlMetrics {
    registry: Arc<Registry>,
    /// Epoch seconds of the last completed iteration, successful or not
    pub completion_time: GenericGauge<AtomicF64>,
    /// Epoch seconds of the last successful iteration. Deliberately left
    /// out of the registry; `snapshot` appends its family to every push.
    pub success_time: GenericGauge<AtomicF64>,
    /// Elapsed seconds of the last api stage
    pub duration: GenericGauge<AtomicF64>,
    /// Records affected by the last api stage
    pub records: GenericGauge<AtomicF64>,
    /// Pending transactions discovered by the source scan, per batch
    pub txn_count: GaugeVec,
    /// Source scan latency in seconds, per batch
    pub sql_duration: HistogramVec,
    /// Api call latency in seconds, per batch
    pub api_duration: HistogramVec,
    /// Full per-iteration latency in seconds, per batch
    pub operation_duration: HistogramVec,
    /// Iterations processed since process start, per batch
    pub operations_total: CounterVec,
}

impl EtlMetrics {
    /// Create a new EtlMetrics instance with all instruments registered.
    ///
    /// A duplicate metric name is a construction error surfaced by the
    /// registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let completion_time = Gauge::with_opts(Opts::new(
            "fs_etl_complete_timestamp_seconds",
            "The timestamp of the last completion of the ETL job, successful or not.",
        ))?;
        registry.register(Box::new(completion_time.clone()))?;

        // Not registered: appended to each pushed snapshot instead, so the
        // push mixes gathered and collected families.
        let success_time = Gauge::with_opts(Opts::new(
            "fs_etl_success_timestamp_seconds",
            "The timestamp of the last successful completion of the ETL job.",
        ))?;

        let duration = Gauge::with_opts(Opts::new(
            "fs_etl_duration_seconds",
            "The duration of the last ETL job in seconds.",
        ))?;
        registry.register(Box::new(duration.clone()))?;

        let records = Gauge::with_opts(Opts::new(
            "fs_etl_records_processed",
            "The number of records processed in the last ETL job.",
        ))?;
        registry.register(Box::new(records.clone()))?;

        let txn_count = GaugeVec::new(
            Opts::new(
                "txn_count",
                "The number of records discovered to be processed for the ETL job",
            ),
            &["batch"],
        )?;
        registry.register(Box::new(txn_count.clone()))?;

        let sql_duration = HistogramVec::new(
            HistogramOpts::new(
                "fs_sql_duration_seconds",
                "Duration of the ETL sql requests in seconds",
            )
            .buckets(vec![0.1, 0.5, 1.0, 5.0, 10.0, 100.0]),
            &["batch"],
        )?;
        registry.register(Box::new(sql_duration.clone()))?;

        let api_duration = HistogramVec::new(
            HistogramOpts::new(
                "fs_api_duration_seconds",
                "Duration of the ETL api requests in seconds",
            )
            .buckets(vec![0.00001, 0.000015, 0.00002, 0.000025, 0.00003]),
            &["batch"],
        )?;
        registry.register(Box::new(api_duration.clone()))?;

        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "fs_etl_operations_seconds",
                "Duration of the entire ETL requests in seconds",
            )
            .buckets(vec![0.001, 0.0015, 0.002, 0.0025, 0.01]),
            &["batch"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        let operations_total = CounterVec::new(
            Opts::new(
                "fs_etl_operations_total",
                "The number of records processed for the ETL job.",
            ),
            &["batch"],
        )?;
        registry.register(Box::new(operations_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            completion_time,
            success_time,
            duration,
            records,
            txn_count,
            sql_duration,
            api_duration,
            operation_duration,
            operations_total,
        })
    }

    /// Current values of every instrument, registered or not.
    ///
    /// The registry is gathered and the unregistered success gauge is
    /// appended, so a push always carries the full set.
    pub fn snapshot(&self) -> Vec<MetricFamily> {
        let mut families = self.registry.gather();
        families.extend(self.success_time.collect());
        families
    }

    /// Render the snapshot in Prometheus text format
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        encoder
            .encode_to_string(&self.snapshot())
            .unwrap_or_default()
    }

    /// Set the discovered transaction count for a batch
    pub fn set_txn_count(&self, batch: &str, count: f64) {
        self.txn_count.with_label_values(&[batch]).set(count);
    }

    /// Observe source scan latency
    pub fn observe_sql_duration(&self, batch: &str, secs: f64) {
        self.sql_duration.with_label_values(&[batch]).observe(secs);
    }

    /// Observe api call latency
    pub fn observe_api_duration(&self, batch: &str, secs: f64) {
        self.api_duration.with_label_values(&[batch]).observe(secs);
    }

    /// Observe full-iteration latency
    pub fn observe_operation_duration(&self, batch: &str, secs: f64) {
        self.operation_duration
            .with_label_values(&[batch])
            .observe(secs);
    }

    /// Increment the processed-iterations counter
    pub fn inc_operations(&self, batch: &str) {
        self.operations_total.with_label_values(&[batch]).inc();
    }
}
