//! Push-based observability for etlsim
//!
//! This module provides observability through **outbound data only** - no
//! HTTP server, no incoming requests. Metric snapshots are pushed to a
//! Prometheus Pushgateway after every batch iteration.

pub mod metrics;
pub mod pusher;

pub use metrics::EtlMetrics;
pub use pusher::{MetricsPusher, PushgatewayClient};
