// Batch orchestration
pub mod batch_runner;

pub use batch_runner::{BatchRunner, RunSummary};
