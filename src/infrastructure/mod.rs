pub mod observability;
pub mod simulation;
