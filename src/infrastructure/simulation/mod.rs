pub mod delay_model;
pub mod workload;

pub use delay_model::{DelayModel, UniformDelay, ZeroDelay};
pub use workload::{SimulatedWorkload, Workload};
