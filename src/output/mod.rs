// src/output/mod.rs
//! Output handling with planning kept apart from execution.
//!
//! Callers describe what should be written as an [`OutputPlan`]; [`deliver`]
//! is the only place that touches the filesystem or stdout.

mod types;
mod writer;

pub use types::{
    CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan, OutputReport,
};
pub use writer::deliver;
