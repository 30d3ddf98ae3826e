//! Core types shared by the pipeline and the batch driver.
//!
//! - [`OptimizerConfig`]: Run configuration resolved from the command line
//! - [`ImageTask`]: One file queued for optimization
//! - [`ProcessingOptions`] / [`ResizeOptions`]: Fixed toolkit settings
//! - [`OptimizationOutcome`]: Result of one pipeline invocation
//! - [`BatchSummary`]: Tally over a finished batch

mod config;
mod progress;
mod task;
mod types;

pub use config::{MAX_WORKERS, OptimizerConfig};
pub use progress::BatchSummary;
pub use task::ImageTask;
pub use types::{Dimensions, EncodeAttempt, OptimizationOutcome, ProcessingOptions, ResizeOptions};
