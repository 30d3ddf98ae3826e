//! Run configuration resolved from the command line.

use std::path::PathBuf;

/// Upper bound on simultaneously running pipelines.
pub const MAX_WORKERS: usize = 32;

/// Everything the batch driver needs to know about one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Directory scanned for JPEGs (non-recursive)
    pub dir: PathBuf,
    /// Delete each source once its optimized copy exists
    pub overwrite: bool,
    /// Log resize and retry notices
    pub verbose: bool,
    /// Maximum in-flight pipelines
    pub max_workers: usize,
}

impl OptimizerConfig {
    pub fn new(dir: impl Into<PathBuf>, overwrite: bool, verbose: bool) -> Self {
        Self {
            dir: dir.into(),
            overwrite,
            verbose,
            max_workers: MAX_WORKERS,
        }
    }

    /// Overrides the worker count; zero is bumped to one.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }
}
