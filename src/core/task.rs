//! Image task definition.

use std::path::PathBuf;

/// One discovered file plus the run flags that apply to it.
///
/// Built by the batch driver at dispatch time and consumed by a single
/// pipeline invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTask {
    /// Path to the source JPEG
    pub source_path: PathBuf,
    /// Delete the source once the optimized copy exists
    pub overwrite: bool,
    /// Log resize and retry notices
    pub verbose: bool,
}

impl ImageTask {
    pub fn new(source_path: impl Into<PathBuf>, overwrite: bool, verbose: bool) -> Self {
        Self {
            source_path: source_path.into(),
            overwrite,
            verbose,
        }
    }
}
