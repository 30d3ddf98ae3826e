//! Tally of per-file outcomes for a finished batch.

use std::fmt;
use std::time::Duration;

use super::types::OptimizationOutcome;

/// Counts of what happened across a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchSummary {
    /// Number of files dispatched
    pub total_files: usize,
    /// Files with an optimized copy written
    pub processed: usize,
    /// Of the processed files, how many went through the resize step
    pub resized: usize,
    /// Files already carrying the marker
    pub skipped: usize,
    /// Files that failed (including tasks that panicked)
    pub failed: usize,
    /// Wall-clock time from first dispatch to the barrier
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Builds a summary from the outcomes returned by the pool.
    pub fn from_outcomes<'a>(
        outcomes: impl IntoIterator<Item = &'a OptimizationOutcome>,
        elapsed: Duration,
    ) -> Self {
        let mut summary = Self {
            elapsed,
            ..Self::default()
        };
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    pub fn record(&mut self, outcome: &OptimizationOutcome) {
        self.total_files += 1;
        match outcome {
            OptimizationOutcome::Processed { resized, .. } => {
                self.processed += 1;
                if *resized {
                    self.resized += 1;
                }
            }
            OptimizationOutcome::Skipped => self.skipped += 1,
            OptimizationOutcome::Failed { .. } => self.failed += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files: {} processed ({} resized), {} skipped, {} failed in {:.1}s",
            self.total_files,
            self.processed,
            self.resized,
            self.skipped,
            self.failed,
            self.elapsed.as_secs_f64()
        )
    }
}
