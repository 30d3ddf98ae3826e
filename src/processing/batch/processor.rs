use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::core::{BatchSummary, ImageTask, OptimizationOutcome, OptimizerConfig};
use crate::processing::{ImageOptimizer, ImageToolkit};
use crate::utils::{OptimizerResult, find_jpeg_files, validate_dir};
use crate::worker::WorkerPool;

/// Discovers the JPEGs in one directory and runs the pipeline on each of
/// them through a bounded [`WorkerPool`].
pub struct BatchProcessor<T> {
    optimizer: ImageOptimizer<T>,
    pool: WorkerPool,
    config: OptimizerConfig,
}

impl<T: ImageToolkit> BatchProcessor<T> {
    pub fn new(toolkit: T, config: OptimizerConfig) -> Self {
        Self::with_optimizer(ImageOptimizer::new(toolkit), config)
    }

    pub fn with_optimizer(optimizer: ImageOptimizer<T>, config: OptimizerConfig) -> Self {
        let pool = WorkerPool::new(Some(config.max_workers));
        Self {
            optimizer,
            pool,
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// Builds one task per candidate file in the configured directory.
    ///
    /// Fails before touching anything when the directory is missing.
    pub async fn collect_tasks(&self) -> OptimizerResult<Vec<ImageTask>> {
        validate_dir(&self.config.dir).await?;

        let files = find_jpeg_files(&self.config.dir).await?;
        debug!("Found {} JPEG files in {}", files.len(), self.config.dir.display());

        Ok(files
            .into_iter()
            .map(|path| ImageTask::new(path, self.config.overwrite, self.config.verbose))
            .collect())
    }

    /// Processes every candidate and returns once all of them have finished.
    ///
    /// Only a missing directory (or an unreadable one) is an error; per-file
    /// failures end up in the summary.
    pub async fn run(&self) -> OptimizerResult<BatchSummary> {
        let tasks = self.collect_tasks().await?;
        let total = tasks.len();
        if total == 0 {
            info!("No JPEG files found in {}", self.config.dir.display());
        }

        let started = Instant::now();
        let optimizer = self.optimizer.clone();
        let results = self
            .pool
            .run_all(tasks, move |task| {
                let optimizer = optimizer.clone();
                async move { optimizer.optimize(&task).await }
            })
            .await;

        let outcomes: Vec<OptimizationOutcome> = results
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|e| {
                    error!("Worker failed: {}", e);
                    OptimizationOutcome::Failed { error: e.to_string() }
                })
            })
            .collect();

        let summary = BatchSummary::from_outcomes(&outcomes, started.elapsed());
        debug!("Peak concurrent workers: {}/{}", self.pool.peak_workers(), self.pool.worker_count());
        if summary.has_failures() {
            warn!("Batch completed with failures: {}", summary);
        } else {
            info!("Batch completed: {}", summary);
        }

        Ok(summary)
    }
}
