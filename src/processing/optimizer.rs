//! Single-file pipeline: skip filter, probe, conditional resize, re-encode
//! with one fallback, optional source removal.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use crate::core::{Dimensions, EncodeAttempt, ImageTask, OptimizationOutcome, ProcessingOptions, ResizeOptions};
use crate::processing::ImageToolkit;
use crate::utils::{OptimizerError, OptimizerResult, extract_filename, file_exists, is_processed, processed_path};

const SCRATCH_PREFIX: &str = "optimize-jpg-";

/// Runs the per-file pipeline against an [`ImageToolkit`].
///
/// Cheap to clone; clones share the toolkit.
pub struct ImageOptimizer<T> {
    toolkit: Arc<T>,
    resize: ResizeOptions,
    options: ProcessingOptions,
}

impl<T> Clone for ImageOptimizer<T> {
    fn clone(&self) -> Self {
        Self {
            toolkit: Arc::clone(&self.toolkit),
            resize: self.resize.clone(),
            options: self.options.clone(),
        }
    }
}

impl<T: ImageToolkit> ImageOptimizer<T> {
    pub fn new(toolkit: T) -> Self {
        Self::with_options(toolkit, ResizeOptions::default(), ProcessingOptions::default())
    }

    pub fn with_options(toolkit: T, resize: ResizeOptions, options: ProcessingOptions) -> Self {
        Self {
            toolkit: Arc::new(toolkit),
            resize,
            options,
        }
    }

    /// Optimizes one file. Never fails: errors are logged and returned as
    /// [`OptimizationOutcome::Failed`] so sibling tasks are unaffected.
    pub async fn optimize(&self, task: &ImageTask) -> OptimizationOutcome {
        let source = &task.source_path;
        if is_processed(source) {
            info!("Skipped: {}", source.display());
            return OptimizationOutcome::Skipped;
        }

        match self.run(task).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to optimize {}: {}", source.display(), e);
                OptimizationOutcome::Failed { error: e.to_string() }
            }
        }
    }

    async fn run(&self, task: &ImageTask) -> OptimizerResult<OptimizationOutcome> {
        let source = &task.source_path;

        let original = self.toolkit.probe(source).await.map_err(|e| {
            OptimizerError::probe(format!("Failed to get image dimensions: {e}"))
        })?;
        debug!("'{}': {}", extract_filename(source), original);

        // Dropping `scratch` removes the resized intermediate, including on `?` returns.
        let (intermediate, scratch) = if original.exceeds(self.resize.max) {
            if task.verbose {
                info!(
                    "Resizing {} from {} to {}...",
                    source.display(),
                    original,
                    self.resize.max
                );
            }
            let (path, dir) = self.resize_into_scratch(source).await?;
            (path, Some(dir))
        } else {
            (source.clone(), None)
        };

        let thumbnail = self.toolkit.probe(&intermediate).await.map_err(|e| {
            OptimizerError::probe(format!(
                "Failed to get dimensions of {}: {e}",
                intermediate.display()
            ))
        })?;

        let output = processed_path(source);
        let attempt = self.encode_with_fallback(task, &intermediate, thumbnail, &output).await?;
        debug!("'{}' encoded with {:?} options", extract_filename(source), attempt);

        if !file_exists(&output).await {
            return Err(OptimizerError::processing(format!(
                "Encoder reported success but {} was not written",
                output.display()
            )));
        }

        let resized = scratch.is_some();
        if let Some(dir) = scratch {
            if let Err(e) = dir.close() {
                warn!("Failed to remove temporary directory for {}: {}", source.display(), e);
            }
        }

        info!("Processed: {}", output.display());

        let source_removed = task.overwrite && self.remove_source(source).await;

        Ok(OptimizationOutcome::Processed {
            output,
            resized,
            source_removed,
        })
    }

    /// Shrinks `source` into a fresh temporary directory.
    ///
    /// Resize failures are reported as probe errors: both mean the file's
    /// geometry could not be brought into range.
    async fn resize_into_scratch(&self, source: &Path) -> OptimizerResult<(PathBuf, TempDir)> {
        let dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir()
            .map_err(|e| OptimizerError::io(format!("Cannot create temporary directory: {e}")))?;

        let file_name = source
            .file_name()
            .ok_or_else(|| OptimizerError::probe(format!("No file name in {}", source.display())))?;
        let target = dir.path().join(file_name);

        self.toolkit
            .resize(source, &target, &self.resize)
            .await
            .map_err(|e| OptimizerError::probe(format!("Failed to resize image: {e}")))?;

        Ok((target, dir))
    }

    async fn encode_with_fallback(
        &self,
        task: &ImageTask,
        input: &Path,
        thumbnail: Dimensions,
        output: &Path,
    ) -> OptimizerResult<EncodeAttempt> {
        let primary = self
            .toolkit
            .reencode(input, output, thumbnail, &self.options, EncodeAttempt::Primary)
            .await;

        let Err(first) = primary else {
            return Ok(EncodeAttempt::Primary);
        };

        if task.verbose {
            warn!(
                "First attempt failed for {}, retrying without '-sampling-factor {} -limit area {}'...",
                task.source_path.display(),
                self.options.sampling_factor,
                self.options.area_limit
            );
        }
        debug!("Primary encode error for {}: {}", task.source_path.display(), first);

        self.toolkit
            .reencode(input, output, thumbnail, &self.options, EncodeAttempt::Fallback)
            .await
            .map_err(|e| {
                OptimizerError::processing(format!(
                    "Second attempt failed for {} as well: {e}",
                    task.source_path.display()
                ))
            })?;

        Ok(EncodeAttempt::Fallback)
    }

    /// Deletes the source after a confirmed write. A failed delete is logged
    /// but does not undo the successful optimization.
    async fn remove_source(&self, source: &Path) -> bool {
        match tokio::fs::remove_file(source).await {
            Ok(()) => {
                debug!("Removed original {}", source.display());
                true
            }
            Err(e) => {
                warn!("Could not remove original {}: {}", source.display(), e);
                false
            }
        }
    }
}
