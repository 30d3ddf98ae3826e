//! Seam between the pipeline and the external image processor.

use std::future::Future;
use std::path::Path;

use crate::core::{Dimensions, EncodeAttempt, ProcessingOptions, ResizeOptions};
use crate::utils::OptimizerResult;

/// The three operations the pipeline needs from an image processor.
///
/// [`crate::processing::magick::MagickToolkit`] is the production
/// implementation. Each call blocks only the task that awaits it.
pub trait ImageToolkit: Send + Sync + 'static {
    /// Reads the pixel dimensions of `path`.
    fn probe(&self, path: &Path) -> impl Future<Output = OptimizerResult<Dimensions>> + Send;

    /// Shrinks `input` to fit `opts.max`, writing `output`.
    fn resize(
        &self,
        input: &Path,
        output: &Path,
        opts: &ResizeOptions,
    ) -> impl Future<Output = OptimizerResult<()>> + Send;

    /// Re-encodes `input` into `output` with the option set for `attempt`.
    fn reencode(
        &self,
        input: &Path,
        output: &Path,
        thumbnail: Dimensions,
        opts: &ProcessingOptions,
        attempt: EncodeAttempt,
    ) -> impl Future<Output = OptimizerResult<()>> + Send;
}
