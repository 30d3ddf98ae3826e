//! Image processing via the ImageMagick command-line tools.
//!
//! # Architecture
//!
//! - [`MagickToolkit`]: Spawns `identify` / `convert` and implements [`super::ImageToolkit`].
//! - [`options`]: Maps `ResizeOptions` and `ProcessingOptions` to argument lists.
//! - [`MagickLimits`]: Resource limits passed to every subprocess environment.

mod executor;
mod limits;
pub mod options;

pub use executor::MagickToolkit;
pub use limits::MagickLimits;
