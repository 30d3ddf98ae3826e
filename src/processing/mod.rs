pub mod batch;
pub mod magick;
mod optimizer;
mod toolkit;

pub use batch::BatchProcessor;
pub use magick::{MagickLimits, MagickToolkit};
pub use optimizer::ImageOptimizer;
pub use toolkit::ImageToolkit;
