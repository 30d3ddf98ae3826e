// Module declarations in dependency order
pub mod cli;
pub mod core;
pub mod notifier;
pub mod processing;
pub mod utils;
pub mod worker;

// Public exports for external consumers
pub use cli::Cli;
pub use self::core::{BatchSummary, ImageTask, OptimizationOutcome, OptimizerConfig};
pub use notifier::Notifier;
pub use processing::{BatchProcessor, ImageOptimizer, ImageToolkit, MagickToolkit};
pub use utils::{OptimizerError, OptimizerResult};

// This library file is used as a public API for consuming this crate as a library.
// The actual command-line entry point is in main.rs.
