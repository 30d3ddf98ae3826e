//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::core::OptimizerConfig;

/// Optimize JPG images.
#[derive(Parser, Debug)]
#[command(name = "optimize-jpg", version, about = "Optimize JPG images.", long_about = None)]
pub struct Cli {
    /// Specify the working directory where images are located.
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Enable overwrite mode. Original images will be overwritten.
    #[arg(short, long)]
    pub overwrite: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn to_config(&self) -> OptimizerConfig {
        OptimizerConfig::new(self.dir.clone(), self.overwrite, self.verbose)
    }
}
