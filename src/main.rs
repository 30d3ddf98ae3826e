// This is the command-line entry point for the JPEG optimizer.
// The lib.rs file serves only as a public API for external consumers.

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jpeg_optimizer_lib::{BatchProcessor, Cli, MagickToolkit, Notifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)          // Keep colored output
        .with_writer(std::io::stdout)
        .compact()
        .init();

    let cli = Cli::parse();
    let config = cli.to_config();

    // Capabilities are probed once, before any work starts
    let notifier = Notifier::detect();
    let toolkit = MagickToolkit::new();
    let missing = toolkit.missing_programs();
    if !missing.is_empty() {
        warn!("ImageMagick tools not found on PATH: {}", missing.join(", "));
    }

    let processor = BatchProcessor::new(toolkit, config);
    // Only a missing directory gets here; anyhow reports it and exits with 1
    processor
        .run()
        .await
        .with_context(|| format!("Cannot process {}", processor.config().dir.display()))?;

    notifier.notify_completion().await;

    let dir = &processor.config().dir;
    let absolute = tokio::fs::canonicalize(dir)
        .await
        .unwrap_or_else(|_| dir.clone());
    info!("Processing complete: {}", absolute.display());

    Ok(())
}
