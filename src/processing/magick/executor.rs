//! ImageMagick command-line executor.
//!
//! Every operation spawns `identify` or `convert` through
//! `tokio::process::Command`, waits for it to exit and turns a nonzero status
//! into an [`OptimizerError::Toolkit`] carrying the tool's stderr.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::core::{Dimensions, EncodeAttempt, ProcessingOptions, ResizeOptions};
use crate::processing::ImageToolkit;
use crate::utils::{OptimizerError, OptimizerResult, extract_filename};
use crate::utils::fs::find_program;

use super::limits::MagickLimits;
use super::options::{encode_args, identify_args, resize_args};

const IDENTIFY: &str = "identify";
const CONVERT: &str = "convert";

/// Executor that drives the ImageMagick 6-style `identify` / `convert` pair.
#[derive(Debug, Clone)]
pub struct MagickToolkit {
    identify: PathBuf,
    convert: PathBuf,
    limits: MagickLimits,
}

impl Default for MagickToolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl MagickToolkit {
    /// Uses `identify` and `convert` from `PATH` with the default limits.
    pub fn new() -> Self {
        Self::with_programs(IDENTIFY, CONVERT)
    }

    pub fn with_programs(identify: impl Into<PathBuf>, convert: impl Into<PathBuf>) -> Self {
        Self {
            identify: identify.into(),
            convert: convert.into(),
            limits: MagickLimits::default(),
        }
    }

    /// Names of configured programs that cannot be found.
    pub fn missing_programs(&self) -> Vec<String> {
        [&self.identify, &self.convert]
            .into_iter()
            .filter(|program| find_program(program).is_none())
            .map(|program| program.display().to_string())
            .collect()
    }

    async fn run(&self, program: &Path, args: Vec<OsString>) -> OptimizerResult<Vec<u8>> {
        let name = extract_filename(program);
        let output = Command::new(program)
            .args(&args)
            .envs(self.limits.env_pairs())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| OptimizerError::toolkit(format!("Failed to run {name}: {e}")))?;

        if output.status.success() {
            Ok(output.stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = format!("{name} exited with {}: {}", output.status, stderr.trim());
            debug!("{}", message);
            Err(OptimizerError::toolkit(message))
        }
    }
}

impl ImageToolkit for MagickToolkit {
    async fn probe(&self, path: &Path) -> OptimizerResult<Dimensions> {
        let stdout = self.run(&self.identify, identify_args(path)).await?;
        String::from_utf8_lossy(&stdout).parse()
    }

    async fn resize(&self, input: &Path, output: &Path, opts: &ResizeOptions) -> OptimizerResult<()> {
        self.run(&self.convert, resize_args(input, output, opts)).await?;
        Ok(())
    }

    async fn reencode(
        &self,
        input: &Path,
        output: &Path,
        thumbnail: Dimensions,
        opts: &ProcessingOptions,
        attempt: EncodeAttempt,
    ) -> OptimizerResult<()> {
        let args = encode_args(input, output, thumbnail, opts, attempt);
        self.run(&self.convert, args).await?;
        Ok(())
    }
}
