//! Best-effort spoken notification once a batch is done.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::utils::find_program;

/// Speech utility looked up on `PATH`.
pub const SPEECH_PROGRAM: &str = "google_speech";

/// Sentence spoken at the end of a run.
pub const COMPLETION_MESSAGE: &str = "Image optimization completed.";

/// Announces completion through a speech command, if one was found.
///
/// Availability is decided once, up front, by [`Notifier::detect`].
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    program: Option<PathBuf>,
}

impl Notifier {
    /// Looks for [`SPEECH_PROGRAM`] on `PATH`.
    pub fn detect() -> Self {
        let program = find_program(SPEECH_PROGRAM);
        debug!("Speech notification available: {}", program.is_some());
        Self { program }
    }

    /// A notifier that always reports the capability as missing.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.program.is_some()
    }

    /// Speaks [`COMPLETION_MESSAGE`]. Output is discarded and nothing is
    /// retried; returns whether the command ran successfully.
    pub async fn notify_completion(&self) -> bool {
        let Some(program) = &self.program else {
            warn!("{} is not installed. Skipping notification.", SPEECH_PROGRAM);
            return false;
        };

        let status = Command::new(program)
            .arg(COMPLETION_MESSAGE)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!("{} exited with {}. Skipping notification.", program.display(), status);
                false
            }
            Err(e) => {
                warn!("Failed to run {}: {}. Skipping notification.", program.display(), e);
                false
            }
        }
    }
}
