//! ImageMagick resource limits handed to each subprocess.

use crate::core::MAX_WORKERS;

/// Resource-limit environment for `identify` and `convert`.
///
/// The values are attached to every spawned command with
/// [`tokio::process::Command::envs`]; this process's own environment is
/// never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagickLimits {
    vars: Vec<(&'static str, String)>,
}

impl Default for MagickLimits {
    fn default() -> Self {
        Self::with_thread_limit(MAX_WORKERS)
    }
}

impl MagickLimits {
    pub fn with_thread_limit(threads: usize) -> Self {
        Self {
            vars: vec![
                ("MAGICK_AREA_LIMIT", "1GP".to_string()),
                ("MAGICK_DISK_LIMIT", "128GiB".to_string()),
                ("MAGICK_FILE_LIMIT", "1536".to_string()),
                ("MAGICK_HEIGHT_LIMIT", "512MP".to_string()),
                ("MAGICK_MAP_LIMIT", "32GiB".to_string()),
                ("MAGICK_MEMORY_LIMIT", "32GiB".to_string()),
                ("MAGICK_THREAD_LIMIT", threads.to_string()),
                ("MAGICK_WIDTH_LIMIT", "512MP".to_string()),
            ],
        }
    }

    /// Replace or add one variable.
    pub fn set(&mut self, key: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.vars.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.vars.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Pairs suitable for `Command::envs`.
    pub fn env_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
