//! Recording stand-in for the ImageMagick tools.
//!
//! Probes answer from a table of known sizes, resizes and re-encodes write
//! small placeholder files, and every call is recorded so tests can assert
//! on exactly what the pipeline asked for.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jpeg_optimizer_lib::core::{Dimensions, EncodeAttempt, ProcessingOptions, ResizeOptions};
use jpeg_optimizer_lib::{ImageToolkit, OptimizerError, OptimizerResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Probe(PathBuf),
    Resize {
        input: PathBuf,
        output: PathBuf,
    },
    Reencode {
        input: PathBuf,
        output: PathBuf,
        thumbnail: Dimensions,
        attempt: EncodeAttempt,
        /// Whether `input` existed when the encoder was called
        input_existed: bool,
    },
}

#[derive(Default)]
struct State {
    sizes: HashMap<PathBuf, Dimensions>,
    fail_resize: HashSet<String>,
    fail_primary: HashSet<String>,
    fail_fallback: HashSet<String>,
    silent_encode: HashSet<String>,
    calls: Vec<Call>,
}

#[derive(Clone, Default)]
pub struct FakeToolkit {
    state: Arc<Mutex<State>>,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    encode_delay: Option<Duration>,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl FakeToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every re-encode sleeps this long, so concurrent calls overlap.
    pub fn with_encode_delay(mut self, delay: Duration) -> Self {
        self.encode_delay = Some(delay);
        self
    }

    /// Registers the size `probe` reports for `path`. Unknown paths fail to probe.
    pub fn set_size(&self, path: impl Into<PathBuf>, width: u32, height: u32) {
        self.state
            .lock()
            .unwrap()
            .sizes
            .insert(path.into(), Dimensions::new(width, height));
    }

    pub fn fail_resize(&self, name: &str) {
        self.state.lock().unwrap().fail_resize.insert(name.to_string());
    }

    pub fn fail_primary(&self, name: &str) {
        self.state.lock().unwrap().fail_primary.insert(name.to_string());
    }

    pub fn fail_fallback(&self, name: &str) {
        self.state.lock().unwrap().fail_fallback.insert(name.to_string());
    }

    /// Re-encodes of `name` report success without writing anything.
    pub fn encode_without_writing(&self, name: &str) {
        self.state.lock().unwrap().silent_encode.insert(name.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn resize_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Resize { .. }))
            .collect()
    }

    pub fn reencode_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Reencode { .. }))
            .collect()
    }

    /// Number of resize + re-encode calls.
    pub fn transform_count(&self) -> usize {
        self.resize_calls().len() + self.reencode_calls().len()
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }
}

/// Shrinks `dims` to fit inside `max`, keeping the aspect ratio.
fn fit_within(dims: Dimensions, max: Dimensions) -> Dimensions {
    let scale = f64::min(
        max.width as f64 / dims.width as f64,
        max.height as f64 / dims.height as f64,
    )
    .min(1.0);
    Dimensions::new(
        (dims.width as f64 * scale).round() as u32,
        (dims.height as f64 * scale).round() as u32,
    )
}

impl ImageToolkit for FakeToolkit {
    async fn probe(&self, path: &Path) -> OptimizerResult<Dimensions> {
        self.record(Call::Probe(path.to_path_buf()));
        self.state
            .lock()
            .unwrap()
            .sizes
            .get(path)
            .copied()
            .ok_or_else(|| OptimizerError::toolkit(format!("identify: unable to open {}", path.display())))
    }

    async fn resize(&self, input: &Path, output: &Path, opts: &ResizeOptions) -> OptimizerResult<()> {
        self.record(Call::Resize {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
        });

        let resized = {
            let state = self.state.lock().unwrap();
            if state.fail_resize.contains(&file_name(input)) {
                return Err(OptimizerError::toolkit("convert: resize failed"));
            }
            state.sizes.get(input).copied().map(|d| fit_within(d, opts.max))
        };
        let resized = resized.ok_or_else(|| OptimizerError::toolkit("convert: unknown input"))?;

        tokio::fs::write(output, b"resized").await?;
        self.set_size(output, resized.width, resized.height);
        Ok(())
    }

    async fn reencode(
        &self,
        input: &Path,
        output: &Path,
        thumbnail: Dimensions,
        _opts: &ProcessingOptions,
        attempt: EncodeAttempt,
    ) -> OptimizerResult<()> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        self.record(Call::Reencode {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            thumbnail,
            attempt,
            input_existed: input.exists(),
        });

        if let Some(delay) = self.encode_delay {
            tokio::time::sleep(delay).await;
        }

        let (fails, silent) = {
            let state = self.state.lock().unwrap();
            let name = file_name(input);
            let fails = match attempt {
                EncodeAttempt::Primary => state.fail_primary.contains(&name),
                EncodeAttempt::Fallback => state.fail_fallback.contains(&name),
            };
            (fails, state.silent_encode.contains(&name))
        };

        let result = if fails {
            Err(OptimizerError::toolkit(format!("convert: {attempt:?} attempt failed")))
        } else if silent {
            Ok(())
        } else {
            tokio::fs::write(output, b"optimized").await.map_err(OptimizerError::from)
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Creates `name` in `dir` with placeholder bytes and returns its path.
pub fn touch(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"original").unwrap();
    path
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
