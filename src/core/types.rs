//! Core types for re-encode settings and per-file results.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::utils::OptimizerError;

/// Pixel dimensions as reported by `identify -format %wx%h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is larger than the matching side of `bounds`.
    pub fn exceeds(&self, bounds: Dimensions) -> bool {
        self.width > bounds.width || self.height > bounds.height
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Dimensions {
    type Err = OptimizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (w, h) = trimmed.split_once('x').ok_or_else(|| {
            OptimizerError::format(format!("Expected <width>x<height>, got '{trimmed}'"))
        })?;

        let parse = |v: &str| {
            v.trim().parse::<u32>().map_err(|e| {
                OptimizerError::format(format!("Invalid dimension '{v}' in '{trimmed}': {e}"))
            })
        };

        Ok(Self::new(parse(w)?, parse(h)?))
    }
}

/// Settings for shrinking oversized images before the main re-encode.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeOptions {
    /// Images larger than this on either side are shrunk to fit
    pub max: Dimensions,
    pub filter: &'static str,
    pub sampling_factor: &'static str,
    pub unsharp: &'static str,
    pub quality: u32,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            max: Dimensions::new(8000, 6000),
            filter: "Lanczos",
            sampling_factor: "1x1",
            unsharp: "1.5x1+0.7+0.02",
            quality: 90,
        }
    }
}

/// Fixed re-encode parameters applied to every file.
///
/// The primary attempt adds [`ProcessingOptions::sampling_factor`] and
/// [`ProcessingOptions::area_limit`]; the fallback attempt leaves both out.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingOptions {
    pub filter: &'static str,
    pub filter_support: &'static str,
    pub unsharp: &'static str,
    pub dither: &'static str,
    pub posterize: u32,
    pub quality: u32,
    pub fancy_upsampling: bool,
    pub auto_level: bool,
    pub enhance: bool,
    pub interlace: &'static str,
    pub colorspace: &'static str,
    pub strip_metadata: bool,
    /// Chroma subsampling used by the primary attempt only
    pub sampling_factor: &'static str,
    /// Pixel-area resource limit used by the primary attempt only
    pub area_limit: &'static str,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            filter: "Triangle",
            filter_support: "2",
            unsharp: "0.25x0.08+8.3+0.045",
            dither: "None",
            posterize: 136,
            quality: 82,
            fancy_upsampling: false,
            auto_level: true,
            enhance: true,
            interlace: "none",
            colorspace: "sRGB",
            strip_metadata: true,
            sampling_factor: "2x2",
            area_limit: "0",
        }
    }
}

/// Which re-encode option set a `convert` call uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeAttempt {
    /// Base options plus aggressive sampling and the area limit
    Primary,
    /// Base options only
    Fallback,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq)]
pub enum OptimizationOutcome {
    /// Optimized copy written to `output`
    Processed {
        output: PathBuf,
        /// Whether the oversized-image resize ran first
        resized: bool,
        /// Whether the source was removed afterwards
        source_removed: bool,
    },
    /// Name already carries the processed marker
    Skipped,
    /// Probe, resize or both re-encode attempts failed
    Failed { error: String },
}

impl OptimizationOutcome {
    pub fn is_processed(&self) -> bool {
        matches!(self, Self::Processed { .. })
    }
}
