//! Maps the fixed option structs to `identify` / `convert` argument lists.

use std::ffi::OsString;
use std::path::Path;

use crate::core::{Dimensions, EncodeAttempt, ProcessingOptions, ResizeOptions};

/// Arguments for `identify`: prints `<width>x<height>` without decoding pixels.
pub fn identify_args(path: &Path) -> Vec<OsString> {
    vec![
        "-ping".into(),
        "-format".into(),
        "%wx%h".into(),
        path.as_os_str().to_owned(),
    ]
}

/// Arguments for shrinking an oversized image into `output`.
pub fn resize_args(input: &Path, output: &Path, opts: &ResizeOptions) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![input.as_os_str().to_owned()];
    args.extend(
        [
            "-resize".to_string(),
            opts.max.to_string(),
            "-filter".to_string(),
            opts.filter.to_string(),
            "-sampling-factor".to_string(),
            opts.sampling_factor.to_string(),
            "-unsharp".to_string(),
            opts.unsharp.to_string(),
            "-quality".to_string(),
            opts.quality.to_string(),
        ]
        .map(OsString::from),
    );
    args.push(output.as_os_str().to_owned());
    args
}

/// Re-encode options shared by both attempts, in the order `convert` applies them.
///
/// `thumbnail` is the intermediate's own size: the resize is a no-op in
/// geometry but routes the image through the thumbnail resampler.
pub fn base_encode_args(thumbnail: Dimensions, opts: &ProcessingOptions) -> Vec<String> {
    let mut args = vec![
        "-filter".to_string(),
        opts.filter.to_string(),
        "-define".to_string(),
        format!("filter:support={}", opts.filter_support),
        "-thumbnail".to_string(),
        thumbnail.to_string(),
    ];
    if opts.strip_metadata {
        args.push("-strip".to_string());
    }
    args.extend([
        "-unsharp".to_string(),
        opts.unsharp.to_string(),
        "-dither".to_string(),
        opts.dither.to_string(),
        "-posterize".to_string(),
        opts.posterize.to_string(),
        "-quality".to_string(),
        opts.quality.to_string(),
        "-define".to_string(),
        format!(
            "jpeg:fancy-upsampling={}",
            if opts.fancy_upsampling { "on" } else { "off" }
        ),
    ]);
    if opts.auto_level {
        args.push("-auto-level".to_string());
    }
    if opts.enhance {
        args.push("-enhance".to_string());
    }
    args.extend([
        "-interlace".to_string(),
        opts.interlace.to_string(),
        "-colorspace".to_string(),
        opts.colorspace.to_string(),
    ]);
    args
}

/// Full `convert` argument list for one re-encode attempt.
pub fn encode_args(
    input: &Path,
    output: &Path,
    thumbnail: Dimensions,
    opts: &ProcessingOptions,
    attempt: EncodeAttempt,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![input.as_os_str().to_owned()];
    args.extend(base_encode_args(thumbnail, opts).into_iter().map(OsString::from));
    if attempt == EncodeAttempt::Primary {
        args.extend(
            [
                "-sampling-factor",
                opts.sampling_factor,
                "-limit",
                "area",
                opts.area_limit,
            ]
            .map(OsString::from),
        );
    }
    args.push(output.as_os_str().to_owned());
    args
}
