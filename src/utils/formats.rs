use std::path::{Path, PathBuf};

/// Marker inserted before the extension of every optimized file.
pub const PROCESSED_MARKER: &str = "-IM";

/// Extension written for every optimized file.
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Extensions picked up by the directory scan, in scan order.
///
/// Matching is case-sensitive: `photo.JPG` is not a candidate.
pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Check if the path carries one of the JPEG extensions
pub fn is_jpeg_candidate(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| JPEG_EXTENSIONS.contains(&ext))
}

/// Check if the file name already carries the processed marker.
///
/// Both `name-IM.jpg` and `name-IM.jpeg` count so that output from earlier
/// runs (or renamed output) is never fed through the pipeline again.
pub fn is_processed(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    JPEG_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!("{PROCESSED_MARKER}.{ext}")))
}

/// Path of the optimized copy: `<stem>-IM.jpg` next to the source.
pub fn processed_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    source.with_file_name(format!("{stem}{PROCESSED_MARKER}.{OUTPUT_EXTENSION}"))
}

/// Extract the filename from a path for log lines.
pub fn extract_filename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
