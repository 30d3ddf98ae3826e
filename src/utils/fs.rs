use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tokio::fs;
use crate::utils::{OptimizerError, OptimizerResult, ValidationError};
use crate::utils::formats::{JPEG_EXTENSIONS, is_jpeg_candidate};

/// Ensure the working directory exists and is a directory
pub async fn validate_dir(path: impl AsRef<Path>) -> OptimizerResult<()> {
    let path = path.as_ref();
    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ValidationError::not_a_directory(path).into()),
        Err(_) => Err(ValidationError::dir_not_found(path).into()),
    }
}

/// Check if a regular file exists at `path`
pub async fn file_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

/// Locate an executable on `PATH` (or at an explicit path).
pub fn find_program(program: impl AsRef<Path>) -> Option<PathBuf> {
    let search_path = std::env::var_os("PATH").unwrap_or_default();
    find_program_in(program, search_path)
}

/// Like [`find_program`], but searches `search_path` instead of `PATH`.
///
/// Files without the executable bit are passed over.
pub fn find_program_in(program: impl AsRef<Path>, search_path: impl AsRef<OsStr>) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    which::which_in(program.as_ref(), Some(search_path), cwd).ok()
}

/// List JPEG candidates directly inside `dir` (no recursion).
///
/// All `.jpg` files come first, then all `.jpeg` files, each group sorted by
/// name. Directories that happen to end in `.jpg` are ignored.
pub async fn find_jpeg_files(dir: impl AsRef<Path>) -> OptimizerResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| OptimizerError::io(format!("Failed to read {}: {}", dir.display(), e)))?;

    let mut found = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !is_jpeg_candidate(&path) {
            continue;
        }
        if entry.file_type().await?.is_file() {
            found.push(path);
        }
    }

    found.sort_by_key(|path| {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let group = JPEG_EXTENSIONS.iter().position(|e| *e == ext).unwrap_or(usize::MAX);
        (group, path.file_name().map(|n| n.to_os_string()))
    });

    Ok(found)
}
