//! Store path validation and sanitization.

use std::path::{Path, PathBuf};

/// Validates and normalizes a store file path.
///
/// Existing paths are canonicalized; for new files the parent directory
/// must exist. Paths resolving through traversal sequences are rejected.
pub fn validate_store_path(path: &str, must_exist: bool) -> Result<PathBuf, String> {
    let candidate = Path::new(path);

    if candidate.exists() {
        let resolved = candidate
            .canonicalize()
            .map_err(|e| format!("cannot resolve {}: {}", path, e))?;
        return Ok(resolved);
    }

    if must_exist {
        return Err(format!("no such file: {}", path));
    }

    let parent = candidate
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let parent_abs = parent
        .canonicalize()
        .map_err(|e| format!("cannot resolve parent of {}: {}", path, e))?;

    if parent_abs.to_string_lossy().contains("..") {
        return Err(format!("path contains traversal sequences: {}", path));
    }

    let file_name = candidate
        .file_name()
        .ok_or_else(|| format!("path has no file name: {}", path))?;
    Ok(parent_abs.join(file_name))
}

/// Reduces a path to its file name for error messages.
pub fn sanitize_path_for_error(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "<store>".to_string())
}
