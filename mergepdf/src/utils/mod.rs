//! Utilities for input path collection and display helpers.

use crate::{Result, error::MergePdfError};
use std::path::PathBuf;

/// Expand input arguments into filesystem paths.
///
/// Arguments containing glob metacharacters are expanded (sorted, as the
/// `glob` crate yields them); plain paths are passed through untouched so
/// that missing files are reported later with the right error.
///
/// # Errors
///
/// Propagates `glob` pattern and iteration errors.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns.into_iter() {
        let pattern = pattern.as_ref();
        if is_glob_pattern(pattern) {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

fn is_glob_pattern(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand a single glob pattern into filesystem paths.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob::glob(pattern).map_err(|err| MergePdfError::Other {
        message: format!("Invalid pattern '{pattern}': {err}"),
    })?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| MergePdfError::Other {
            message: err.to_string(),
        })?;
        resolved_paths.push(path);
    }

    Ok(resolved_paths)
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
