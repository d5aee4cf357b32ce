//! Candidate file discovery
//!
//! Walks a source directory and yields the MP4 files to process, sorted by
//! full path so the resulting job order is stable across runs and platforms.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{TrimError, TrimResult};

/// Check whether a path carries the target container extension (case-insensitive)
pub fn is_mp4(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp4"))
        .unwrap_or(false)
}

/// Discover MP4 files under `source_dir`.
///
/// Enumerates regular files only, recursing into subdirectories when
/// `recursive` is set, and returns them sorted by full path.
///
/// # Errors
///
/// Returns [`TrimError::MissingSource`] if `source_dir` does not exist; a
/// missing source is never silently reported as an empty list.
pub fn discover(source_dir: &Path, recursive: bool) -> TrimResult<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(TrimError::MissingSource {
            path: source_dir.to_path_buf(),
        });
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files: Vec<PathBuf> = WalkDir::new(source_dir)
        .max_depth(max_depth)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_mp4(path))
        .collect();

    files.sort();
    debug!(count = files.len(), dir = %source_dir.display(), "discovery complete");
    Ok(files)
}
