//! FFmpeg toolchain location
//!
//! Resolves the `ffprobe` and `ffmpeg` executables, preferring a bundled
//! binary directory over the system `PATH`. Both binaries must resolve from
//! the same place; a partial toolchain is treated as absent.

use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the duration prober binary, without platform suffix.
pub const PROBER_NAME: &str = "ffprobe";

/// Name of the trimmer binary, without platform suffix.
pub const TRIMMER_NAME: &str = "ffmpeg";

/// Resolved paths to the two required FFmpeg executables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainPaths {
    /// Path to the `ffprobe` executable
    pub ffprobe: PathBuf,
    /// Path to the `ffmpeg` executable
    pub ffmpeg: PathBuf,
}

/// Locate the FFmpeg toolchain.
///
/// Checks `bundled_dir` first for both binaries (with the platform executable
/// suffix); falls back to a `PATH` search. Returns `None` unless both
/// binaries resolve.
pub fn locate(bundled_dir: &Path) -> Option<ToolchainPaths> {
    let local_ffprobe = bundled_binary(bundled_dir, PROBER_NAME);
    let local_ffmpeg = bundled_binary(bundled_dir, TRIMMER_NAME);
    if local_ffprobe.is_file() && local_ffmpeg.is_file() {
        debug!(dir = %bundled_dir.display(), "using bundled FFmpeg toolchain");
        return Some(ToolchainPaths {
            ffprobe: local_ffprobe,
            ffmpeg: local_ffmpeg,
        });
    }

    match (which::which(PROBER_NAME), which::which(TRIMMER_NAME)) {
        (Ok(ffprobe), Ok(ffmpeg)) => {
            debug!(ffprobe = %ffprobe.display(), ffmpeg = %ffmpeg.display(), "using FFmpeg toolchain from PATH");
            Some(ToolchainPaths { ffprobe, ffmpeg })
        }
        _ => None,
    }
}

fn bundled_binary(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}{}", name, std::env::consts::EXE_SUFFIX))
}
