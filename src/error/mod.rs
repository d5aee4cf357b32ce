//! Error handling module for headtrim

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for headtrim operations
#[derive(Error, Debug)]
pub enum TrimError {
    /// FFmpeg toolchain could not be located
    #[error("ffmpeg and ffprobe are required; install FFmpeg or place both binaries in the bundled bin directory")]
    ToolchainNotFound,

    /// Source directory does not exist
    #[error("Source directory not found: {path}")]
    MissingSource { path: PathBuf },

    /// Trim offset must be positive
    #[error("Trim seconds must be greater than 0 (got {seconds})")]
    InvalidTrimOffset { seconds: f64 },

    /// Nothing to process
    #[error("No MP4 files found to process")]
    NoFilesFound,

    /// Duration probe error
    #[error("Failed to probe duration: {message}")]
    Probe { message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for headtrim operations
pub type TrimResult<T> = std::result::Result<T, TrimError>;
