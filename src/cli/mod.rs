//! CLI module for headtrim
//!
//! This module handles command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Batch MP4 head trimmer
///
/// Trims a fixed number of seconds from the start of every MP4 file in a
/// folder by stream-copying with FFmpeg. Stream-copy trimming cuts at the
/// nearest keyframe and may not be frame-exact.
#[derive(Parser, Debug)]
#[command(name = "headtrim")]
#[command(about = "Trim a fixed duration from the start of every MP4 in a folder")]
#[command(version)]
pub struct Cli {
    /// Source folder containing MP4 files
    pub source: PathBuf,

    /// Output folder (default: SOURCE/trimmed)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seconds to trim from the start of each file
    #[arg(short, long, default_value_t = 2.0)]
    pub trim_seconds: f64,

    /// Include files from subfolders
    #[arg(short, long)]
    pub recursive: bool,

    /// Mirror the source folder structure in the output (requires --recursive)
    #[arg(long)]
    pub preserve_structure: bool,

    /// Overwrite existing output files (trims in place of the output name)
    #[arg(long)]
    pub overwrite: bool,

    /// Directory holding bundled ffmpeg/ffprobe binaries
    /// (default: a `bin` directory next to this executable)
    #[arg(long)]
    pub bin_dir: Option<PathBuf>,

    /// Emit line-delimited JSON events instead of human-readable progress
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["headtrim", "/videos"]);
        assert_eq!(cli.source, PathBuf::from("/videos"));
        assert_eq!(cli.trim_seconds, 2.0);
        assert!(cli.output.is_none());
        assert!(!cli.recursive);
        assert!(!cli.preserve_structure);
        assert!(!cli.overwrite);
        assert!(!cli.json);
    }

    #[test]
    fn test_full_flag_surface() {
        let cli = Cli::parse_from([
            "headtrim",
            "/videos",
            "--output",
            "/out",
            "--trim-seconds",
            "0.5",
            "--recursive",
            "--preserve-structure",
            "--overwrite",
            "--json",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("/out")));
        assert_eq!(cli.trim_seconds, 0.5);
        assert!(cli.recursive);
        assert!(cli.preserve_structure);
        assert!(cli.overwrite);
        assert!(cli.json);
    }
}
