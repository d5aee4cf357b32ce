//! Job planning
//!
//! Turns the discovered file list plus run settings into an ordered list of
//! immutable job descriptors. Planning is a pure transformation; no
//! filesystem mutation happens here.

use std::path::{Path, PathBuf};

/// Per-run user settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSettings {
    /// Seconds to trim from the start of each file (must be > 0)
    pub trim_seconds: f64,
    /// Replace existing output files (and keep the input file name)
    pub overwrite: bool,
    /// Include files from subdirectories of the source
    pub recursive: bool,
    /// Mirror the source directory layout under the output root
    /// (only meaningful together with `recursive`)
    pub preserve_structure: bool,
}

/// One unit of work: a single input file and where its trimmed copy goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Input file path
    pub input_path: PathBuf,
    /// Resolved output file path
    pub output_path: PathBuf,
    /// Label shown in progress output (relative path in recursive mode)
    pub display_label: String,
}

/// Build the output file name for an input.
///
/// When overwriting, the name is unchanged so the trim replaces the original
/// in place. Otherwise the trim offset is encoded into the stem
/// (`clip.mp4` with a 2 second trim becomes `clip_trim2s.mp4`), which can
/// never collide with the input name for a positive offset.
pub fn build_output_name(input_path: &Path, trim_seconds: f64, overwrite: bool) -> String {
    let name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if overwrite {
        return name;
    }

    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = input_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    format!("{}_trim{}s{}", stem, trim_seconds, extension)
}

/// Plan jobs for the discovered `files`, preserving their order.
///
/// `display_label` is the path relative to `source_dir` in recursive mode and
/// the bare file name otherwise. The parent directory of each file is
/// mirrored under `output_root` only when `preserve_structure` is set (which
/// is masked off unless `recursive` is also set).
pub fn plan(
    files: &[PathBuf],
    source_dir: &Path,
    output_root: &Path,
    settings: &RunSettings,
) -> Vec<JobDescriptor> {
    let preserve_structure = settings.preserve_structure && settings.recursive;

    files
        .iter()
        .map(|input_path| {
            let relative = input_path.strip_prefix(source_dir).unwrap_or(input_path);
            let display_label = if settings.recursive {
                relative.to_string_lossy().into_owned()
            } else {
                input_path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            };

            let relative_dir = if preserve_structure {
                relative.parent().unwrap_or(Path::new("")).to_path_buf()
            } else {
                PathBuf::new()
            };
            let output_name =
                build_output_name(input_path, settings.trim_seconds, settings.overwrite);
            let output_path = output_root.join(relative_dir).join(output_name);

            JobDescriptor {
                input_path: input_path.clone(),
                output_path,
                display_label,
            }
        })
        .collect()
}
