//! Duration probing via ffprobe
//!
//! A probe is a read-only inspection of a media file's metadata. The prober
//! is invoked as an external process with a discrete argument array and is
//! expected to print a single duration-in-seconds value on stdout.

use std::path::Path;
use std::process::Command;

use crate::error::{TrimError, TrimResult};

/// Probe the total duration of `input` in seconds.
///
/// # Errors
///
/// Returns [`TrimError::Probe`] if the prober cannot be launched, prints
/// nothing, or prints something that does not parse as a float. Callers
/// treat an unknown duration as a warning, not a fatal condition; the
/// trimmer performs its own validation.
pub fn probe_duration(ffprobe: &Path, input: &Path) -> TrimResult<f64> {
    let output = Command::new(ffprobe)
        .arg("-v")
        .arg("error")
        .arg("-show_entries")
        .arg("format=duration")
        .arg("-of")
        .arg("default=noprint_wrappers=1:nokey=1")
        .arg(input)
        .output()
        .map_err(|e| TrimError::Probe {
            message: format!("failed to run ffprobe: {}", e),
        })?;

    let duration_text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if duration_text.is_empty() {
        return Err(TrimError::Probe {
            message: format!("ffprobe returned no duration for {}", input.display()),
        });
    }

    duration_text.parse::<f64>().map_err(|_| TrimError::Probe {
        message: format!(
            "could not parse duration '{}' for {}",
            duration_text,
            input.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_duration_missing_binary_is_an_error() {
        let result = probe_duration(
            Path::new("/nonexistent/ffprobe-12345"),
            Path::new("clip.mp4"),
        );
        assert!(matches!(result, Err(TrimError::Probe { .. })));
    }
}
