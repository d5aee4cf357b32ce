//! The execution engine
//!
//! Consumes the planned job list strictly in order, one external process at a
//! time. Serial execution keeps progress reporting ordered and cancellation
//! semantics simple; disk I/O is the bottleneck, so concurrency would buy
//! nothing. Per-job failures never abort the run; only cancellation stops
//! processing early.

use std::fs;
use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::Sender;
use tracing::{info, warn};

use crate::engine::{CancelToken, EngineEvent, JobStatus};
use crate::error::{TrimError, TrimResult};
use crate::planner::JobDescriptor;
use crate::probe::probe_duration;
use crate::toolchain::ToolchainPaths;

/// Slack applied when comparing a probed duration against the trim offset,
/// absorbing floating-point and measurement noise at the boundary.
pub const DURATION_EPSILON: f64 = 0.01;

/// Validated input to one engine run
#[derive(Debug)]
pub struct RunRequest {
    /// Ordered jobs to process
    pub jobs: Vec<JobDescriptor>,
    /// Seconds to trim from the start of each input
    pub trim_seconds: f64,
    /// Replace existing output files
    pub overwrite: bool,
    /// Resolved toolchain executables
    pub toolchain: ToolchainPaths,
}

impl RunRequest {
    /// Build a run request, rejecting precondition failures up front.
    ///
    /// # Errors
    ///
    /// [`TrimError::InvalidTrimOffset`] for a non-positive trim,
    /// [`TrimError::NoFilesFound`] for an empty job list.
    pub fn new(
        jobs: Vec<JobDescriptor>,
        trim_seconds: f64,
        overwrite: bool,
        toolchain: ToolchainPaths,
    ) -> TrimResult<Self> {
        if trim_seconds <= 0.0 {
            return Err(TrimError::InvalidTrimOffset {
                seconds: trim_seconds,
            });
        }
        if jobs.is_empty() {
            return Err(TrimError::NoFilesFound);
        }
        Ok(Self {
            jobs,
            trim_seconds,
            overwrite,
            toolchain,
        })
    }
}

/// Sequential job execution engine.
///
/// Consumed by [`Engine::run`]; a new run always starts from a fresh engine,
/// so run state is never reused.
#[derive(Debug)]
pub struct Engine {
    request: RunRequest,
    cancel: CancelToken,
}

impl Engine {
    /// Create an engine for one run
    pub fn new(request: RunRequest) -> Self {
        Self {
            request,
            cancel: CancelToken::new(),
        }
    }

    /// Handle the controller can use to cancel this run
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Process the job list, emitting events into `sink`.
    ///
    /// Emission never blocks; a dropped receiver is tolerated. A final
    /// aggregate event and a single [`EngineEvent::Finished`] are emitted on
    /// every exit path, normal or canceled.
    pub fn run(self, sink: &Sender<EngineEvent>) {
        let total = self.request.jobs.len();
        info!(total, trim_seconds = self.request.trim_seconds, "run started");

        for (index, job) in self.request.jobs.iter().enumerate() {
            if self.cancel.is_canceled() {
                emit_job(sink, index, JobStatus::Canceled, "Canceled by user");
                break;
            }

            emit_job(sink, index, JobStatus::Processing, "");
            emit(sink, EngineEvent::Overall { current: index + 1, total });

            if self.probe_says_skip(sink, index, job) {
                continue;
            }

            if let Some(parent) = job.output_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    let message = format!("Could not create output directory: {}", e);
                    emit_job(sink, index, JobStatus::Failed, &message);
                    emit_log(sink, &message);
                    continue;
                }
            }

            // Output existence must reflect filesystem state at execution
            // time, not planning time.
            if job.output_path.exists() && !self.request.overwrite {
                let message = "Output exists and overwrite is disabled";
                emit_job(sink, index, JobStatus::Skipped, message);
                emit_log(
                    sink,
                    &format!("Skipping {}: {}", job.output_path.display(), message),
                );
                continue;
            }

            match self.run_trimmer(job) {
                Ok((status, stderr)) => {
                    let stderr = stderr.trim().to_string();
                    if status.success() {
                        if !stderr.is_empty() {
                            // The trimmer may warn even on success.
                            emit_log(sink, &stderr);
                        }
                        emit_job(sink, index, JobStatus::Done, "");
                    } else if self.cancel.is_canceled() {
                        emit_job(sink, index, JobStatus::Canceled, "Canceled by user");
                        emit_log(
                            sink,
                            &format!("Canceled while processing {}", job.input_path.display()),
                        );
                        break;
                    } else {
                        let error_text = if stderr.is_empty() {
                            "Unknown ffmpeg error".to_string()
                        } else {
                            stderr
                        };
                        emit_job(sink, index, JobStatus::Failed, &error_text);
                        emit_log(
                            sink,
                            &format!(
                                "ffmpeg failed for {}: {}",
                                job.input_path.display(),
                                error_text
                            ),
                        );
                    }
                }
                Err(e) => {
                    // OS-level launch failure is isolated like any other
                    // per-job failure.
                    let message = e.to_string();
                    emit_job(sink, index, JobStatus::Failed, &message);
                    emit_log(
                        sink,
                        &format!("ffmpeg failed for {}: {}", job.input_path.display(), message),
                    );
                }
            }
        }

        emit(sink, EngineEvent::Overall { current: total, total });
        emit(sink, EngineEvent::Finished);
        info!("run finished");
    }

    /// Probe the input and decide whether this job must be skipped.
    ///
    /// A duration at or below the trim offset (plus epsilon) skips the job;
    /// a failed probe only logs a warning and lets the trimmer validate the
    /// input itself.
    fn probe_says_skip(
        &self,
        sink: &Sender<EngineEvent>,
        index: usize,
        job: &JobDescriptor,
    ) -> bool {
        match probe_duration(&self.request.toolchain.ffprobe, &job.input_path) {
            Ok(duration) => {
                if should_skip(duration, self.request.trim_seconds) {
                    let message = format!(
                        "Duration {:.2}s is shorter than trim {:.2}s",
                        duration, self.request.trim_seconds
                    );
                    emit_job(sink, index, JobStatus::Skipped, &message);
                    emit_log(
                        sink,
                        &format!("Skipping {}: {}", job.input_path.display(), message),
                    );
                    return true;
                }
                false
            }
            Err(e) => {
                warn!(input = %job.input_path.display(), error = %e, "duration probe failed");
                emit_log(sink, &e.to_string());
                emit_log(
                    sink,
                    &format!(
                        "Warning: proceeding without duration info for {}",
                        job.input_path.display()
                    ),
                );
                false
            }
        }
    }

    /// Invoke the trimmer for one job and wait for it to exit.
    ///
    /// The child handle is registered with the cancel token for the duration
    /// of the invocation and is always reaped, whether it exits on its own or
    /// is killed by cancellation.
    fn run_trimmer(&self, job: &JobDescriptor) -> TrimResult<(ExitStatus, String)> {
        let mut command = Command::new(&self.request.toolchain.ffmpeg);
        command
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg(if self.request.overwrite { "-y" } else { "-n" })
            .arg("-ss")
            .arg(format_offset(self.request.trim_seconds))
            .arg("-i")
            .arg(&job.input_path)
            .arg("-c")
            .arg("copy")
            .arg("-map")
            .arg("0")
            .arg("-avoid_negative_ts")
            .arg("make_zero")
            .arg("-movflags")
            .arg("+faststart")
            .arg(&job.output_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;
        let stderr_pipe = child.stderr.take();
        self.cancel.set_in_flight(child);

        // Draining stderr doubles as the blocking wait: EOF means the
        // process has exited or been killed. Diagnostics are raw bytes;
        // a read failure must not stop the child from being reaped.
        let mut stderr_bytes = Vec::new();
        if let Some(mut pipe) = stderr_pipe {
            if let Err(e) = pipe.read_to_end(&mut stderr_bytes) {
                warn!(error = %e, "could not drain trimmer stderr");
            }
        }

        let mut child = self.cancel.take_in_flight().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "in-flight process handle lost")
        })?;
        let status = child.wait()?;
        Ok((status, String::from_utf8_lossy(&stderr_bytes).into_owned()))
    }
}

fn format_offset(trim_seconds: f64) -> String {
    trim_seconds.to_string()
}

fn emit(sink: &Sender<EngineEvent>, event: EngineEvent) {
    // A disconnected sink never aborts the run.
    let _ = sink.send(event);
}

fn emit_job(sink: &Sender<EngineEvent>, index: usize, status: JobStatus, message: &str) {
    emit(
        sink,
        EngineEvent::Job {
            index,
            status,
            message: message.to_string(),
        },
    );
}

fn emit_log(sink: &Sender<EngineEvent>, message: &str) {
    emit(
        sink,
        EngineEvent::Log {
            message: message.to_string(),
        },
    );
}

/// Convenience check mirroring the engine's skip rule, useful to sinks that
/// want to pre-flag too-short inputs.
pub fn should_skip(duration: f64, trim_seconds: f64) -> bool {
    duration <= trim_seconds + DURATION_EPSILON
}
