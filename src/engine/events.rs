//! Progress event schema
//!
//! Every job transition and aggregate progress update is emitted as an
//! immutable event. Delivery order matches processing order exactly; the
//! engine never blocks waiting for a sink to consume an event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal and transient states of a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Not yet attempted. Exists for sinks that pre-populate job tables;
    /// the engine itself never emits it.
    Pending,
    /// External processing in flight
    Processing,
    /// Not processed, with a human-readable reason
    Skipped,
    /// Trimmer or launch failure, with diagnostic text
    Failed,
    /// Output written successfully
    Done,
    /// Interrupted by a cancellation request
    Canceled,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            JobStatus::Pending => "Pending",
            JobStatus::Processing => "Processing",
            JobStatus::Skipped => "Skipped",
            JobStatus::Failed => "Failed",
            JobStatus::Done => "Done",
            JobStatus::Canceled => "Canceled",
        };
        f.write_str(text)
    }
}

/// Events emitted by the execution engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A job changed state
    Job {
        /// Zero-based index into the job list
        index: usize,
        status: JobStatus,
        message: String,
    },
    /// Aggregate progress across the run
    Overall { current: usize, total: usize },
    /// Informational log line, including diagnostics from the toolchain
    Log { message: String },
    /// The run is over; emitted exactly once, normally or after cancellation
    Finished,
}
