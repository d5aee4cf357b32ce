//! Headtrim library
//!
//! Batch-processes a folder of MP4 files by invoking the FFmpeg toolchain to
//! stream-copy a fixed duration off the start of each file. The engine runs
//! jobs strictly in order on a worker thread, reports progress through plain
//! events, and supports cooperative cancellation that stops after the
//! in-flight file.

pub mod cli;
pub mod discover;
pub mod engine;
pub mod error;
pub mod planner;
pub mod probe;
pub mod toolchain;

// Re-export commonly used types
pub use engine::{CancelToken, Engine, EngineEvent, JobStatus, RunRequest};
pub use error::{TrimError, TrimResult};
pub use planner::{JobDescriptor, RunSettings};
pub use toolchain::ToolchainPaths;
