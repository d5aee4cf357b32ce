//! Core execution engine module

pub mod cancel;
pub mod events;
pub mod runner;

pub use cancel::CancelToken;
pub use events::{EngineEvent, JobStatus};
pub use runner::{should_skip, Engine, RunRequest, DURATION_EPSILON};
