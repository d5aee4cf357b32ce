//! Cooperative cancellation
//!
//! The controller and the worker share a single [`CancelToken`]. The flag
//! only ever transitions false to true, once per run; no other mutable state
//! crosses the thread boundary. Cancelling also terminates the in-flight
//! external process so the user is not stuck waiting on a large file.

use std::process::Child;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Default)]
struct CancelInner {
    requested: AtomicBool,
    in_flight: Mutex<Option<Child>>,
}

/// Shared handle used to request cancellation of a run
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    /// Create a fresh token for one run
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    ///
    /// Sets the flag checked at job boundaries and kills the in-flight
    /// external process, if any. The worker still reaps the process.
    pub fn cancel(&self) {
        self.inner.requested.store(true, Ordering::SeqCst);
        if let Ok(mut guard) = self.inner.in_flight.lock() {
            if let Some(child) = guard.as_mut() {
                debug!(pid = child.id(), "terminating in-flight process");
                let _ = child.kill();
            }
        }
    }

    /// Whether cancellation has been requested
    pub fn is_canceled(&self) -> bool {
        self.inner.requested.load(Ordering::SeqCst)
    }

    /// Register the currently running external process.
    ///
    /// A cancellation that lands between spawn and registration finds
    /// nothing to kill, so the flag is re-checked here while the lock is
    /// held; the worker still reaps the killed child.
    pub(crate) fn set_in_flight(&self, child: Child) {
        if let Ok(mut guard) = self.inner.in_flight.lock() {
            *guard = Some(child);
            if self.inner.requested.load(Ordering::SeqCst) {
                if let Some(child) = guard.as_mut() {
                    debug!(pid = child.id(), "terminating process registered after cancel");
                    let _ = child.kill();
                }
            }
        }
    }

    /// Reclaim the in-flight process for reaping
    pub(crate) fn take_in_flight(&self) -> Option<Child> {
        self.inner.in_flight.lock().ok().and_then(|mut g| g.take())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_monotonic() {
        let token = CancelToken::new();
        assert!(!token.is_canceled());

        token.cancel();
        assert!(token.is_canceled());

        token.cancel();
        assert!(token.is_canceled());
    }

    #[test]
    fn test_clones_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();

        clone.cancel();
        assert!(token.is_canceled());
    }

    #[test]
    #[cfg(unix)]
    fn test_child_registered_after_cancel_is_killed() {
        use std::process::Command;

        let token = CancelToken::new();
        token.cancel();

        // The cancel landed before the process existed; registration must
        // still terminate it.
        let child = Command::new("sleep").arg("30").spawn().unwrap();
        token.set_in_flight(child);

        let mut child = token.take_in_flight().unwrap();
        let status = child.wait().unwrap();
        assert!(!status.success());
    }
}
