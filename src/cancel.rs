//! Cooperative cancellation for blocking remote calls.
//!
//! [`CancelToken`] wraps an `Arc<AtomicBool>` and exposes only the
//! operations the reconciler needs: [`CancelToken::cancel`] (called from the
//! Ctrl-C handler) and [`CancelToken::is_cancelled`].  [`CancelToken::run`]
//! moves a blocking call onto a worker thread so the caller can abandon it
//! as soon as the token fires.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crate::error::RemoteError;

/// How often a waiting caller re-checks the token.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A cheaply-clonable cancellation flag shared between the signal handler
/// and every in-flight remote call.
#[derive(Debug, Clone)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the "not cancelled" state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation of every call observing this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`Self::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Run `call` on a worker thread, returning early with
    /// [`RemoteError::Cancelled`] if the token fires before it completes.
    ///
    /// A token that is already cancelled never starts the call.  An
    /// abandoned worker is left to finish on its own and its result is
    /// dropped, so a cancelled write may still reach the service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Cancelled`] on cancellation, a
    /// [`RemoteError::Transport`] if the worker cannot be spawned or dies,
    /// and otherwise whatever `call` returns.
    pub fn run<T, F>(&self, call: F) -> Result<T, RemoteError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, RemoteError> + Send + 'static,
    {
        if self.is_cancelled() {
            return Err(RemoteError::Cancelled);
        }

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("idp-remote-call".to_string())
            .spawn(move || {
                tx.send(call()).ok();
            })
            .map_err(|e| RemoteError::Transport(format!("spawn request worker: {e}")))?;

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(result) => return result,
                Err(RecvTimeoutError::Timeout) => {
                    if self.is_cancelled() {
                        return Err(RemoteError::Cancelled);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(RemoteError::Transport(
                        "request worker exited without a result".to_string(),
                    ));
                }
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
