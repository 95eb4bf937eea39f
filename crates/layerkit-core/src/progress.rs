//! Progress reporting and cancellation
//!
//! The reader never talks to a UI directly. Callers hand it a
//! [`ProgressReporter`] to display parse progress and a [`CancellationToken`]
//! that the reader polls once per line.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::types::ProgressCallback;

/// Receiver for parse progress updates.
///
/// Mirrors a status message with a progress bar: it is shown when parsing
/// starts, receives percentages in `0..=100`, and is hidden when parsing ends.
pub trait ProgressReporter: Send + Sync {
    /// Called once before the first line is parsed
    fn show(&self) {}

    /// Called with the completed percentage
    fn set_progress(&self, percent: u8);

    /// Called once parsing has finished or was cancelled
    fn hide(&self) {}
}

/// Progress reporter that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn set_progress(&self, _percent: u8) {}
}

/// Progress reporter forwarding percentages to a closure
pub struct CallbackProgress {
    callback: ProgressCallback,
}

impl CallbackProgress {
    /// Wrap a callback receiving the completed percentage
    pub fn new(callback: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl ProgressReporter for CallbackProgress {
    fn set_progress(&self, percent: u8) {
        (self.callback)(percent);
    }
}

impl std::fmt::Debug for CallbackProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackProgress").finish_non_exhaustive()
    }
}

/// One-way cancellation flag shared between a caller and a running parse.
///
/// Clones share the same flag. Once cancelled a token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            debug!("Cancellation requested");
        }
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU8;

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());

        token.cancel();
        assert!(observer.is_cancelled());

        // Cancelling twice is harmless
        token.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_callback_progress_forwards() {
        let last = Arc::new(AtomicU8::new(0));
        let sink = last.clone();
        let progress = CallbackProgress::new(move |p| sink.store(p, Ordering::SeqCst));

        progress.show();
        progress.set_progress(42);
        progress.hide();

        assert_eq!(last.load(Ordering::SeqCst), 42);
    }
}
