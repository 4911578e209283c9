//! Progress reporting for document parsing.
//!
//! [`ProgressCallback`] keeps the parser independent of how progress is
//! shown; the CLI renders it with `indicatif`, tests pass [`NullProgress`].

use std::sync::Arc;

/// Receives progress updates while pages are parsed.
///
/// Implementations must be `Send + Sync` so one reporter can be shared
/// behind an `Arc`.
pub trait ProgressCallback: Send + Sync {
    /// Sets the total number of pages (enables percentage/ETA).
    fn set_total(&self, total: u64);

    /// Advances by `delta` pages.
    fn inc(&self, delta: u64);

    /// Updates the message shown alongside the indicator.
    fn set_message(&self, msg: String);

    /// Marks the work as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`].
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
