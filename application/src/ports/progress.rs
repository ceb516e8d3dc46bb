//! Progress notification port
//!
//! Defines the interface for reporting progress while a prompt is in flight.

/// Callback for progress updates during a single chat turn
///
/// Implementations live in the presentation layer (e.g. a spinner).
pub trait TurnProgress: Send + Sync {
    /// Called right before the request is sent
    fn on_request_start(&self);

    /// Called once the service outcome is known, before logging
    fn on_request_complete(&self, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl TurnProgress for NoProgress {
    fn on_request_start(&self) {}
    fn on_request_complete(&self, _success: bool) {}
}
