//! Port for the rating audit trail.
//!
//! Defines the [`RatingEventLogger`] trait for recording what happened during
//! a rating session (session start, committed ratings, failed saves) to a
//! structured log.
//!
//! This is separate from `tracing`-based diagnostics: tracing handles
//! human-readable messages, while this port keeps a machine-readable record
//! of every rating change, including the value it replaced.

use serde_json::Value;

/// A structured rating event for logging.
pub struct RatingEvent {
    /// Event type identifier (e.g., "session_started", "rating_committed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RatingEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging rating events to a structured log.
///
/// `log` is synchronous and infallible; a broken audit log must never stop a
/// reviewer from saving ratings.
pub trait RatingEventLogger: Send + Sync {
    /// Record a rating event.
    fn log(&self, event: RatingEvent);
}

/// No-op implementation for tests and when the audit log is disabled.
pub struct NoRatingEventLogger;

impl RatingEventLogger for NoRatingEventLogger {
    fn log(&self, _event: RatingEvent) {}
}
