//! Logging infrastructure: the rating audit trail.
//!
//! Provides [`JsonlRatingLogger`], an append-only JSONL writer that
//! implements the [`RatingEventLogger`](rater_application::RatingEventLogger)
//! port.

mod jsonl_logger;

pub use jsonl_logger::JsonlRatingLogger;
