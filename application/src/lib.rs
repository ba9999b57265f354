//! Application layer for question-rater
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    question_catalog::{CatalogError, QuestionCatalog},
    rating_event_logger::{NoRatingEventLogger, RatingEvent, RatingEventLogger},
};
pub use use_cases::load_questions::{LoadedQuestions, load_questions};
pub use use_cases::rating_session::{CommitOutcome, RatingSession, RatingSessionError};
pub use use_cases::review_summary::{ReviewRow, ReviewSummary, ReviewerTotals};
