//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i64),

    #[error("'{0}' is not a rating (expected a whole number from 1 to 5)")]
    UnparsableRating(String),

    #[error("Reviewer name cannot be empty")]
    EmptyReviewerName,

    #[error("Reviewer name '{0}' has leading or trailing whitespace")]
    UntrimmedReviewerName(String),

    #[error("Unknown reviewer '{name}' (expected one of: {roster})")]
    UnknownReviewer { name: String, roster: String },

    #[error("Reviewer roster cannot be empty")]
    EmptyRoster,

    #[error("Reviewer '{0}' appears more than once in the roster")]
    DuplicateReviewer(String),

    #[error("Question id cannot be empty")]
    EmptyQuestionId,
}

impl DomainError {
    /// Check if this error was caused by an out-of-range rating
    pub fn is_invalid_rating(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidRating(_) | DomainError::UnparsableRating(_)
        )
    }
}
