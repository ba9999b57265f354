//! Question catalog port
//!
//! Defines the read-only source of questions for a session.

use rater_domain::Question;
use thiserror::Error;

/// Errors raised while reading the question dataset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Questions file not found: {0}")]
    NotFound(String),

    #[error("Could not read questions from {location}: {reason}")]
    Read { location: String, reason: String },

    #[error("Questions source {location} is malformed: {reason}")]
    Malformed { location: String, reason: String },
}

impl CatalogError {
    /// Check if the source simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

/// Read-only access to the question dataset
///
/// Implementations return questions in dataset order. A missing source is
/// reported as [`CatalogError::NotFound`] so the caller can tell the operator
/// and carry on with an empty list.
pub trait QuestionCatalog: Send + Sync {
    /// Load every question, in dataset order
    fn questions(&self) -> Result<Vec<Question>, CatalogError>;

    /// Human-readable description of the source (e.g. a file path)
    fn location(&self) -> String;
}
