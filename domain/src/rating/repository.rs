//! Rating repository trait

use crate::rating::store::RatingStore;
use thiserror::Error;

/// Errors raised while reading or writing durable rating storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Ratings storage at {location} is malformed: {reason}")]
    Malformed { location: String, reason: String },

    #[error("Could not serialize ratings: {0}")]
    Serialize(String),

    #[error("Could not write ratings to {location}: {reason}")]
    Write { location: String, reason: String },
}

/// Repository trait for the rating store
///
/// This is a domain-level abstraction for durable storage of the whole
/// mapping. Implementations live in the infrastructure layer.
///
/// - `load` returns an empty store when nothing has been saved yet, and
///   fails with [`StorageError::Malformed`] when stored data cannot be read
///   back as ratings.
/// - `save` replaces the previous contents entirely.
pub trait RatingRepository: Send + Sync {
    /// Read the full mapping from storage
    fn load(&self) -> Result<RatingStore, StorageError>;

    /// Overwrite storage with the full mapping
    fn save(&self, store: &RatingStore) -> Result<(), StorageError>;

    /// Human-readable description of where ratings live (e.g. a file path)
    fn location(&self) -> String;
}
