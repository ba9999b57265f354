//! Domain layer for question-rater
//!
//! This crate contains the core entities and value objects of the rating
//! tool. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! - **Question**: a read-only record from the question dataset
//! - **Reviewer**: a named identity drawn from a fixed [`Roster`]
//! - **Rating**: an integer score in `1..=5`
//! - **RatingStore**: question id → reviewer → rating, the only mutable
//!   state of a session
//!
//! Persistence of the store is abstracted behind [`RatingRepository`];
//! implementations live in the infrastructure layer.

pub mod config;
pub mod core;
pub mod rating;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    question::{Question, QuestionId},
    rating::Rating,
    reviewer::{Reviewer, Roster},
    string::truncate,
};
pub use rating::{
    repository::{RatingRepository, StorageError},
    store::{RatingEntry, RatingStore},
};
