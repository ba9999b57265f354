//! Core domain concepts shared across the rating subdomain.
//!
//! - [`question::Question`]: a question from the dataset
//! - [`reviewer::Reviewer`] / [`reviewer::Roster`]: who may rate
//! - [`rating::Rating`]: a validated 1–5 score
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod question;
pub mod rating;
pub mod reviewer;
pub mod string;
