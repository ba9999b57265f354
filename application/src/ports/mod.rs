//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The rating repository port lives in the domain layer alongside the store
//! it persists.

pub mod question_catalog;
pub mod rating_event_logger;
