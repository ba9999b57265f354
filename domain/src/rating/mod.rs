//! Rating subdomain.
//!
//! - [`store::RatingStore`]: the in-memory question → reviewer → rating map
//! - [`store::RatingEntry`]: one question's ratings, keyed by reviewer
//! - [`repository::RatingRepository`]: trait for durable load/save

pub mod repository;
pub mod store;
