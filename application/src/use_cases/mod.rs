//! Use cases (application services)

pub mod load_questions;
pub mod rating_session;
pub mod review_summary;
