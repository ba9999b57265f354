//! File-backed storage adapters
//!
//! - [`JsonRatingRepository`] implements
//!   [`RatingRepository`](rater_domain::RatingRepository) over a JSON file
//! - [`JsonQuestionCatalog`] implements
//!   [`QuestionCatalog`](rater_application::QuestionCatalog) over a JSON file

mod json_question_catalog;
mod json_rating_repository;

pub use json_question_catalog::JsonQuestionCatalog;
pub use json_rating_repository::JsonRatingRepository;
