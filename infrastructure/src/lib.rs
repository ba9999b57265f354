//! Infrastructure layer for question-rater
//!
//! This crate contains adapters that implement the ports defined in the
//! domain and application layers: JSON file storage for ratings and
//! questions, configuration file loading, and the JSONL rating log.

pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileDataConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, FileReviewersConfig,
};
pub use logging::JsonlRatingLogger;
pub use storage::{JsonQuestionCatalog, JsonRatingRepository};
