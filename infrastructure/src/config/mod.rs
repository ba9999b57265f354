//! Configuration file loading for question-rater
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `RATER_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./rater.toml` or `./.rater.toml`
//! 4. Global: `$XDG_CONFIG_HOME/question-rater/config.toml`
//! 5. Default values
//!
//! Command-line flags are applied on top by the binary.

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDataConfig, FileLoggingConfig, FileOutputConfig,
    FileReplConfig, FileReviewersConfig,
};
pub use loader::ConfigLoader;
