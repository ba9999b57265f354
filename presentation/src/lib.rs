//! Presentation layer for question-rater
//!
//! This crate contains the CLI definition, console output formatting and the
//! interactive rating REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use repl::{RatingRepl, select_reviewer};
