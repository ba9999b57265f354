//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use rater_domain::OutputFormat;
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show "rated x/y" after each commit
    pub show_progress: bool,
    /// Suppress the welcome banner
    pub quiet: bool,
    /// Path to history file; falls back to the platform data directory
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            quiet: false,
            history_file: None,
        }
    }
}

impl ReplConfig {
    /// History file to use: the configured one, else
    /// `<data dir>/question-rater/history.txt`
    pub fn resolved_history_file(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("question-rater").join("history.txt"))
        })
    }
}
