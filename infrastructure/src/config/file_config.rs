//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use rater_domain::{DomainError, OutputFormat, Roster};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("{0} cannot be empty")]
    EmptyPath(&'static str),

    #[error("invalid reviewer roster: {0}")]
    InvalidRoster(#[from] DomainError),

    #[error("default reviewer '{name}' is not in the roster ({roster})")]
    UnknownDefaultReviewer { name: String, roster: String },
}

/// Raw data file configuration (`[data]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// Question dataset (JSON array)
    pub questions_file: PathBuf,
    /// Ratings store (JSON object), rewritten on every save
    pub ratings_file: PathBuf,
}

impl Default for FileDataConfig {
    fn default() -> Self {
        Self {
            questions_file: PathBuf::from("cleaned_questions.json"),
            ratings_file: PathBuf::from("ratings.json"),
        }
    }
}

/// Raw reviewer configuration (`[reviewers]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReviewersConfig {
    /// Everyone who may rate, in display order
    pub names: Vec<String>,
    /// Reviewer selected when none is given on the command line
    pub default: Option<String>,
}

impl Default for FileReviewersConfig {
    fn default() -> Self {
        Self {
            names: Roster::default_names(),
            default: None,
        }
    }
}

/// Raw output configuration (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format for `--summary` (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw REPL configuration (`[repl]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show "rated x/y" after each commit
    pub show_progress: bool,
    /// Path to history file
    pub history_file: Option<PathBuf>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
        }
    }
}

/// Raw logging configuration (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostics to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Append every committed rating to this JSONL file
    pub rating_log: Option<PathBuf>,
}

/// Complete configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub data: FileDataConfig,
    pub reviewers: FileReviewersConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check the merged configuration before a session starts
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.data.questions_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("data.questions_file"));
        }
        if self.data.ratings_file.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("data.ratings_file"));
        }

        let roster = self.roster()?;
        if let Some(name) = &self.reviewers.default
            && roster.find(name).is_err()
        {
            return Err(ConfigValidationError::UnknownDefaultReviewer {
                name: name.clone(),
                roster: roster.to_string(),
            });
        }
        Ok(())
    }

    /// Build the reviewer roster from `[reviewers] names`
    pub fn roster(&self) -> Result<Roster, ConfigValidationError> {
        Ok(Roster::new(self.reviewers.names.iter().cloned())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(
            config.data.questions_file,
            PathBuf::from("cleaned_questions.json")
        );
        assert_eq!(config.data.ratings_file, PathBuf::from("ratings.json"));
        assert_eq!(config.reviewers.names, vec!["Sarah", "Dom"]);
        assert!(config.reviewers.default.is_none());
        assert!(config.output.color);
        assert!(config.repl.show_progress);
        assert!(config.logging.rating_log.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_toml() {
        let toml_str = r#"
[data]
questions_file = "data/questions.json"
ratings_file = "data/ratings.json"

[reviewers]
names = ["Ana", "Ben"]
default = "ben"

[output]
format = "json"
color = false

[repl]
show_progress = false
history_file = "/tmp/rater_history"

[logging]
rating_log = "ratings.log.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.data.questions_file,
            PathBuf::from("data/questions.json")
        );
        assert_eq!(config.reviewers.names, vec!["Ana", "Ben"]);
        assert_eq!(config.reviewers.default.as_deref(), Some("ben"));
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
        assert!(!config.repl.show_progress);
        assert_eq!(
            config.repl.history_file,
            Some(PathBuf::from("/tmp/rater_history"))
        );
        assert_eq!(
            config.logging.rating_log,
            Some(PathBuf::from("ratings.log.jsonl"))
        );
        assert!(config.validate().is_ok());
        assert_eq!(config.roster().unwrap().to_string(), "Ana, Ben");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FileConfig = toml::from_str("[output]\ncolor = false\n").unwrap();
        assert!(!config.output.color);
        assert_eq!(config.data.ratings_file, PathBuf::from("ratings.json"));
        assert_eq!(config.reviewers.names, vec!["Sarah", "Dom"]);
    }

    #[test]
    fn test_validate_rejects_bad_roster() {
        let mut config = FileConfig::default();
        config.reviewers.names = vec![];
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRoster(DomainError::EmptyRoster))
        ));

        config.reviewers.names = vec!["Sarah".to_string(), "sarah".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRoster(
                DomainError::DuplicateReviewer(_)
            ))
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_default_reviewer() {
        let mut config = FileConfig::default();
        config.reviewers.default = Some("Alex".to_string());
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "default reviewer 'Alex' is not in the roster (Sarah, Dom)"
        );
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let mut config = FileConfig::default();
        config.data.ratings_file = PathBuf::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyPath("data.ratings_file"))
        ));
    }
}
