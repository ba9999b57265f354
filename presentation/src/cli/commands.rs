//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for `--summary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every question with each reviewer's rating
    Full,
    /// Totals per reviewer only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for rater_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => rater_domain::OutputFormat::Full,
            OutputFormat::Summary => rater_domain::OutputFormat::Summary,
            OutputFormat::Json => rater_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for question-rater
#[derive(Parser, Debug)]
#[command(name = "question-rater")]
#[command(author, version, about = "Rate a question dataset from 1 to 5, one reviewer at a time")]
#[command(long_about = r#"
question-rater walks a reviewer through a question dataset and records a
1-5 rating per question. Every committed rating rewrites the ratings file.

In the interactive session:
  1-5      Commit that rating for the current question
  <Enter>  Commit the shown default (last saved rating, or 3)
  /help    List the other commands

Configuration files are loaded from (in priority order):
1. RATER_* environment variables
2. --config <path>     Explicit config file
3. ./rater.toml or ./.rater.toml
4. ~/.config/question-rater/config.toml

Example:
  question-rater --reviewer Sarah
  question-rater --questions data/questions.json --ratings data/ratings.json
  question-rater --summary -o json
"#)]
pub struct Cli {
    /// Reviewer to rate as (must be in the configured roster)
    #[arg(short, long, value_name = "NAME")]
    pub reviewer: Option<String>,

    /// Path to the questions JSON file
    #[arg(long, value_name = "PATH")]
    pub questions: Option<PathBuf>,

    /// Path to the ratings JSON file
    #[arg(long, value_name = "PATH")]
    pub ratings: Option<PathBuf>,

    /// Print a review of all stored ratings and exit
    #[arg(short, long)]
    pub summary: bool,

    /// Output format for --summary
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the banner and progress lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
