//! CLI entrypoint for question-rater
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use rater_application::{RatingSession, ReviewSummary, load_questions};
use rater_domain::{RatingRepository, Roster};
use rater_infrastructure::{
    ConfigLoader, FileConfig, JsonQuestionCatalog, JsonRatingRepository, JsonlRatingLogger,
};
use rater_presentation::{
    Cli, ConsoleFormatter, OutputConfig, RatingRepl, ReplConfig, select_reviewer,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        println!("{}", ConfigLoader::describe_sources(cli.config.as_deref()));
        return Ok(());
    }

    // Load configuration before logging so [logging].file can apply
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&mut config, &cli);

    // Keep the guard alive for the whole run so buffered log lines are flushed
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    info!("Starting question-rater");

    config.validate().context("Invalid configuration")?;
    let roster = config.roster()?;

    let output_config = OutputConfig {
        format: config.output.format.unwrap_or_default(),
        color: config.output.color,
    };
    if !output_config.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let catalog = JsonQuestionCatalog::new(&config.data.questions_file);
    let loaded = load_questions(&catalog)?;
    if let Some(missing) = &loaded.missing_source {
        eprintln!("Questions file not found: {}", missing);
    }

    let repository: Arc<dyn RatingRepository> =
        Arc::new(JsonRatingRepository::new(&config.data.ratings_file));

    // Summary mode; stored ratings are listed even without a dataset
    if cli.summary {
        let store = repository.load()?;
        let summary = ReviewSummary::build(&loaded.questions, &store, &roster);
        print!(
            "{}",
            ConsoleFormatter::format_summary(&summary, output_config.format)
        );
        return Ok(());
    }

    if loaded.is_empty() {
        println!("No questions available.");
        return Ok(());
    }

    let Some(reviewer) = choose_reviewer(&cli, &config, &roster)? else {
        println!("No reviewer selected.");
        return Ok(());
    };

    let mut session =
        RatingSession::open(repository, loaded.questions, roster, &reviewer)?;
    if let Some(path) = &config.logging.rating_log {
        match JsonlRatingLogger::open(path) {
            Some(logger) => session = session.with_event_logger(Arc::new(logger)),
            None => warn!("Rating log disabled; could not open {}", path.display()),
        }
    }

    let repl_config = ReplConfig {
        show_progress: config.repl.show_progress,
        quiet: cli.quiet,
        history_file: config.repl.history_file.clone(),
    };

    let mut repl = RatingRepl::new(session, repl_config);
    repl.run()?;

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(path) = &cli.questions {
        config.data.questions_file = path.clone();
    }
    if let Some(path) = &cli.ratings {
        config.data.ratings_file = path.clone();
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if cli.no_color {
        config.output.color = false;
    }
    if let Some(path) = &cli.log_file {
        config.logging.file = Some(path.clone());
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let (dir, file_name) = match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) if !dir.as_os_str().is_empty() => (dir, name),
        (_, Some(name)) => (Path::new("."), name),
        _ => bail!("Invalid log file path: {}", path.display()),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Reviewer from `--reviewer`, else the configured default, else ask
fn choose_reviewer(cli: &Cli, config: &FileConfig, roster: &Roster) -> Result<Option<String>> {
    if let Some(name) = cli.reviewer.as_ref().or(config.reviewers.default.as_ref()) {
        let reviewer = roster.find(name)?;
        return Ok(Some(reviewer.name().to_string()));
    }
    let selected = select_reviewer(roster).context("Failed to read reviewer selection")?;
    Ok(selected.map(|r| r.name().to_string()))
}
