//! REPL (Read-Eval-Print Loop) for interactive rating

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use crate::repl::command::{ReplCommand, ReplInput, help_text};
use colored::Colorize;
use rater_application::{RatingSession, RatingSessionError, ReviewSummary};
use rater_domain::{OutputFormat, Reviewer, Roster};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

/// Result of handling one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplOutcome {
    Continue(String),
    Exit(String),
}

/// Interactive rating REPL
pub struct RatingRepl {
    session: RatingSession,
    config: ReplConfig,
    /// Set after a /quit was refused because of unsaved ratings
    quit_warned: bool,
}

impl RatingRepl {
    pub fn new(session: RatingSession, config: ReplConfig) -> Self {
        Self {
            session,
            config,
            quit_warned: false,
        }
    }

    pub fn session(&self) -> &RatingSession {
        &self.session
    }

    /// Run the interactive REPL until /quit or end of input
    pub fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.resolved_history_file();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        if !self.config.quiet {
            self.print_welcome();
        }
        println!("{}", self.show_current());

        loop {
            let prompt = format!("{}> ", self.session.reviewer());
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim_start().starts_with('/') {
                        let _ = rl.add_history_entry(line.trim());
                    }
                    match self.handle_line(&line) {
                        ReplOutcome::Continue(text) => println!("{}", text),
                        ReplOutcome::Exit(text) => {
                            println!("{}", text);
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    if self.session.has_unsaved_changes() {
                        eprintln!(
                            "{}",
                            "Exiting with unsaved ratings; the last save failed.".yellow()
                        );
                    }
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│            Question Rating Session          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Reviewer:  {}", self.session.reviewer());
        println!("Questions: {}", self.session.questions().len());
        let (rated, total) = self.session.progress();
        println!("Rated:     {}/{}", rated, total);
        println!();
        println!("Type a rating from 1 to 5, or /help for commands.");
    }

    /// Handle one line of input and return the text to print
    pub fn handle_line(&mut self, line: &str) -> ReplOutcome {
        let input = ReplInput::parse(line);
        debug!("REPL input: {:?}", input);

        if !matches!(input, ReplInput::Command(ReplCommand::Quit)) {
            self.quit_warned = false;
        }

        match input {
            ReplInput::Rate(value) => ReplOutcome::Continue(self.commit(Some(value))),
            ReplInput::AcceptDefault => ReplOutcome::Continue(self.commit(None)),
            ReplInput::Command(command) => self.handle_command(command),
            ReplInput::Invalid(text) => ReplOutcome::Continue(format!(
                "{} '{}'. Type a rating from 1 to 5 or /help for commands.",
                "Not understood:".yellow(),
                text
            )),
        }
    }

    fn handle_command(&mut self, command: ReplCommand) -> ReplOutcome {
        let text = match command {
            ReplCommand::Quit => {
                if self.session.has_unsaved_changes() && !self.quit_warned {
                    self.quit_warned = true;
                    return ReplOutcome::Continue(format!(
                        "{}",
                        "The last save failed and ratings are unsaved. \
                         Use /save to retry, or /quit again to discard them."
                            .yellow()
                    ));
                }
                return ReplOutcome::Exit("Bye!".to_string());
            }
            ReplCommand::Next => {
                if self.session.advance() {
                    self.show_current()
                } else {
                    self.end_of_list_message()
                }
            }
            ReplCommand::Prev => {
                if self.session.back() {
                    self.show_current()
                } else {
                    "Already at the first question.".to_string()
                }
            }
            ReplCommand::Goto(number) => match self.session.goto(number).map(|_| ()) {
                Ok(()) => self.show_current(),
                Err(e) => Self::error_text(&e),
            },
            ReplCommand::Show => self.show_current(),
            ReplCommand::List => ConsoleFormatter::format_list(&self.session),
            ReplCommand::Reviewer(None) => self.roster_text(),
            ReplCommand::Reviewer(Some(name)) => {
                match self.session.switch_reviewer(&name).map(|r| r.name().to_string()) {
                    Ok(name) => format!("Now rating as {}.\n{}", name.bold(), self.show_current()),
                    Err(e) => Self::error_text(&e),
                }
            }
            ReplCommand::Save => {
                if !self.session.has_unsaved_changes() {
                    "Nothing to save; all ratings are on disk.".to_string()
                } else {
                    match self.session.save() {
                        Ok(()) => format!("{}", "Ratings saved successfully!".green().bold()),
                        Err(e) => Self::error_text(&e),
                    }
                }
            }
            ReplCommand::Summary => {
                let summary = ReviewSummary::build(
                    self.session.questions(),
                    self.session.store(),
                    self.session.roster(),
                );
                ConsoleFormatter::format_summary(&summary, OutputFormat::Summary)
            }
            ReplCommand::Help => help_text().to_string(),
        };
        ReplOutcome::Continue(text)
    }

    /// Commit `value`, or the offered default when `None`, then move on
    fn commit(&mut self, value: Option<i64>) -> String {
        let result = match value {
            Some(value) => self.session.commit(value),
            None => self.session.commit_default(),
        };

        match result {
            Ok(outcome) => {
                let mut text = ConsoleFormatter::format_commit(&outcome);
                if self.config.show_progress && !self.config.quiet {
                    let (rated, total) = self.session.progress();
                    text.push('\n');
                    text.push_str(&ConsoleFormatter::format_progress(rated, total));
                }
                text.push('\n');
                if self.session.advance() {
                    text.push_str(&self.show_current());
                } else {
                    text.push_str(&self.end_of_list_message());
                }
                text
            }
            Err(e @ RatingSessionError::Save(_)) => format!(
                "{}\n{}",
                Self::error_text(&e),
                "The rating is kept in memory; use /save to retry.".yellow()
            ),
            Err(e) => Self::error_text(&e),
        }
    }

    fn show_current(&self) -> String {
        match self.session.current() {
            Some(question) => ConsoleFormatter::format_question(
                question,
                self.session.position() + 1,
                self.session.questions().len(),
                self.session.current_rating(),
            ),
            None => format!("{}", "No questions available.".yellow()),
        }
    }

    fn end_of_list_message(&self) -> String {
        let (rated, total) = self.session.progress();
        format!(
            "That was the last question ({} of {} rated). Use /list, /goto <n> or /quit.",
            rated, total
        )
    }

    fn roster_text(&self) -> String {
        let names: Vec<String> = self
            .session
            .roster()
            .iter()
            .map(|r| {
                if r == self.session.reviewer() {
                    format!("{} (current)", r.name().bold())
                } else {
                    r.name().to_string()
                }
            })
            .collect();
        format!("Reviewers: {}", names.join(", "))
    }

    fn error_text(error: &RatingSessionError) -> String {
        format!("{} {}", "Error:".red().bold(), error)
    }
}

/// Ask the operator to pick a reviewer from the roster.
///
/// A single-member roster is selected without asking. Returns `None` when
/// input ends before a valid name is entered.
pub fn select_reviewer(roster: &Roster) -> RlResult<Option<Reviewer>> {
    if roster.len() == 1 {
        return Ok(Some(roster.first().clone()));
    }

    let mut rl = DefaultEditor::new()?;
    let prompt = format!("Select reviewer ({}): ", roster);
    loop {
        match rl.readline(&prompt) {
            Ok(line) => match roster.find(&line) {
                Ok(reviewer) => return Ok(Some(reviewer.clone())),
                Err(e) => eprintln!("{}", e),
            },
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rater_domain::{
        Question, QuestionId, Rating, RatingRepository, RatingStore, StorageError,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryRepository {
        saved: Mutex<RatingStore>,
        fail_saves: AtomicBool,
    }

    impl RatingRepository for MemoryRepository {
        fn load(&self) -> Result<RatingStore, StorageError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, store: &RatingStore) -> Result<(), StorageError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::Write {
                    location: "memory".to_string(),
                    reason: "disk full".to_string(),
                });
            }
            *self.saved.lock().unwrap() = store.clone();
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    fn repl(repo: &Arc<MemoryRepository>) -> RatingRepl {
        colored::control::set_override(false);
        let questions = ["q1", "q2"]
            .iter()
            .map(|id| Question::new(QuestionId::new(*id).unwrap(), format!("Text {id}"), "mcq"))
            .collect();
        let session =
            RatingSession::open(repo.clone(), questions, Roster::default(), "Sarah").unwrap();
        RatingRepl::new(session, ReplConfig::default())
    }

    fn text(outcome: ReplOutcome) -> String {
        match outcome {
            ReplOutcome::Continue(text) | ReplOutcome::Exit(text) => text,
        }
    }

    fn saved_rating(repo: &MemoryRepository, q: &str, reviewer: &str) -> Option<Rating> {
        repo.saved.lock().unwrap().get_rating(
            &QuestionId::new(q).unwrap(),
            &Reviewer::new(reviewer).unwrap(),
        )
    }

    #[test]
    fn test_rating_saves_and_advances() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);

        let out = text(repl.handle_line("4"));
        assert!(out.contains("Rating saved successfully! Sarah rated q1 as 4"));
        assert!(out.contains("Rated 1/2"));
        assert!(out.contains("Question 2/2 (ID: q2)"));
        assert_eq!(saved_rating(&repo, "q1", "Sarah"), Rating::new(4).ok());
    }

    #[test]
    fn test_enter_saves_default_of_three() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);

        repl.handle_line("");
        assert_eq!(saved_rating(&repo, "q1", "Sarah"), Rating::new(3).ok());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);

        let out = text(repl.handle_line("7"));
        assert!(out.contains("Error: Rating must be between 1 and 5, got 7"));
        assert_eq!(repl.session().position(), 0);
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_last_question_stays_put() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);

        repl.handle_line("/goto 2");
        let out = text(repl.handle_line("5"));
        assert!(out.contains("That was the last question (1 of 2 rated)"));
        assert_eq!(repl.session().position(), 1);
    }

    #[test]
    fn test_failed_save_blocks_first_quit() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);
        repo.fail_saves.store(true, Ordering::SeqCst);

        let out = text(repl.handle_line("2"));
        assert!(out.contains("Failed to save ratings"));
        assert!(out.contains("/save to retry"));

        assert!(matches!(repl.handle_line("/quit"), ReplOutcome::Continue(_)));
        assert!(matches!(repl.handle_line("/quit"), ReplOutcome::Exit(_)));
    }

    #[test]
    fn test_save_retry_after_failure() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);
        repo.fail_saves.store(true, Ordering::SeqCst);
        repl.handle_line("2");

        repo.fail_saves.store(false, Ordering::SeqCst);
        let out = text(repl.handle_line("/save"));
        assert!(out.contains("Ratings saved successfully!"));
        assert_eq!(saved_rating(&repo, "q1", "Sarah"), Rating::new(2).ok());
        assert!(matches!(repl.handle_line("/quit"), ReplOutcome::Exit(_)));
    }

    #[test]
    fn test_switch_to_multi_word_reviewer() {
        colored::control::set_override(false);
        let repo = Arc::new(MemoryRepository::default());
        let questions = vec![Question::new(QuestionId::new("q1").unwrap(), "Text", "mcq")];
        let roster = Roster::new(["Sarah", "Mary Ann"]).unwrap();
        let session = RatingSession::open(repo.clone(), questions, roster, "Sarah").unwrap();
        let mut repl = RatingRepl::new(session, ReplConfig::default());

        let out = text(repl.handle_line("/reviewer mary ann"));
        assert!(out.contains("Now rating as Mary Ann."));
        assert_eq!(repl.session().reviewer().name(), "Mary Ann");

        repl.handle_line("4");
        assert_eq!(saved_rating(&repo, "q1", "Mary Ann"), Rating::new(4).ok());
    }

    #[test]
    fn test_switch_reviewer() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);
        repl.handle_line("4");
        repl.handle_line("/prev");

        let out = text(repl.handle_line("/reviewer dom"));
        assert!(out.contains("Now rating as Dom."));
        assert!(!out.contains("Your current rating"));

        repl.handle_line("1");
        assert_eq!(saved_rating(&repo, "q1", "Sarah"), Rating::new(4).ok());
        assert_eq!(saved_rating(&repo, "q1", "Dom"), Rating::new(1).ok());

        let out = text(repl.handle_line("/reviewer Alex"));
        assert!(out.contains("Unknown reviewer 'Alex'"));
        assert!(text(repl.handle_line("/reviewer")).contains("Dom (current)"));
    }

    #[test]
    fn test_navigation_messages() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);

        assert!(text(repl.handle_line("/prev")).contains("Already at the first question."));
        assert!(text(repl.handle_line("/goto 9")).contains("out of range (1-2)"));
        assert!(text(repl.handle_line("/next")).contains("Question 2/2"));
        assert!(text(repl.handle_line("/next")).contains("That was the last question"));
    }

    #[test]
    fn test_list_and_summary() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);
        repl.handle_line("5");

        let list = text(repl.handle_line("/list"));
        assert!(list.contains("  1. [5] Text q1"));
        assert!(list.contains(">   2. [-] Text q2"));

        let summary = text(repl.handle_line("/summary"));
        assert!(summary.contains("Sarah        rated    1  mean 5.00"));
    }

    #[test]
    fn test_invalid_input_and_help() {
        let repo = Arc::new(MemoryRepository::default());
        let mut repl = repl(&repo);

        assert!(text(repl.handle_line("excellent")).contains("Not understood: 'excellent'"));
        assert!(text(repl.handle_line("/help")).contains("/reviewer <name>"));
        assert!(matches!(repl.handle_line("/q"), ReplOutcome::Exit(_)));
    }

    #[test]
    fn test_single_member_roster_is_selected_without_prompt() {
        let roster = Roster::new(["Solo"]).unwrap();
        let selected = select_reviewer(&roster).unwrap();
        assert_eq!(selected.unwrap().name(), "Solo");
    }
}
