//! Interactive rating REPL

mod command;
mod rating_repl;

pub use command::{ReplCommand, ReplInput, help_text};
pub use rating_repl::{RatingRepl, ReplOutcome, select_reviewer};
