//! Parsing of REPL input lines

/// A slash command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Next,
    Prev,
    /// One-based question number
    Goto(usize),
    /// Redisplay the current question
    Show,
    List,
    /// Switch reviewer, or show the roster when no name is given
    Reviewer(Option<String>),
    /// Retry a failed save
    Save,
    Summary,
    Help,
    Quit,
}

/// What a line of input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    /// Commit this value (range is checked by the session)
    Rate(i64),
    /// Empty line: commit the value currently offered
    AcceptDefault,
    Command(ReplCommand),
    /// Input that is neither a number nor a known command
    Invalid(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return ReplInput::AcceptDefault;
        }

        if let Some(rest) = line.strip_prefix('/') {
            // Everything after the command word is one argument; reviewer
            // names may contain spaces
            let (name, arg) = match rest.split_once(char::is_whitespace) {
                Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
                None => (rest, None),
            };

            let command = match (name, arg) {
                ("next" | "n" | "skip", None) => ReplCommand::Next,
                ("prev" | "p" | "back", None) => ReplCommand::Prev,
                ("goto" | "g", Some(n)) => match n.parse::<usize>() {
                    Ok(number) => ReplCommand::Goto(number),
                    Err(_) => return ReplInput::Invalid(line.to_string()),
                },
                ("show" | "s", None) => ReplCommand::Show,
                ("list" | "l", None) => ReplCommand::List,
                ("reviewer" | "r", name) => ReplCommand::Reviewer(name.map(str::to_string)),
                ("save", None) => ReplCommand::Save,
                ("summary", None) => ReplCommand::Summary,
                ("help" | "h" | "?", None) => ReplCommand::Help,
                ("quit" | "exit" | "q", None) => ReplCommand::Quit,
                _ => return ReplInput::Invalid(line.to_string()),
            };
            return ReplInput::Command(command);
        }

        match line.parse::<i64>() {
            Ok(value) => ReplInput::Rate(value),
            Err(_) => ReplInput::Invalid(line.to_string()),
        }
    }
}

/// Help text listing every command
pub fn help_text() -> &'static str {
    "\
Rating:
  1-5               Save that rating for the current question
  <Enter>           Save the shown default (last saved rating, or 3)

Commands:
  /next, /n, /skip  Go to the next question without rating
  /prev, /p, /back  Go to the previous question
  /goto <n>, /g <n> Jump to question number n
  /show, /s         Show the current question again
  /list, /l         List all questions with your ratings
  /reviewer <name>  Switch reviewer (no name: show the roster)
  /save             Retry saving after a failed save
  /summary          Show ratings totals for every reviewer
  /help, /h, /?     Show this help
  /quit, /exit, /q  Exit"
}
