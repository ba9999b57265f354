//! Console output formatter for questions, commits and rating reviews

use colored::Colorize;
use rater_application::{CommitOutcome, RatingSession, ReviewSummary};
use rater_domain::{OutputFormat, Question, Rating, truncate};

const LIST_TEXT_WIDTH: usize = 60;

/// Formats rating-session output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format one question the way the reviewer sees it before rating
    ///
    /// `number` is one-based.
    pub fn format_question(
        question: &Question,
        number: usize,
        total: usize,
        current: Option<Rating>,
    ) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "Question {}/{} (ID: {})",
            number,
            total,
            question.id()
        )));
        output.push_str(&format!("\n{}\n\n", question.text().bold()));

        output.push_str(&format!(
            "{} {}\n",
            "Type:".cyan().bold(),
            question.question_type()
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Explanation:".cyan().bold(),
            question.explanation().unwrap_or("No explanation provided.")
        ));

        if question.has_answer_options() {
            output.push_str(&format!("\n{}\n", "Answer Options:".cyan().bold()));
            for (i, option) in question.answer_options().iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, option));
            }
        }

        output.push('\n');
        if let Some(rating) = current {
            output.push_str(&format!(
                "{} {}\n",
                "Your current rating:".green().bold(),
                rating
            ));
        }
        output.push_str(&Self::rating_hint(current.unwrap_or_default()));
        output
    }

    /// The input hint shown under each question
    pub fn rating_hint(default: Rating) -> String {
        format!(
            "{}\n",
            format!(
                "Rate {}-{} and press Enter (Enter alone saves {})",
                Rating::MIN,
                Rating::MAX,
                default
            )
            .dimmed()
        )
    }

    /// Confirmation printed after a successful commit
    pub fn format_commit(outcome: &CommitOutcome) -> String {
        let detail = match outcome.previous {
            Some(previous) if previous != outcome.rating => {
                format!(" (was {})", previous)
            }
            Some(_) => " (unchanged)".to_string(),
            None => String::new(),
        };
        format!(
            "{} {} rated {} as {}{}",
            "Rating saved successfully!".green().bold(),
            outcome.reviewer,
            outcome.question_id,
            outcome.rating,
            detail
        )
    }

    /// "Rated x/y" progress line
    pub fn format_progress(rated: usize, total: usize) -> String {
        format!("Rated {}/{}", rated, total).dimmed().to_string()
    }

    /// Numbered list of all questions with the reviewer's ratings
    pub fn format_list(session: &RatingSession) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header(&format!(
            "Questions ({})",
            session.reviewer()
        )));
        output.push('\n');

        for (i, question) in session.questions().iter().enumerate() {
            let marker = if i == session.position() { ">" } else { " " };
            let rating = match session.rating_for(question.id()) {
                Some(rating) => rating.to_string().green().bold().to_string(),
                None => "-".dimmed().to_string(),
            };
            output.push_str(&format!(
                "{} {:>3}. [{}] {}\n",
                marker,
                i + 1,
                rating,
                truncate(question.text(), LIST_TEXT_WIDTH)
            ));
        }

        let (rated, total) = session.progress();
        output.push_str(&format!("\n{}\n", Self::format_progress(rated, total)));
        output
    }

    /// Render a review summary in the requested format
    pub fn format_summary(summary: &ReviewSummary, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_summary_full(summary),
            OutputFormat::Summary => Self::format_totals(summary),
            OutputFormat::Json => Self::format_json(summary),
        }
    }

    /// Format as JSON
    pub fn format_json(summary: &ReviewSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_summary_full(summary: &ReviewSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Question Ratings"));
        output.push('\n');

        for row in &summary.rows {
            let title = match &row.text {
                Some(text) => format!("{} {}", row.question_id, truncate(text, LIST_TEXT_WIDTH)),
                None => format!("{} (not in dataset)", row.question_id),
            };
            output.push_str(&format!("\n{}\n", title.yellow().bold()));

            for (reviewer, rating) in summary.reviewers.iter().zip(&row.ratings) {
                let value = match rating {
                    Some(v) => v.to_string(),
                    None => "-".to_string(),
                };
                output.push_str(&format!("  {:<12} {}\n", reviewer, value));
            }
            if let Some(mean) = row.mean {
                output.push_str(&format!("  {:<12} {:.2}\n", "mean", mean));
            }
        }

        output.push('\n');
        output.push_str(&Self::format_totals(summary));
        output
    }

    fn format_totals(summary: &ReviewSummary) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Questions:".cyan().bold(),
            summary.question_count
        ));

        for totals in &summary.totals {
            let mean = totals
                .mean
                .map(|m| format!("{:.2}", m))
                .unwrap_or_else(|| "-".to_string());
            output.push_str(&format!(
                "  {:<12} rated {:>4}  mean {}\n",
                totals.reviewer, totals.rated, mean
            ));
        }

        let unrated = summary.unrated().count();
        if unrated > 0 {
            output.push_str(&format!(
                "{}\n",
                format!("{} questions have no ratings yet", unrated).yellow()
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!(
            "{}\n{}\n{}\n",
            line.cyan(),
            format!("  {}", title).cyan().bold(),
            line.cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("── {} ──", title).cyan().bold())
    }
}
