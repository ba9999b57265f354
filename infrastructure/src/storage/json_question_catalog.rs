//! JSON file question catalog
//!
//! Reads the question dataset: a JSON array of records as exported from
//! MongoDB, e.g.
//!
//! ```json
//! [
//!   {
//!     "_id": { "$oid": "64f0c2a1" },
//!     "question": "Which keyword moves ownership into a closure?",
//!     "question_type": "multiple_choice",
//!     "explanation": "move forces captured variables to be moved.",
//!     "answer_options": ["ref", "move", "static", "dyn"]
//!   }
//! ]
//! ```
//!
//! `_id` may also be a plain string. `explanation` and `answer_options` may
//! be absent or `null`. Unknown fields are ignored.

use rater_application::{CatalogError, QuestionCatalog};
use rater_domain::{Question, QuestionId};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Identifier as it appears in the dataset
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileQuestionId {
    ObjectId {
        #[serde(rename = "$oid")]
        oid: String,
    },
    Plain(String),
}

impl FileQuestionId {
    fn into_string(self) -> String {
        match self {
            FileQuestionId::ObjectId { oid } => oid,
            FileQuestionId::Plain(id) => id,
        }
    }
}

/// Raw question record
#[derive(Debug, Deserialize)]
struct FileQuestion {
    #[serde(rename = "_id", alias = "id")]
    id: FileQuestionId,
    question: String,
    question_type: String,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    answer_options: Option<Vec<String>>,
}

impl FileQuestion {
    fn into_question(self) -> Result<Question, rater_domain::DomainError> {
        let mut question = Question::new(
            QuestionId::new(self.id.into_string())?,
            self.question,
            self.question_type,
        );
        if let Some(explanation) = self.explanation {
            question = question.with_explanation(explanation);
        }
        if let Some(options) = self.answer_options {
            question = question.with_answer_options(options);
        }
        Ok(question)
    }
}

/// Question catalog backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonQuestionCatalog {
    path: PathBuf,
}

impl JsonQuestionCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a dataset held in memory
    pub fn parse(content: &str, location: &str) -> Result<Vec<Question>, CatalogError> {
        let malformed = |reason: String| CatalogError::Malformed {
            location: location.to_string(),
            reason,
        };

        let records: Vec<FileQuestion> =
            serde_json::from_str(content).map_err(|e| malformed(e.to_string()))?;

        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .into_question()
                    .map_err(|e| malformed(format!("record {}: {}", index + 1, e)))
            })
            .collect()
    }
}

impl QuestionCatalog for JsonQuestionCatalog {
    fn questions(&self) -> Result<Vec<Question>, CatalogError> {
        let content = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CatalogError::NotFound(self.location()),
            _ => CatalogError::Read {
                location: self.location(),
                reason: e.to_string(),
            },
        })?;

        let questions = Self::parse(&content, &self.location())?;
        debug!(
            "Parsed {} questions from {}",
            questions.len(),
            self.path.display()
        );
        Ok(questions)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
