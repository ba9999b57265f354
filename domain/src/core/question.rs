//! Question entity and its identifier

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Unique identifier of a question in the dataset (Value Object)
///
/// Ordered so that stores keyed by it serialize deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestionId(String);

impl QuestionId {
    /// Create a question id, rejecting empty or whitespace-only input
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::EmptyQuestionId);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for QuestionId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestionId> for String {
    fn from(id: QuestionId) -> Self {
        id.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A question from the dataset (Entity)
///
/// Questions are read-only for the lifetime of a session. The explanation
/// and answer options are optional in the source data; an empty option list
/// means the question has no options to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    question_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    answer_options: Vec<String>,
}

impl Question {
    /// Create a question without explanation or answer options
    pub fn new(id: QuestionId, text: impl Into<String>, question_type: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            question_type: question_type.into(),
            explanation: None,
            answer_options: Vec::new(),
        }
    }

    /// Attach an explanation
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Attach the ordered answer options
    pub fn with_answer_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answer_options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn question_type(&self) -> &str {
        &self.question_type
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn answer_options(&self) -> &[String] {
        &self.answer_options
    }

    pub fn has_answer_options(&self) -> bool {
        !self.answer_options.is_empty()
    }
}
