//! Load Questions use case.
//!
//! Reads the question dataset once at session start. A missing dataset is
//! not fatal: the session continues with no questions and the caller is told
//! where the dataset was expected so it can inform the operator.

use crate::ports::question_catalog::{CatalogError, QuestionCatalog};
use rater_domain::Question;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Result of loading the question dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedQuestions {
    /// Questions in dataset order (empty when the source is missing)
    pub questions: Vec<Question>,
    /// Set when the source did not exist; holds the expected location
    pub missing_source: Option<String>,
}

impl LoadedQuestions {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Load every question from `catalog`.
///
/// [`CatalogError::NotFound`] becomes an empty [`LoadedQuestions`] with
/// `missing_source` set; read and parse failures are returned unchanged.
pub fn load_questions(catalog: &dyn QuestionCatalog) -> Result<LoadedQuestions, CatalogError> {
    let questions = match catalog.questions() {
        Ok(questions) => questions,
        Err(CatalogError::NotFound(location)) => {
            warn!("Questions file not found: {}", location);
            return Ok(LoadedQuestions {
                questions: Vec::new(),
                missing_source: Some(location),
            });
        }
        Err(e) => return Err(e),
    };

    let mut seen = HashSet::new();
    for question in &questions {
        if !seen.insert(question.id()) {
            warn!(
                "Question id {} appears more than once; its entries share ratings",
                question.id()
            );
        }
    }

    info!(
        "Loaded {} questions from {}",
        questions.len(),
        catalog.location()
    );
    debug!("{} distinct question ids", seen.len());

    Ok(LoadedQuestions {
        questions,
        missing_source: None,
    })
}
