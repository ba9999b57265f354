//! Reviewer identity and the fixed roster a session chooses from

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A named reviewer (Value Object)
///
/// Names are compared exactly; the [`Roster`] is responsible for resolving
/// user input to the canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Reviewer(String);

impl Reviewer {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyReviewerName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Strict conversion used when reading stored data: the name must already be
/// in canonical form, so two stored keys can never collapse into one.
impl TryFrom<String> for Reviewer {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim() != value {
            return Err(DomainError::UntrimmedReviewerName(value));
        }
        Self::new(value)
    }
}

impl From<Reviewer> for String {
    fn from(reviewer: Reviewer) -> Self {
        reviewer.0
    }
}

impl std::fmt::Display for Reviewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed, ordered set of reviewers allowed in a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    reviewers: Vec<Reviewer>,
}

impl Roster {
    /// Build a roster, rejecting an empty list and duplicate names
    ///
    /// Duplicates are detected case-insensitively, since [`Roster::find`]
    /// would otherwise be ambiguous.
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut reviewers: Vec<Reviewer> = Vec::new();
        for name in names {
            let reviewer = Reviewer::new(name)?;
            if reviewers
                .iter()
                .any(|r| r.name().eq_ignore_ascii_case(reviewer.name()))
            {
                return Err(DomainError::DuplicateReviewer(reviewer.0));
            }
            reviewers.push(reviewer);
        }

        if reviewers.is_empty() {
            return Err(DomainError::EmptyRoster);
        }
        Ok(Self { reviewers })
    }

    /// Names used when no roster is configured
    pub fn default_names() -> Vec<String> {
        vec!["Sarah".to_string(), "Dom".to_string()]
    }

    /// Resolve user input to a roster member (case-insensitive)
    pub fn find(&self, name: &str) -> Result<&Reviewer, DomainError> {
        let name = name.trim();
        self.reviewers
            .iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| DomainError::UnknownReviewer {
                name: name.to_string(),
                roster: self.to_string(),
            })
    }

    pub fn contains(&self, reviewer: &Reviewer) -> bool {
        self.reviewers.contains(reviewer)
    }

    /// First reviewer in roster order
    pub fn first(&self) -> &Reviewer {
        // Non-empty by construction
        &self.reviewers[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reviewer> {
        self.reviewers.iter()
    }

    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            reviewers: Self::default_names().into_iter().map(Reviewer).collect(),
        }
    }
}

impl std::fmt::Display for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.reviewers.iter().map(Reviewer::name).collect();
        write!(f, "{}", names.join(", "))
    }
}
