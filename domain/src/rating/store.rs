//! The rating mapping held for the duration of a session

use crate::core::error::DomainError;
use crate::core::question::QuestionId;
use crate::core::rating::Rating;
use crate::core::reviewer::Reviewer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ratings given to a single question, keyed by reviewer
///
/// A reviewer without a key has not rated the question; there is no
/// "unrated" sentinel value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingEntry {
    ratings: BTreeMap<Reviewer, Rating>,
}

impl RatingEntry {
    pub fn get(&self, reviewer: &Reviewer) -> Option<Rating> {
        self.ratings.get(reviewer).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Reviewer, Rating)> {
        self.ratings.iter().map(|(reviewer, rating)| (reviewer, *rating))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Mean of all reviewers' ratings, `None` when nobody has rated
    pub fn mean(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let total: u32 = self.ratings.values().map(|r| u32::from(r.value())).sum();
        Some(f64::from(total) / self.ratings.len() as f64)
    }

    fn insert(&mut self, reviewer: Reviewer, rating: Rating) -> Option<Rating> {
        self.ratings.insert(reviewer, rating)
    }
}

/// All ratings known to a session: question id → [`RatingEntry`]
///
/// Mutation happens only through [`RatingStore::set_rating`] and
/// [`RatingStore::record`]; both are purely in-memory. Persisting the store is
/// the job of a [`RatingRepository`](super::repository::RatingRepository).
///
/// # Example
///
/// ```
/// use rater_domain::{QuestionId, RatingStore, Reviewer};
///
/// let mut store = RatingStore::new();
/// let q1 = QuestionId::new("q1").unwrap();
/// let sarah = Reviewer::new("Sarah").unwrap();
///
/// store.set_rating(&q1, &sarah, 4).unwrap();
/// assert_eq!(store.get_rating(&q1, &sarah).map(|r| r.value()), Some(4));
/// assert!(store.set_rating(&q1, &sarah, 6).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingStore {
    questions: BTreeMap<QuestionId, RatingEntry>,
}

impl RatingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored rating for a (question, reviewer) pair, if any
    pub fn get_rating(&self, question_id: &QuestionId, reviewer: &Reviewer) -> Option<Rating> {
        self.questions
            .get(question_id)
            .and_then(|entry| entry.get(reviewer))
    }

    /// Validate `value` and record it, replacing any earlier rating by the
    /// same reviewer. Returns the replaced rating.
    ///
    /// On an out-of-range value the store is left untouched.
    pub fn set_rating(
        &mut self,
        question_id: &QuestionId,
        reviewer: &Reviewer,
        value: i64,
    ) -> Result<Option<Rating>, DomainError> {
        let rating = Rating::new(value)?;
        Ok(self.record(question_id.clone(), reviewer.clone(), rating))
    }

    /// Record an already validated rating. Returns the replaced rating.
    pub fn record(
        &mut self,
        question_id: QuestionId,
        reviewer: Reviewer,
        rating: Rating,
    ) -> Option<Rating> {
        self.questions
            .entry(question_id)
            .or_default()
            .insert(reviewer, rating)
    }

    pub fn entry(&self, question_id: &QuestionId) -> Option<&RatingEntry> {
        self.questions.get(question_id)
    }

    /// Iterate over questions in id order
    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &RatingEntry)> {
        self.questions.iter()
    }

    /// Number of questions with an entry (possibly empty)
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// How many of `question_ids` the reviewer has rated
    pub fn rated_count<'a, I>(&self, reviewer: &Reviewer, question_ids: I) -> usize
    where
        I: IntoIterator<Item = &'a QuestionId>,
    {
        question_ids
            .into_iter()
            .filter(|id| self.get_rating(id, reviewer).is_some())
            .count()
    }
}
