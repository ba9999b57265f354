//! Review Summary use case.
//!
//! Builds a read-only overview of everything in the rating store so the
//! ratings can be inspected after the fact: one row per question with each
//! reviewer's rating and the mean, plus per-reviewer totals.

use rater_domain::{Question, RatingStore, Reviewer, Roster};
use serde::Serialize;
use std::collections::HashSet;

/// Ratings for one question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRow {
    pub question_id: String,
    /// Question text; `None` for ratings whose question is not in the dataset
    pub text: Option<String>,
    /// One slot per [`ReviewSummary::reviewers`] column, in the same order
    pub ratings: Vec<Option<u8>>,
    pub mean: Option<f64>,
}

/// How much one reviewer has rated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewerTotals {
    pub reviewer: String,
    pub rated: usize,
    pub mean: Option<f64>,
}

/// Overview of the rating store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    /// Column order: the roster, then any other names found in the store
    pub reviewers: Vec<String>,
    pub rows: Vec<ReviewRow>,
    pub totals: Vec<ReviewerTotals>,
    pub question_count: usize,
}

impl ReviewSummary {
    /// Summarize `store` against the dataset.
    ///
    /// Rows follow dataset order; ratings for ids missing from the dataset
    /// are appended afterwards in id order so nothing stored is hidden.
    pub fn build(questions: &[Question], store: &RatingStore, roster: &Roster) -> Self {
        let mut reviewers: Vec<Reviewer> = roster.iter().cloned().collect();
        for (_, entry) in store.iter() {
            for (reviewer, _) in entry.iter() {
                if !reviewers.contains(reviewer) {
                    reviewers.push(reviewer.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(questions.len());
        let mut listed = HashSet::new();

        for question in questions {
            if !listed.insert(question.id()) {
                continue;
            }
            let entry = store.entry(question.id());
            rows.push(ReviewRow {
                question_id: question.id().to_string(),
                text: Some(question.text().to_string()),
                ratings: reviewers
                    .iter()
                    .map(|r| entry.and_then(|e| e.get(r)).map(|rating| rating.value()))
                    .collect(),
                mean: entry.and_then(|e| e.mean()),
            });
        }

        for (question_id, entry) in store.iter() {
            if listed.contains(question_id) || entry.is_empty() {
                continue;
            }
            rows.push(ReviewRow {
                question_id: question_id.to_string(),
                text: None,
                ratings: reviewers
                    .iter()
                    .map(|r| entry.get(r).map(|rating| rating.value()))
                    .collect(),
                mean: entry.mean(),
            });
        }

        let totals = reviewers
            .iter()
            .enumerate()
            .map(|(column, reviewer)| {
                let values: Vec<u8> = rows.iter().filter_map(|row| row.ratings[column]).collect();
                let mean = if values.is_empty() {
                    None
                } else {
                    let sum: u32 = values.iter().map(|v| u32::from(*v)).sum();
                    Some(f64::from(sum) / values.len() as f64)
                };
                ReviewerTotals {
                    reviewer: reviewer.to_string(),
                    rated: values.len(),
                    mean,
                }
            })
            .collect();

        Self {
            reviewers: reviewers.iter().map(Reviewer::to_string).collect(),
            rows,
            totals,
            question_count: listed.len(),
        }
    }

    /// Rows for questions that no reviewer has rated yet
    pub fn unrated(&self) -> impl Iterator<Item = &ReviewRow> {
        self.rows
            .iter()
            .filter(|row| row.ratings.iter().all(Option::is_none))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rater_domain::QuestionId;

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn reviewer(s: &str) -> Reviewer {
        Reviewer::new(s).unwrap()
    }

    fn dataset() -> Vec<Question> {
        vec![
            Question::new(qid("q2"), "Second", "mcq"),
            Question::new(qid("q1"), "First", "open"),
        ]
    }

    #[test]
    fn test_rows_follow_dataset_order() {
        let mut store = RatingStore::new();
        store.set_rating(&qid("q1"), &reviewer("Sarah"), 4).unwrap();
        store.set_rating(&qid("q1"), &reviewer("Dom"), 2).unwrap();

        let summary = ReviewSummary::build(&dataset(), &store, &Roster::default());

        assert_eq!(summary.reviewers, vec!["Sarah", "Dom"]);
        assert_eq!(summary.rows.len(), 2);
        assert_eq!(summary.rows[0].question_id, "q2");
        assert_eq!(summary.rows[0].ratings, vec![None, None]);
        assert_eq!(summary.rows[0].mean, None);
        assert_eq!(summary.rows[1].ratings, vec![Some(4), Some(2)]);
        assert_eq!(summary.rows[1].mean, Some(3.0));
        assert_eq!(summary.question_count, 2);
    }

    #[test]
    fn test_orphaned_ratings_and_unknown_reviewers_are_listed() {
        let mut store = RatingStore::new();
        store.set_rating(&qid("gone"), &reviewer("Alex"), 5).unwrap();

        let summary = ReviewSummary::build(&dataset(), &store, &Roster::default());

        assert_eq!(summary.reviewers, vec!["Sarah", "Dom", "Alex"]);
        let orphan = summary.rows.last().unwrap();
        assert_eq!(orphan.question_id, "gone");
        assert_eq!(orphan.text, None);
        assert_eq!(orphan.ratings, vec![None, None, Some(5)]);
    }

    #[test]
    fn test_totals_per_reviewer() {
        let mut store = RatingStore::new();
        store.set_rating(&qid("q1"), &reviewer("Sarah"), 4).unwrap();
        store.set_rating(&qid("q2"), &reviewer("Sarah"), 1).unwrap();

        let summary = ReviewSummary::build(&dataset(), &store, &Roster::default());

        assert_eq!(
            summary.totals,
            vec![
                ReviewerTotals {
                    reviewer: "Sarah".to_string(),
                    rated: 2,
                    mean: Some(2.5),
                },
                ReviewerTotals {
                    reviewer: "Dom".to_string(),
                    rated: 0,
                    mean: None,
                },
            ]
        );
        assert_eq!(summary.unrated().count(), 0);
    }

    #[test]
    fn test_missing_dataset_still_lists_stored_ratings() {
        let mut store = RatingStore::new();
        store.set_rating(&qid("q1"), &reviewer("Sarah"), 4).unwrap();
        store.set_rating(&qid("q2"), &reviewer("Dom"), 2).unwrap();

        let summary = ReviewSummary::build(&[], &store, &Roster::default());

        assert_eq!(summary.question_count, 0);
        let ids: Vec<&str> = summary.rows.iter().map(|r| r.question_id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
        assert!(summary.rows.iter().all(|r| r.text.is_none()));
        assert_eq!(summary.totals[0].rated, 1);
        assert_eq!(summary.totals[1].mean, Some(2.0));
    }

    #[test]
    fn test_empty_store() {
        let summary = ReviewSummary::build(&dataset(), &RatingStore::new(), &Roster::default());
        assert_eq!(summary.unrated().count(), 2);
        assert!(summary.totals.iter().all(|t| t.rated == 0));
    }

    #[test]
    fn test_serializes_to_json() {
        let summary = ReviewSummary::build(&dataset(), &RatingStore::new(), &Roster::default());
        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["reviewers"][0], "Sarah");
        assert_eq!(value["rows"][1]["text"], "First");
    }
}
