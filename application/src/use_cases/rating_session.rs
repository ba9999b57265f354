//! Rating Session use case.
//!
//! Owns the [`RatingStore`] for one operator session and walks a single
//! reviewer through the question list:
//!
//! 1. Load the full store from the [`RatingRepository`] (once)
//! 2. Show the current question with its last-saved rating (or the default)
//! 3. On commit, validate and record the rating in memory
//! 4. Save the whole store back, keeping the in-memory state if that fails
//!
//! The store is never re-read after start-up; another process writing the
//! same file in the meantime is overwritten on the next save.

use crate::ports::rating_event_logger::{NoRatingEventLogger, RatingEvent, RatingEventLogger};
use rater_domain::{
    DomainError, Question, QuestionId, Rating, RatingRepository, RatingStore, Reviewer, Roster,
    StorageError,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a rating session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingSessionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Failed to load ratings: {0}")]
    Load(StorageError),

    #[error("Failed to save ratings: {0}")]
    Save(StorageError),

    #[error("No questions to rate")]
    NoQuestions,

    #[error("Question number {requested} is out of range (1-{total})")]
    OutOfRange { requested: usize, total: usize },
}

/// What a successful commit changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub question_id: QuestionId,
    pub reviewer: Reviewer,
    pub rating: Rating,
    /// The rating this commit replaced, if the reviewer had rated before
    pub previous: Option<Rating>,
}

/// A single operator's rating session.
pub struct RatingSession {
    repository: Arc<dyn RatingRepository>,
    event_logger: Arc<dyn RatingEventLogger>,
    store: RatingStore,
    questions: Vec<Question>,
    roster: Roster,
    reviewer: Reviewer,
    cursor: usize,
    unsaved: bool,
}

impl RatingSession {
    /// Start a session for `reviewer_name`, loading the stored ratings.
    ///
    /// Fails if the name is not on the roster or the stored ratings are
    /// malformed. Absent storage yields an empty store.
    pub fn open(
        repository: Arc<dyn RatingRepository>,
        questions: Vec<Question>,
        roster: Roster,
        reviewer_name: &str,
    ) -> Result<Self, RatingSessionError> {
        let reviewer = roster.find(reviewer_name)?.clone();
        let store = repository.load().map_err(RatingSessionError::Load)?;

        info!(
            "Opened rating session for {} ({} questions, {} rated entries at {})",
            reviewer,
            questions.len(),
            store.len(),
            repository.location()
        );

        Ok(Self {
            repository,
            event_logger: Arc::new(NoRatingEventLogger),
            store,
            questions,
            roster,
            reviewer,
            cursor: 0,
            unsaved: false,
        })
    }

    /// Attach an audit logger; logs the session start immediately.
    pub fn with_event_logger(mut self, logger: Arc<dyn RatingEventLogger>) -> Self {
        self.event_logger = logger;
        self.event_logger.log(RatingEvent::new(
            "session_started",
            json!({
                "reviewer": self.reviewer.name(),
                "questions": self.questions.len(),
                "ratings_location": self.repository.location(),
            }),
        ));
        self
    }

    pub fn reviewer(&self) -> &Reviewer {
        &self.reviewer
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Switch to another roster member; the position in the list is kept.
    pub fn switch_reviewer(&mut self, name: &str) -> Result<&Reviewer, RatingSessionError> {
        let reviewer = self.roster.find(name)?.clone();
        if reviewer != self.reviewer {
            info!("Switching reviewer from {} to {}", self.reviewer, reviewer);
            self.event_logger.log(RatingEvent::new(
                "reviewer_switched",
                json!({ "from": self.reviewer.name(), "to": reviewer.name() }),
            ));
            self.reviewer = reviewer;
        }
        Ok(&self.reviewer)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Zero-based index of the current question
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.cursor)
    }

    /// Move to the next question. Returns false when already at the end.
    pub fn advance(&mut self) -> bool {
        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous question. Returns false when already at the start.
    pub fn back(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a question by its one-based number as shown to the operator
    pub fn goto(&mut self, number: usize) -> Result<&Question, RatingSessionError> {
        let total = self.questions.len();
        if number == 0 || number > total {
            return Err(RatingSessionError::OutOfRange {
                requested: number,
                total,
            });
        }
        self.cursor = number - 1;
        Ok(&self.questions[self.cursor])
    }

    /// The current reviewer's saved rating for a question
    pub fn rating_for(&self, question_id: &QuestionId) -> Option<Rating> {
        self.store.get_rating(question_id, &self.reviewer)
    }

    /// The current reviewer's saved rating for the current question
    pub fn current_rating(&self) -> Option<Rating> {
        self.current().and_then(|q| self.rating_for(q.id()))
    }

    /// Value offered for the current question: last-saved rating, else 3
    pub fn default_rating(&self) -> Rating {
        self.current_rating().unwrap_or_default()
    }

    /// Questions rated by the current reviewer, and the total count
    pub fn progress(&self) -> (usize, usize) {
        let rated = self
            .store
            .rated_count(&self.reviewer, self.questions.iter().map(Question::id));
        (rated, self.questions.len())
    }

    /// True when a commit was recorded in memory but its save failed
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Record `value` for the current question and save the whole store.
    ///
    /// An out-of-range value is rejected before the store is touched. When
    /// the save fails the rating stays recorded in memory and
    /// [`RatingSession::save`] can retry.
    pub fn commit(&mut self, value: i64) -> Result<CommitOutcome, RatingSessionError> {
        let question_id = self
            .current()
            .map(|q| q.id().clone())
            .ok_or(RatingSessionError::NoQuestions)?;

        let rating = Rating::new(value)?;
        let previous = self
            .store
            .record(question_id.clone(), self.reviewer.clone(), rating);
        self.unsaved = true;

        debug!(
            "Recorded {} for {} by {} (was {:?})",
            rating, question_id, self.reviewer, previous
        );
        self.event_logger.log(RatingEvent::new(
            "rating_committed",
            json!({
                "question_id": question_id.as_str(),
                "reviewer": self.reviewer.name(),
                "rating": rating.value(),
                "previous": previous.map(Rating::value),
            }),
        ));

        self.save()?;

        Ok(CommitOutcome {
            question_id,
            reviewer: self.reviewer.clone(),
            rating,
            previous,
        })
    }

    /// Commit the value currently offered for the question (see
    /// [`RatingSession::default_rating`]).
    pub fn commit_default(&mut self) -> Result<CommitOutcome, RatingSessionError> {
        let value = i64::from(self.default_rating().value());
        self.commit(value)
    }

    /// Write the whole store to the repository.
    pub fn save(&mut self) -> Result<(), RatingSessionError> {
        match self.repository.save(&self.store) {
            Ok(()) => {
                self.unsaved = false;
                debug!("Saved ratings to {}", self.repository.location());
                Ok(())
            }
            Err(e) => {
                warn!("Saving ratings failed: {}", e);
                self.event_logger.log(RatingEvent::new(
                    "save_failed",
                    json!({ "error": e.to_string() }),
                ));
                Err(RatingSessionError::Save(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// In-memory repository that can be told to fail saves
    #[derive(Default)]
    struct MemoryRepository {
        saved: Mutex<Option<RatingStore>>,
        fail_saves: AtomicBool,
        malformed: bool,
    }

    impl MemoryRepository {
        fn saved(&self) -> Option<RatingStore> {
            self.saved.lock().unwrap().clone()
        }
    }

    impl RatingRepository for MemoryRepository {
        fn load(&self) -> Result<RatingStore, StorageError> {
            if self.malformed {
                return Err(StorageError::Malformed {
                    location: "memory".to_string(),
                    reason: "not json".to_string(),
                });
            }
            Ok(self.saved().unwrap_or_default())
        }

        fn save(&self, store: &RatingStore) -> Result<(), StorageError> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::Write {
                    location: "memory".to_string(),
                    reason: "read-only".to_string(),
                });
            }
            *self.saved.lock().unwrap() = Some(store.clone());
            Ok(())
        }

        fn location(&self) -> String {
            "memory".to_string()
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl RatingEventLogger for RecordingLogger {
        fn log(&self, event: RatingEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    fn questions() -> Vec<Question> {
        ["q1", "q2", "q3"]
            .iter()
            .map(|id| Question::new(QuestionId::new(*id).unwrap(), format!("Text {id}"), "mcq"))
            .collect()
    }

    fn open(repo: &Arc<MemoryRepository>, reviewer: &str) -> RatingSession {
        RatingSession::open(repo.clone(), questions(), Roster::default(), reviewer).unwrap()
    }

    fn qid(s: &str) -> QuestionId {
        QuestionId::new(s).unwrap()
    }

    fn rating(v: i64) -> Rating {
        Rating::new(v).unwrap()
    }

    #[test]
    fn test_commit_saves_and_reload_sees_it() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");

        let outcome = session.commit(4).unwrap();
        assert_eq!(outcome.question_id, qid("q1"));
        assert_eq!(outcome.rating, rating(4));
        assert_eq!(outcome.previous, None);
        assert!(!session.has_unsaved_changes());

        let reopened = open(&repo, "Dom");
        let sarah = Reviewer::new("Sarah").unwrap();
        let dom = Reviewer::new("Dom").unwrap();
        assert_eq!(reopened.store().get_rating(&qid("q1"), &sarah), Some(rating(4)));
        assert_eq!(reopened.store().get_rating(&qid("q1"), &dom), None);
    }

    #[test]
    fn test_commit_overwrites_previous_value() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");

        session.commit(4).unwrap();
        let outcome = session.commit(2).unwrap();

        assert_eq!(outcome.previous, Some(rating(4)));
        assert_eq!(session.current_rating(), Some(rating(2)));
    }

    #[test]
    fn test_invalid_commit_leaves_store_and_storage_untouched() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");

        let err = session.commit(6).unwrap_err();
        assert_eq!(err, RatingSessionError::Domain(DomainError::InvalidRating(6)));
        assert!(session.store().is_empty());
        assert!(repo.saved().is_none());
        assert!(!session.has_unsaved_changes());
    }

    #[test]
    fn test_failed_save_keeps_rating_in_memory_for_retry() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");
        repo.fail_saves.store(true, Ordering::SeqCst);

        let err = session.commit(5).unwrap_err();
        assert!(matches!(err, RatingSessionError::Save(_)));
        assert_eq!(session.current_rating(), Some(rating(5)));
        assert!(session.has_unsaved_changes());
        assert!(repo.saved().is_none());

        repo.fail_saves.store(false, Ordering::SeqCst);
        session.save().unwrap();
        assert!(!session.has_unsaved_changes());
        let sarah = Reviewer::new("Sarah").unwrap();
        assert_eq!(
            repo.saved().unwrap().get_rating(&qid("q1"), &sarah),
            Some(rating(5))
        );
    }

    #[test]
    fn test_malformed_storage_fails_open() {
        let repo = Arc::new(MemoryRepository {
            malformed: true,
            ..Default::default()
        });
        let result = RatingSession::open(repo, questions(), Roster::default(), "Sarah");
        assert!(matches!(result, Err(RatingSessionError::Load(_))));
    }

    #[test]
    fn test_unknown_reviewer_fails_open() {
        let repo = Arc::new(MemoryRepository::default());
        let result = RatingSession::open(repo, questions(), Roster::default(), "Alex");
        assert!(matches!(
            result,
            Err(RatingSessionError::Domain(DomainError::UnknownReviewer { .. }))
        ));
    }

    #[test]
    fn test_default_rating_follows_saved_value() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");
        assert_eq!(session.default_rating(), Rating::default());

        session.commit_default().unwrap();
        assert_eq!(session.current_rating(), Some(rating(3)));

        session.commit(1).unwrap();
        assert_eq!(session.default_rating(), rating(1));
    }

    #[test]
    fn test_navigation() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");

        assert!(!session.back());
        assert!(session.advance());
        assert!(session.advance());
        assert!(!session.advance());
        assert_eq!(session.position(), 2);

        assert_eq!(session.goto(1).unwrap().id(), &qid("q1"));
        assert_eq!(
            session.goto(4).unwrap_err(),
            RatingSessionError::OutOfRange {
                requested: 4,
                total: 3
            }
        );
        assert!(session.goto(0).is_err());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn test_commit_without_questions() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session =
            RatingSession::open(repo, Vec::new(), Roster::default(), "Sarah").unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.commit(3).unwrap_err(), RatingSessionError::NoQuestions);
    }

    #[test]
    fn test_switch_reviewer_keeps_ratings_separate() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");
        session.commit(4).unwrap();

        assert_eq!(session.switch_reviewer("dom").unwrap().name(), "Dom");
        assert_eq!(session.current_rating(), None);
        session.commit(2).unwrap();

        session.switch_reviewer("Sarah").unwrap();
        assert_eq!(session.current_rating(), Some(rating(4)));
        assert!(session.switch_reviewer("Alex").is_err());
        assert_eq!(session.reviewer().name(), "Sarah");
    }

    #[test]
    fn test_progress_counts_current_reviewer_only() {
        let repo = Arc::new(MemoryRepository::default());
        let mut session = open(&repo, "Sarah");
        session.commit(4).unwrap();
        session.advance();
        session.commit(5).unwrap();
        assert_eq!(session.progress(), (2, 3));

        session.switch_reviewer("Dom").unwrap();
        assert_eq!(session.progress(), (0, 3));
    }

    #[test]
    fn test_events_are_logged() {
        let repo = Arc::new(MemoryRepository::default());
        let logger = Arc::new(RecordingLogger::default());
        let mut session = open(&repo, "Sarah").with_event_logger(logger.clone());

        session.commit(4).unwrap();
        session.commit(2).unwrap();

        let events = logger.events.lock().unwrap();
        let types: Vec<&str> = events.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec!["session_started", "rating_committed", "rating_committed"]
        );
        assert_eq!(events[2].1["rating"], 2);
        assert_eq!(events[2].1["previous"], 4);
        assert_eq!(events[1].1["previous"], serde_json::Value::Null);
    }
}
