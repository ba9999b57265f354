//! Rating audit trail in JSON Lines form.
//!
//! One line per [`RatingEvent`], e.g.
//!
//! ```json
//! {"type":"rating_committed","timestamp":"2024-05-01T09:30:00.000Z","question_id":"q1","reviewer":"Sarah","rating":4,"previous":null}
//! ```
//!
//! Reviewers share one trail across sessions, so the file is only ever
//! appended to.

use rater_application::{RatingEvent, RatingEventLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Appends rating events to a JSONL audit file.
pub struct JsonlRatingLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl JsonlRatingLogger {
    /// Open the audit file at `path`, creating it and its directory if needed.
    ///
    /// `None` means the session runs without an audit trail.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create rating log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(Self {
                file: Mutex::new(file),
                path: path.to_path_buf(),
            }),
            Err(e) => {
                warn!("Could not open rating log {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Flatten an event into one audit record.
///
/// Object payloads carry their fields at the top level; anything else is
/// kept under `data`.
fn audit_record(event: RatingEvent, timestamp: String) -> Value {
    let mut record = match event.payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => Map::from_iter([("data".to_string(), other)]),
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(record)
}

impl RatingEventLogger for JsonlRatingLogger {
    fn log(&self, event: RatingEvent) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut line = audit_record(event, timestamp).to_string();
        line.push('\n');

        // One write per line keeps concurrent appenders from interleaving
        let result = match self.file.lock() {
            Ok(mut file) => file.write_all(line.as_bytes()),
            Err(_) => return,
        };
        if let Err(e) = result {
            warn!("Could not write to rating log {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings.log.jsonl");
        let logger = JsonlRatingLogger::open(&path).unwrap();

        logger.log(RatingEvent::new(
            "rating_committed",
            json!({ "question_id": "q1", "reviewer": "Sarah", "rating": 4, "previous": null }),
        ));
        logger.log(RatingEvent::new(
            "save_failed",
            json!({ "error": "disk full" }),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "rating_committed");
        assert_eq!(lines[0]["question_id"], "q1");
        assert_eq!(lines[0]["rating"], 4);
        assert!(lines[0]["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(lines[1]["type"], "save_failed");
    }

    #[test]
    fn test_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit").join("ratings.log.jsonl");

        for rating in [2, 5] {
            let logger = JsonlRatingLogger::open(&path).unwrap();
            logger.log(RatingEvent::new("rating_committed", json!({ "rating": rating })));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["rating"], 2);
        assert_eq!(lines[1]["rating"], 5);
    }

    #[test]
    fn test_audit_record_shape() {
        let record = audit_record(
            RatingEvent::new("reviewer_switched", json!({ "from": "Sarah", "to": "Dom" })),
            "2024-05-01T09:30:00.000Z".to_string(),
        );
        assert_eq!(
            record,
            json!({
                "type": "reviewer_switched",
                "timestamp": "2024-05-01T09:30:00.000Z",
                "from": "Sarah",
                "to": "Dom",
            })
        );

        let bare = audit_record(RatingEvent::new("tick", Value::Null), "t".to_string());
        assert_eq!(bare, json!({ "type": "tick", "timestamp": "t" }));
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratings.log.jsonl");
        let logger = JsonlRatingLogger::open(&path).unwrap();

        logger.log(RatingEvent::new("note", json!("just a string")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "note");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_open_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        assert!(JsonlRatingLogger::open(blocker.join("log.jsonl")).is_none());
    }
}
