//! JSON file rating repository
//!
//! Persists the whole [`RatingStore`] as one pretty-printed JSON object:
//!
//! ```json
//! {
//!     "64f0c2a1": {
//!         "Dom": 2,
//!         "Sarah": 4
//!     }
//! }
//! ```
//!
//! Keys are written in sorted order so consecutive saves diff cleanly. Each
//! save writes a temporary file next to the target and renames it over the
//! old one, so a crash mid-write never leaves a truncated store behind.

use rater_domain::{RatingRepository, RatingStore, StorageError};
use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Rating repository backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonRatingRepository {
    path: PathBuf,
}

impl JsonRatingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, reason: impl ToString) -> StorageError {
        StorageError::Malformed {
            location: self.location(),
            reason: reason.to_string(),
        }
    }

    fn write_error(&self, reason: impl ToString) -> StorageError {
        StorageError::Write {
            location: self.location(),
            reason: reason.to_string(),
        }
    }

    /// Serialize with 4-space indentation and a trailing newline
    fn encode(store: &RatingStore) -> Result<Vec<u8>, StorageError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        store
            .serialize(&mut serializer)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Directory that receives the temporary file; must be on the same
    /// filesystem as the target for the rename to be atomic.
    fn target_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl RatingRepository for JsonRatingRepository {
    fn load(&self) -> Result<RatingStore, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ratings file at {}, starting empty", self.path.display());
                return Ok(RatingStore::new());
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(self.malformed(e));
            }
            Err(e) => {
                warn!(
                    "Could not read ratings file {}: {}; starting empty",
                    self.path.display(),
                    e
                );
                return Ok(RatingStore::new());
            }
        };

        if content.trim().is_empty() {
            debug!("Ratings file {} is empty", self.path.display());
            return Ok(RatingStore::new());
        }

        let store: RatingStore = serde_json::from_str(&content).map_err(|e| self.malformed(e))?;
        debug!(
            "Loaded ratings for {} questions from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    fn save(&self, store: &RatingStore) -> Result<(), StorageError> {
        let bytes = Self::encode(store)?;
        let dir = self.target_dir();

        fs::create_dir_all(dir).map_err(|e| self.write_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        tmp.write_all(&bytes).map_err(|e| self.write_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.write_error(e))?;

        // Keep the existing file's permissions rather than the temp file's 0600
        if let Ok(metadata) = fs::metadata(&self.path)
            && let Err(e) = tmp.as_file().set_permissions(metadata.permissions())
        {
            warn!("Could not copy permissions onto {}: {}", self.location(), e);
        }

        tmp.persist(&self.path)
            .map_err(|e| self.write_error(e.error))?;

        debug!(
            "Wrote {} bytes of ratings to {}",
            bytes.len(),
            self.path.display()
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
