// Quiz Lookup Query History
// Most-recent-first list of viewed questions, persisted as JSON

use crate::types::{LookupError, QuestionRecord, PLACEHOLDER_QUESTION, PLACEHOLDER_TYPE};
use chrono::{DateTime, Local};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum number of retained entries
pub const HISTORY_LIMIT: usize = 10;

/// One viewed question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Section identifier
    pub id: String,

    /// Type label at the time it was viewed
    #[serde(rename = "type")]
    pub question_type: String,

    /// Question text at the time it was viewed
    pub question: String,

    /// When it was viewed
    pub time: DateTime<Local>,
}

/// Query history store
///
/// Entries are unique by identifier. Recording an identifier that is
/// already present changes nothing; it is not moved to the front.
#[derive(Debug, Clone, Default)]
pub struct QueryHistory {
    /// Newest first
    entries: Vec<HistoryEntry>,

    /// Backing file, `None` for an in-memory history
    path: Option<PathBuf>,
}

impl QueryHistory {
    /// Create an in-memory history
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a history backed by a JSON file
    ///
    /// A missing file yields an empty history; the file is created on the
    /// first change.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LookupError> {
        let path = path.as_ref().to_path_buf();

        let mut entries: Vec<HistoryEntry> = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                Vec::new()
            }
            Err(source) => return Err(LookupError::HistoryIo { path, source }),
        };
        let mut seen = FxHashSet::default();
        entries.retain(|entry| seen.insert(entry.id.clone()));
        entries.truncate(HISTORY_LIMIT);

        Ok(Self {
            entries,
            path: Some(path),
        })
    }

    /// Record a viewed question now
    ///
    /// # Returns
    /// `false` when the identifier was already in the history
    pub fn record(&mut self, id: &str, record: &QuestionRecord) -> Result<bool, LookupError> {
        self.record_at(id, record, Local::now())
    }

    /// Record a viewed question at a given time
    pub fn record_at(
        &mut self,
        id: &str,
        record: &QuestionRecord,
        time: DateTime<Local>,
    ) -> Result<bool, LookupError> {
        if self.contains(id) {
            return Ok(false);
        }

        let mut entries = Vec::with_capacity(HISTORY_LIMIT);
        entries.push(HistoryEntry {
            id: id.to_string(),
            question_type: record.question_type().unwrap_or(PLACEHOLDER_TYPE).to_string(),
            question: record.question().unwrap_or(PLACEHOLDER_QUESTION).to_string(),
            time,
        });
        entries.extend(self.entries.iter().take(HISTORY_LIMIT - 1).cloned());

        // Memory only follows a successful write
        self.save(&entries)?;
        self.entries = entries;
        Ok(true)
    }

    /// Drop every entry and delete the backing file
    pub fn clear(&mut self) -> Result<(), LookupError> {
        if let Some(path) = &self.path {
            Self::discard(path)?;
        }

        self.entries.clear();
        Ok(())
    }

    /// Delete a history file without reading it
    ///
    /// Works on unreadable or corrupt files; a missing file is not an error.
    pub fn discard(path: impl AsRef<Path>) -> Result<(), LookupError> {
        let path = path.as_ref();

        match std::fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "history cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LookupError::HistoryIo {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Entries, newest first
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), LookupError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, json).map_err(|source| LookupError::HistoryIo {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), entries = entries.len(), "history saved");
        Ok(())
    }
}
