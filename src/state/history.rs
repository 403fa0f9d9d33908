/// Analysis history
///
/// Keeps the last few analyses, newest first, and mirrors them to a JSON
/// file under the fixed storage key. The in-memory list and the file are
/// written together right after every change.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::catalog::DiseaseRecord;
use crate::config::HISTORY_CAPACITY;
use crate::error::StorageError;

/// Placeholder shown when the history is empty
pub const EMPTY_HISTORY_MESSAGE: &str = "No analysis history yet";

/// One completed analysis. Never changed after creation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Creation time in Unix milliseconds, doubles as the identifier
    pub id: i64,
    /// Catalog key of the result
    pub name: String,
    /// Local time, e.g. "03:07 PM"
    pub time: String,
    /// Local date, e.g. "10/18/2026"
    pub date: String,
    /// Confidence copied from the record at creation time
    pub confidence: u8,
}

impl HistoryEntry {
    pub fn new(name: &str, record: &DiseaseRecord, now: DateTime<Local>) -> Self {
        Self {
            id: now.timestamp_millis(),
            name: name.to_string(),
            time: now.format("%I:%M %p").to_string(),
            date: now.format("%-m/%-d/%Y").to_string(),
            confidence: record.confidence,
        }
    }
}

/// JSON file backing the history
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored list. `Ok(None)` means nothing was stored yet.
    pub fn load(&self) -> Result<Option<Vec<HistoryEntry>>, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entries = serde_json::from_str(&contents)?;
        Ok(Some(entries))
    }

    /// Replace the stored list
    pub fn save(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string(entries)?;

        // Readers only ever see a complete file
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Capped list of past analyses, newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from stored entries, keeping the newest ones if there are too many
    pub fn from_entries(mut entries: Vec<HistoryEntry>) -> Self {
        entries.truncate(HISTORY_CAPACITY);
        Self { entries }
    }

    /// Restore the ledger from storage.
    ///
    /// Missing or malformed data yields an empty ledger. A malformed file
    /// is left in place and replaced by the next successful save.
    pub fn load(store: &HistoryStore) -> Self {
        match store.load() {
            Ok(Some(entries)) => {
                let ledger = Self::from_entries(entries);
                log::info!(
                    "📁 History loaded from {} ({} entries)",
                    store.path().display(),
                    ledger.len()
                );
                ledger
            }
            Ok(None) => {
                log::info!("📁 No history at {}, starting fresh", store.path().display());
                Self::new()
            }
            Err(e) => {
                log::warn!("⚠️  Ignoring stored history: {}", e);
                Self::new()
            }
        }
    }

    /// Insert at the front and evict the oldest entry past capacity
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Insert an entry and persist the whole list
    pub fn record(&mut self, entry: HistoryEntry, store: &HistoryStore) -> Result<(), StorageError> {
        self.push(entry);
        store.save(&self.entries)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
