// src/core/history.rs

use crate::core::error::HistoryError;
use crate::core::models::{ScanHistoryEntry, HISTORY_CAPACITY};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const HISTORY_FILE: &str = "history.json";

/// The scan history together with its on-disk mirror.
///
/// Every mutation rewrites (or removes) the file before returning, so memory
/// and disk never drift apart.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<ScanHistoryEntry>,
}

impl HistoryStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing file is an empty history. A malformed file is logged and
    /// also treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => {
                debug!(count = entries.len(), path = %path.display(), "History loaded.");
                entries
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Failed to load history, starting empty.");
                Vec::new()
            }
        };
        Self { path, entries }
    }

    pub fn entries(&self) -> &[ScanHistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Prepends `entry`, keeps the newest [`HISTORY_CAPACITY`] entries and persists the list.
    pub fn record(&mut self, entry: ScanHistoryEntry) -> Result<(), HistoryError> {
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
        self.persist()
    }

    /// Empties the history and removes the persisted copy.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "History cleared.");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&self.entries)?;
        std::fs::write(&self.path, json)?;
        debug!(count = self.entries.len(), "History persisted.");
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Vec<ScanHistoryEntry>, HistoryError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
