//! Snapshot persistence
//!
//! The whole history is stored as a single JSON record, rewritten after
//! every mutation and read once when a session opens.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::snapshot::Snapshot;

/// Persisted layout of a history stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedHistory {
    /// Snapshot at `current_index`, stored redundantly for readers
    pub current_state: Snapshot,
    /// All snapshots, oldest first
    pub history: Vec<Snapshot>,
    /// Cursor into `history`
    pub current_index: usize,
}

/// Load/save backend for the last known history state
pub trait SnapshotStore: Send + Sync {
    /// Read the stored record, `None` when nothing was saved yet
    fn load(&self) -> Result<Option<PersistedHistory>>;

    /// Replace the stored record
    fn save(&self, record: &PersistedHistory) -> Result<()>;
}

/// JSON file store with atomic writes
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSnapshotStore { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<PersistedHistory>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let record = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), "Loaded persisted history");
        Ok(Some(record))
    }

    fn save(&self, record: &PersistedHistory) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(record)?;

        // Write to temp file first, then rename over the target
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, &content)?;
        std::fs::rename(&temp_path, &self.path)?;

        debug!(path = %self.path.display(), entries = record.history.len(), "Saved history");
        Ok(())
    }
}

/// In-memory store keeping the serialized record
#[derive(Default)]
pub struct MemorySnapshotStore {
    blob: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemorySnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `record`
    pub fn with_record(record: &PersistedHistory) -> Result<Self> {
        let store = Self::new();
        *store.blob.lock() = Some(serde_json::to_string(record)?);
        Ok(store)
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> Result<Option<PersistedHistory>> {
        match self.blob.lock().as_deref() {
            Some(blob) => Ok(Some(serde_json::from_str(blob)?)),
            None => Ok(None),
        }
    }

    fn save(&self, record: &PersistedHistory) -> Result<()> {
        let blob = serde_json::to_string(record)?;
        *self.blob.lock() = Some(blob);
        *self.saves.lock() += 1;
        Ok(())
    }
}
