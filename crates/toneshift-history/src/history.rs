//! History management and navigation

use tracing::{debug, warn};

use crate::persistence::PersistedHistory;
use crate::snapshot::Snapshot;

/// Linear undo/redo stack over snapshots
///
/// `entries` is never empty and `cursor` always points into it. Entries
/// after the cursor are the redo branch; committing while a redo branch
/// exists drops it.
#[derive(Debug, Clone)]
pub struct HistoryEngine {
    entries: Vec<Snapshot>,
    cursor: usize,
    original: Snapshot,
}

impl HistoryEngine {
    /// Create a history seeded with `initial`, which is also the reset target
    pub fn new(initial: Snapshot) -> Self {
        HistoryEngine {
            entries: vec![initial.clone()],
            cursor: 0,
            original: initial,
        }
    }

    /// Rebuild a history from a persisted record
    ///
    /// `default` stays the reset target. A record with no entries or an
    /// out-of-range index is discarded in favour of `default`.
    pub fn from_persisted(record: PersistedHistory, default: Snapshot) -> Self {
        if record.history.is_empty() || record.current_index >= record.history.len() {
            warn!(
                entries = record.history.len(),
                index = record.current_index,
                "Discarding inconsistent persisted history"
            );
            return Self::new(default);
        }

        HistoryEngine {
            entries: record.history,
            cursor: record.current_index,
            original: default,
        }
    }

    /// Export the persisted layout of this history
    pub fn to_persisted(&self) -> PersistedHistory {
        PersistedHistory {
            current_state: self.current().clone(),
            history: self.entries.clone(),
            current_index: self.cursor,
        }
    }

    /// Record a new snapshot and return the resulting cursor
    pub fn commit(&mut self, snapshot: Snapshot) -> usize {
        if snapshot == *self.current() {
            debug!(cursor = self.cursor, "Ignoring commit of unchanged snapshot");
            return self.cursor;
        }

        let discarded = self.entries.len() - self.cursor - 1;
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        debug!(cursor = self.cursor, discarded, "Committed snapshot");
        self.cursor
    }

    /// Step back one entry; a no-op at the start of history
    pub fn undo(&mut self) -> &Snapshot {
        if self.can_undo() {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step forward one entry; a no-op at the end of history
    pub fn redo(&mut self) -> &Snapshot {
        if self.can_redo() {
            self.cursor += 1;
        }
        self.current()
    }

    /// Drop all history and return to the original snapshot
    pub fn reset(&mut self) -> &Snapshot {
        self.entries = vec![self.original.clone()];
        self.cursor = 0;
        self.current()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() - 1
    }

    /// The current snapshot
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor]
    }

    /// All snapshots, oldest first
    pub fn entries(&self) -> &[Snapshot] {
        &self.entries
    }

    /// Index of the current snapshot
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots in history
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; history holds at least one snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot `reset` returns to
    pub fn original(&self) -> &Snapshot {
        &self.original
    }
}

impl Default for HistoryEngine {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}
