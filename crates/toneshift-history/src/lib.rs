#![warn(missing_docs)]

//! Undo/Redo history for ToneShift
//!
//! Tracks every `(text, tone level)` state of an editing session as an
//! immutable [`Snapshot`], navigates them with a cursor, and persists the
//! whole stack through a [`SnapshotStore`].

pub mod error;
pub mod history;
pub mod persistence;
pub mod snapshot;

// Re-export public API
pub use error::{HistoryError, Result};
pub use history::HistoryEngine;
pub use persistence::{FileSnapshotStore, MemorySnapshotStore, PersistedHistory, SnapshotStore};
pub use snapshot::{Snapshot, ToneLevel};
