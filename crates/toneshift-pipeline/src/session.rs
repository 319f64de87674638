//! Editing session tying history, persistence and the pipeline together

use std::sync::Arc;

use parking_lot::Mutex;
use toneshift_history::{HistoryEngine, Snapshot, SnapshotStore, ToneLevel};
use toneshift_http::RewriteError;
use tracing::{debug, info, warn};

use crate::pipeline::{PipelineOutcome, Resolution, RewritePipeline};

/// Message shown after a failed tone adjustment
pub const ADJUST_FAILED_MESSAGE: &str = "Failed to adjust text tone. Please try again.";

struct SessionState {
    history: HistoryEngine,
    last_error: Option<String>,
}

/// One user's editing session
///
/// Every mutation is written through the snapshot store. Store failures are
/// logged and otherwise ignored.
pub struct ToneSession {
    state: Mutex<SessionState>,
    store: Arc<dyn SnapshotStore>,
    pipeline: RewritePipeline,
    identity: String,
}

impl ToneSession {
    /// Open a session, restoring persisted history when there is any
    pub fn open(
        store: Arc<dyn SnapshotStore>,
        pipeline: RewritePipeline,
        identity: impl Into<String>,
        default: Snapshot,
    ) -> Self {
        let history = match store.load() {
            Ok(Some(record)) => HistoryEngine::from_persisted(record, default),
            Ok(None) => HistoryEngine::new(default),
            Err(err) => {
                warn!(error = %err, "Error loading persisted history");
                HistoryEngine::new(default)
            }
        };
        let identity = identity.into();
        info!(identity = %identity, entries = history.len(), "Opened tone session");

        Self {
            state: Mutex::new(SessionState {
                history,
                last_error: None,
            }),
            store,
            pipeline,
            identity,
        }
    }

    /// Replace the text, keeping the current tone
    pub fn edit_text(&self, text: impl Into<String>) -> usize {
        let mut state = self.state.lock();
        let snapshot = state.history.current().with_text(text);
        let cursor = state.history.commit(snapshot);
        self.persist(&state.history);
        cursor
    }

    /// Rewrite the current text to `tone_level` and commit the result
    ///
    /// Blank text is never committed. A failure leaves history untouched and
    /// sets [`Self::last_error`].
    pub async fn adjust_tone(
        &self,
        tone_level: ToneLevel,
    ) -> Result<PipelineOutcome, RewriteError> {
        let text = {
            let mut state = self.state.lock();
            state.last_error = None;
            state.history.current().text().to_string()
        };

        let outcome = self.pipeline.request(&self.identity, &text, tone_level).await;

        let mut state = self.state.lock();
        match &outcome {
            Ok(PipelineOutcome::Completed { rewrite, .. })
                if rewrite.resolution == Resolution::Passthrough =>
            {
                debug!(tone = %rewrite.tone_level, "Blank text, nothing to commit");
            }
            Ok(PipelineOutcome::Completed { rewrite, .. }) => {
                let snapshot = Snapshot::new(rewrite.text.clone(), rewrite.tone_level);
                state.history.commit(snapshot);
                self.persist(&state.history);
            }
            Ok(PipelineOutcome::Superseded { .. }) => {}
            Err(err) => {
                warn!(error = %err, "Error adjusting tone");
                state.last_error = Some(ADJUST_FAILED_MESSAGE.to_string());
            }
        }
        outcome
    }

    /// Step back one entry
    pub fn undo(&self) -> Snapshot {
        let mut state = self.state.lock();
        let current = state.history.undo().clone();
        self.persist(&state.history);
        current
    }

    /// Step forward one entry
    pub fn redo(&self) -> Snapshot {
        let mut state = self.state.lock();
        let current = state.history.redo().clone();
        self.persist(&state.history);
        current
    }

    /// Return to the default snapshot, dropping all history
    pub fn reset(&self) -> Snapshot {
        let mut state = self.state.lock();
        let current = state.history.reset().clone();
        self.persist(&state.history);
        current
    }

    /// Current snapshot
    pub fn current(&self) -> Snapshot {
        self.state.lock().history.current().clone()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.state.lock().history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.state.lock().history.can_redo()
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.state.lock().history.len()
    }

    /// Index of the current entry
    pub fn cursor(&self) -> usize {
        self.state.lock().history.cursor()
    }

    /// User-visible message from the last failed adjustment
    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    /// The pipeline this session issues requests through
    pub fn pipeline(&self) -> &RewritePipeline {
        &self.pipeline
    }

    fn persist(&self, history: &HistoryEngine) {
        if let Err(err) = self.store.save(&history.to_persisted()) {
            warn!(error = %err, "Error saving history");
        }
    }
}
