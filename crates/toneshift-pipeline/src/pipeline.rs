//! Rewrite request orchestration
//!
//! A tone change moves through
//! `Debouncing -> Gated -> CacheCheck -> (CacheHit | Calling) -> Done`,
//! failing out of `Gated` or `Calling` with a classified [`RewriteError`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use toneshift_cache::{fingerprint, ResponseCache};
use toneshift_history::ToneLevel;
use toneshift_http::{RewriteError, RewriteService};
use tracing::{debug, warn};

use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::gate::RequestGate;

/// Pipeline timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Quiet period before a tone change is issued
    pub debounce: Duration,
    /// Upper bound on one rewrite call
    pub request_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// How a rewrite result was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Blank text, returned unchanged
    Passthrough,
    /// Served from the response cache
    CacheHit,
    /// Produced by the rewrite service
    Rewritten,
}

/// A finished rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    /// Rewritten text
    pub text: String,
    /// Tone level it was rewritten to
    pub tone_level: ToneLevel,
    /// Where the text came from
    pub resolution: Resolution,
}

/// Result of a debounced request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// This request is the newest issued one; commit its result
    Completed {
        /// Request sequence number
        sequence: u64,
        /// The rewrite to commit
        rewrite: Rewrite,
    },
    /// A newer request exists; this one must not touch history
    Superseded {
        /// Request sequence number
        sequence: u64,
    },
}

/// Gate, cache and rewrite service wired together
///
/// The gate and cache are shared process-wide; the debounce and sequencing
/// state belongs to this instance, so each client session gets its own
/// pipeline.
pub struct RewritePipeline {
    gate: Arc<RequestGate>,
    cache: Arc<ResponseCache>,
    service: Arc<dyn RewriteService>,
    config: PipelineConfig,
    debouncer: Debouncer,
    latest_issued: AtomicU64,
}

impl RewritePipeline {
    /// Create a pipeline from shared components
    pub fn new(
        gate: Arc<RequestGate>,
        cache: Arc<ResponseCache>,
        service: Arc<dyn RewriteService>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            gate,
            cache,
            service,
            debouncer: Debouncer::new(config.debounce),
            config,
            latest_issued: AtomicU64::new(0),
        }
    }

    /// Debounced entry point for tone changes
    ///
    /// Only the newest request inside a debounce window is issued, and only
    /// the newest issued request may complete; everything else reports
    /// [`PipelineOutcome::Superseded`], including its failures.
    pub async fn request(
        &self,
        identity: &str,
        text: &str,
        tone_level: ToneLevel,
    ) -> Result<PipelineOutcome, RewriteError> {
        let sequence = self.debouncer.ticket();
        debug!(sequence, tone = %tone_level, "Debouncing tone change");

        if !self.debouncer.settle(sequence).await {
            debug!(sequence, "Dropped during debounce");
            return Ok(PipelineOutcome::Superseded { sequence });
        }

        self.latest_issued.fetch_max(sequence, Ordering::SeqCst);
        let result = self.process(identity, text, tone_level).await;

        if self.latest_issued.load(Ordering::SeqCst) != sequence {
            debug!(sequence, "Discarding result of superseded request");
            return Ok(PipelineOutcome::Superseded { sequence });
        }

        result.map(|rewrite| PipelineOutcome::Completed { sequence, rewrite })
    }

    /// Undebounced gate, cache and call path
    pub async fn process(
        &self,
        identity: &str,
        text: &str,
        tone_level: ToneLevel,
    ) -> Result<Rewrite, RewriteError> {
        if text.trim().is_empty() {
            return Ok(Rewrite {
                text: text.to_string(),
                tone_level,
                resolution: Resolution::Passthrough,
            });
        }

        let now = tokio::time::Instant::now().into_std();
        if !self.gate.admit(identity, now) {
            return Err(RewriteError::gate_rejected());
        }

        let key = fingerprint(text, tone_level);
        if let Some(cached) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(Rewrite {
                text: cached,
                tone_level,
                resolution: Resolution::CacheHit,
            });
        }

        debug!(key = %key, "Cache miss, calling rewrite service");
        let call = self.service.rewrite(text, tone_level);
        let rewritten = match tokio::time::timeout(self.config.request_timeout, call).await {
            Ok(Ok(rewritten)) => rewritten,
            Ok(Err(err)) => {
                warn!(key = %key, error = %err, "Rewrite failed");
                return Err(err);
            }
            Err(_) => {
                warn!(key = %key, timeout = ?self.config.request_timeout, "Rewrite timed out");
                return Err(RewriteError::unavailable(format!(
                    "Rewrite timed out after {:?}",
                    self.config.request_timeout
                )));
            }
        };

        self.cache.put(key, rewritten.clone());
        Ok(Rewrite {
            text: rewritten,
            tone_level,
            resolution: Resolution::Rewritten,
        })
    }

    /// Shared response cache
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Shared request gate
    pub fn gate(&self) -> &Arc<RequestGate> {
        &self.gate
    }

    /// Timing configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
