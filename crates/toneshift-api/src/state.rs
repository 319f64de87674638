//! Application state for the API server

use std::sync::Arc;
use std::time::Instant;

use toneshift_cache::{CacheConfig, ResponseCache};
use toneshift_http::{HttpConfig, MistralRewriter, RewriteService};
use toneshift_pipeline::{RequestGate, RewritePipeline};
use tracing::warn;

use crate::config::ServerConfig;
use crate::error::ApiResult;

/// Application state shared across all API handlers
#[derive(Clone)]
pub struct AppState {
    /// Gate, cache and upstream service
    pub pipeline: Arc<RewritePipeline>,
    /// Server start time for uptime calculation
    pub start_time: Instant,
}

impl AppState {
    /// Build state that rewrites through the configured Mistral API
    pub fn new(config: &ServerConfig) -> ApiResult<Self> {
        if config.upstream.api_key.is_none() {
            warn!("MISTRAL_API_KEY is not set; upstream calls will be rejected");
        }

        let http = HttpConfig::new().with_timeout(config.pipeline().request_timeout);
        let rewriter = MistralRewriter::new(config.upstream.to_mistral(), http)?;
        Ok(Self::with_service(Arc::new(rewriter), config))
    }

    /// Build state around any rewrite service
    pub fn with_service(service: Arc<dyn RewriteService>, config: &ServerConfig) -> Self {
        let gate = Arc::new(RequestGate::new(config.rate_limit()));
        let cache = Arc::new(ResponseCache::new(CacheConfig {
            capacity: config.cache_capacity,
        }));
        let pipeline = RewritePipeline::new(gate, cache, service, config.pipeline());

        Self {
            pipeline: Arc::new(pipeline),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
