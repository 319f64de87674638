//! Shared doubles for pipeline tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use toneshift_cache::ResponseCache;
use toneshift_history::ToneLevel;
use toneshift_http::{RewriteError, RewriteService};
use toneshift_pipeline::{PipelineConfig, RateLimitConfig, RequestGate, RewritePipeline};

/// Rewrite service with canned answers, an optional delay and an optional failure
#[derive(Default)]
pub struct ScriptedService {
    calls: AtomicUsize,
    tones: Mutex<Vec<u8>>,
    delay: Duration,
    failure: Option<RewriteError>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn failing(failure: RewriteError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn failing_after(delay: Duration, failure: RewriteError) -> Self {
        Self {
            delay,
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn tones(&self) -> Vec<u8> {
        self.tones.lock().clone()
    }
}

/// Deterministic rewrite used by [`ScriptedService`]
pub fn canned(text: &str, tone_level: ToneLevel) -> String {
    match tone_level.value() {
        0..=24 => "Good day, world.".to_string(),
        75..=100 => "Hey world!".to_string(),
        level => format!("{text} [{level}]"),
    }
}

#[async_trait]
impl RewriteService for ScriptedService {
    async fn rewrite(&self, text: &str, tone_level: ToneLevel) -> Result<String, RewriteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tones.lock().push(tone_level.value());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(canned(text, tone_level)),
        }
    }
}

pub fn tone(level: i64) -> ToneLevel {
    ToneLevel::new(level).unwrap()
}

pub fn pipeline(service: Arc<ScriptedService>) -> RewritePipeline {
    pipeline_with(service, RateLimitConfig::default(), PipelineConfig::default())
}

pub fn pipeline_with(
    service: Arc<ScriptedService>,
    limits: RateLimitConfig,
    config: PipelineConfig,
) -> RewritePipeline {
    RewritePipeline::new(
        Arc::new(RequestGate::new(limits)),
        Arc::new(ResponseCache::with_capacity(50)),
        service,
        config,
    )
}
