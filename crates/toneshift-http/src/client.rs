//! Rewrite service trait and the ToneShift API client

use async_trait::async_trait;
use toneshift_history::ToneLevel;
use tracing::debug;
use url::Url;

use crate::{
    config::HttpConfig,
    error::{Result, RewriteError},
    models::{AdjustToneRequest, AdjustToneResponse, ErrorBody},
};

/// Path of the adjust-tone endpoint, relative to the server root
pub const ADJUST_TONE_PATH: &str = "api/adjust-tone";

/// Resolve `path` under `base_url`, keeping any path prefix of the base
pub(crate) fn join_endpoint(base_url: &str, path: &str) -> Result<Url> {
    let mut base =
        Url::parse(base_url).map_err(|e| RewriteError::invalid_input(format!("Invalid URL: {e}")))?;
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }

    base.join(path.trim_start_matches('/'))
        .map_err(|e| RewriteError::invalid_input(format!("Invalid URL: {e}")))
}

/// Anything that can rewrite text to a tone level
#[async_trait]
pub trait RewriteService: Send + Sync {
    /// Rewrite `text` in the style of `tone_level`
    async fn rewrite(&self, text: &str, tone_level: ToneLevel) -> Result<String>;
}

/// Client for a running ToneShift API server
pub struct HttpRewriteClient {
    inner: reqwest::Client,
    endpoint: Url,
    config: HttpConfig,
}

impl HttpRewriteClient {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: &str, config: HttpConfig) -> Result<Self> {
        let endpoint = join_endpoint(base_url, ADJUST_TONE_PATH)?;

        Ok(Self {
            inner: config.build_client()?,
            endpoint,
            config,
        })
    }

    /// Create a client with default configuration
    pub fn with_defaults(base_url: &str) -> Result<Self> {
        Self::new(base_url, HttpConfig::default())
    }

    /// Adjust-tone endpoint this client posts to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }
}

#[async_trait]
impl RewriteService for HttpRewriteClient {
    async fn rewrite(&self, text: &str, tone_level: ToneLevel) -> Result<String> {
        debug!("HTTP POST: {}", self.endpoint);

        let response = self
            .inner
            .post(self.endpoint.clone())
            .json(&AdjustToneRequest::new(text, tone_level))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("Error: {}", status.as_u16()),
            };
            return Err(RewriteError::from_status(status, message));
        }

        let body: AdjustToneResponse = response.json().await?;
        Ok(body.adjusted_text)
    }
}
