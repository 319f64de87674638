//! Upstream rewrite through the Mistral chat completions API

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use toneshift_history::ToneLevel;
use tracing::{debug, warn};
use url::Url;

use crate::{
    client::{join_endpoint, RewriteService},
    config::HttpConfig,
    error::{Result, RewriteError, UPSTREAM_RATE_LIMITED_MESSAGE},
    tone::build_prompt,
};

/// Chat completions path, relative to the API root
const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

/// Mistral API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MistralConfig {
    /// Bearer key
    pub api_key: String,
    /// API root, without the `/v1` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,
    /// Upper bound on generated tokens, passed through to the API
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl MistralConfig {
    /// Config with defaults and the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }

    /// Set the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn default_base_url() -> String {
    "https://api.mistral.ai".to_string()
}

fn default_model() -> String {
    "mistral-small".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Rewrites text by prompting a Mistral model
pub struct MistralRewriter {
    inner: reqwest::Client,
    endpoint: Url,
    config: MistralConfig,
}

impl MistralRewriter {
    /// Create a rewriter
    pub fn new(config: MistralConfig, http: HttpConfig) -> Result<Self> {
        let endpoint = join_endpoint(&config.base_url, CHAT_COMPLETIONS_PATH)?;

        Ok(Self {
            inner: http.build_client()?,
            endpoint,
            config,
        })
    }

    /// Get configuration
    pub fn config(&self) -> &MistralConfig {
        &self.config
    }
}

#[async_trait]
impl RewriteService for MistralRewriter {
    async fn rewrite(&self, text: &str, tone_level: ToneLevel) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: build_prompt(text, tone_level),
            }],
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %self.config.model, tone = %tone_level, "Calling Mistral");
        let response = self
            .inner
            .post(self.endpoint.clone())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Mistral request failed");
            return Err(match status {
                reqwest::StatusCode::TOO_MANY_REQUESTS => {
                    RewriteError::rate_limited(UPSTREAM_RATE_LIMITED_MESSAGE)
                }
                _ => RewriteError::unknown(format!("HTTP {status}: {body}")),
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| RewriteError::unknown("Model returned no choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MistralConfig::new("key");
        assert_eq!(config.base_url, "https://api.mistral.ai");
        assert_eq!(config.model, "mistral-small");
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn test_endpoint() {
        let rewriter = MistralRewriter::new(
            MistralConfig::new("key").with_base_url("http://localhost:9000"),
            HttpConfig::default(),
        )
        .unwrap();
        assert_eq!(
            rewriter.endpoint.as_str(),
            "http://localhost:9000/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_under_proxy_prefix() {
        let rewriter = MistralRewriter::new(
            MistralConfig::new("key").with_base_url("https://gateway.internal/mistral"),
            HttpConfig::default(),
        )
        .unwrap();
        assert_eq!(
            rewriter.endpoint.as_str(),
            "https://gateway.internal/mistral/v1/chat/completions"
        );
    }
}
