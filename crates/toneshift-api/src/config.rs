//! Server configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `toneshift.toml`, `TONESHIFT_*` environment variables, then the bare
//! `PORT` and `MISTRAL_API_KEY` variables.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use toneshift_cache::SERVER_CAPACITY;
use toneshift_http::MistralConfig;
use toneshift_pipeline::{PipelineConfig, RateLimitConfig};

use crate::error::ApiResult;

/// Upstream model settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Bearer key; requests fail upstream while unset
    pub api_key: Option<String>,
    /// API root
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Generated token limit
    pub max_tokens: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        let defaults = MistralConfig::new("");
        Self {
            api_key: None,
            base_url: defaults.base_url,
            model: defaults.model,
            max_tokens: defaults.max_tokens,
        }
    }
}

impl UpstreamConfig {
    /// Client settings for the Mistral rewriter
    pub fn to_mistral(&self) -> MistralConfig {
        MistralConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Listen port
    pub port: u16,
    /// Directory of the static client build
    pub static_dir: PathBuf,
    /// `tracing` level filter
    pub log_level: String,
    /// Response cache capacity
    pub cache_capacity: usize,
    /// Upper bound on one upstream call, in seconds
    pub request_timeout_secs: u64,
    /// Admissions allowed per client and window
    pub rate_limit_max_requests: usize,
    /// Rate limit window in milliseconds
    pub rate_limit_window_ms: u64,
    /// Upstream model settings
    pub upstream: UpstreamConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("client/build"),
            log_level: "info".to_string(),
            cache_capacity: SERVER_CAPACITY,
            request_timeout_secs: 30,
            rate_limit_max_requests: RateLimitConfig::default().max_requests,
            rate_limit_window_ms: RateLimitConfig::default().window_ms,
            upstream: UpstreamConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Pipeline timings derived from this config
    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..PipelineConfig::default()
        }
    }

    /// Per-client admission policy
    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            max_requests: self.rate_limit_max_requests,
            window_ms: self.rate_limit_window_ms,
        }
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply the unprefixed variables the deployment environment provides
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|port| port.parse().ok()) {
            self.port = port;
        }
        if self.upstream.api_key.is_none() {
            self.upstream.api_key = lookup("MISTRAL_API_KEY").filter(|key| !key.is_empty());
        }
    }

    /// Parsed log level, `INFO` when unrecognized
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

/// Layered configuration loader
pub struct ConfigLoader {
    config_path: PathBuf,
    env_prefix: String,
}

impl ConfigLoader {
    /// Loader reading the default config file and `TONESHIFT_*` variables
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: "TONESHIFT".to_string(),
        }
    }

    /// Loader reading `path` instead of the default file
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Override the environment prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Config file location
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("toneshift")
            .join("toneshift.toml")
    }

    /// Build the configuration from file and prefixed environment
    pub fn load(&self) -> ApiResult<ServerConfig> {
        let config = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// [`Self::load`] plus the unprefixed process variables
    pub fn load_with_env(&self) -> ApiResult<ServerConfig> {
        let mut config = self.load()?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.rate_limit().max_requests, 10);
        assert_eq!(config.upstream.model, "mistral-small");
        assert_eq!(config.upstream.max_tokens, 1000);
        assert_eq!(config.pipeline().request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = ConfigLoader::with_path(dir.path().join("absent.toml"))
            .with_env_prefix("TONESHIFT_TEST_ABSENT")
            .load()
            .unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("toneshift.toml");
        std::fs::write(
            &path,
            r#"
port = 8080
log_level = "debug"
rate_limit_max_requests = 3
rate_limit_window_ms = 1000

[upstream]
base_url = "http://localhost:9000"
"#,
        )
        .unwrap();

        let config = ConfigLoader::with_path(&path)
            .with_env_prefix("TONESHIFT_TEST_FILE")
            .load()
            .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.tracing_level(), tracing::Level::DEBUG);
        assert_eq!(config.rate_limit().max_requests, 3);
        assert_eq!(config.rate_limit().window_ms, 1000);
        assert_eq!(config.upstream.base_url, "http://localhost:9000");
        assert_eq!(config.upstream.model, "mistral-small");
        assert_eq!(config.cache_capacity, 100);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [("PORT", "4000"), ("MISTRAL_API_KEY", "secret")]
            .into_iter()
            .collect();
        let mut config = ServerConfig::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.port, 4000);
        assert_eq!(config.upstream.api_key.as_deref(), Some("secret"));
        assert_eq!(config.upstream.to_mistral().api_key, "secret");
    }

    #[test]
    fn test_configured_key_wins_and_bad_port_ignored() {
        let mut config = ServerConfig::default();
        config.upstream.api_key = Some("from-file".to_string());
        config.apply_overrides(|name| match name {
            "PORT" => Some("not-a-port".to_string()),
            "MISTRAL_API_KEY" => Some("from-env".to_string()),
            _ => None,
        });

        assert_eq!(config.port, 3000);
        assert_eq!(config.upstream.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = ServerConfig {
            log_level: "chatty".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }
}
