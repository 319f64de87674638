//! Rewrite error taxonomy

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message of a request refused by the local per-client gate
pub const GATE_REJECTED_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Message of a request refused by the upstream model's own rate limit
pub const UPSTREAM_RATE_LIMITED_MESSAGE: &str = "API rate limit exceeded. Please try again later.";

/// Result type for rewrite operations
pub type Result<T> = std::result::Result<T, RewriteError>;

/// Coarse failure class, stable across the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller error, never retried
    InvalidInput,
    /// Local gate or remote signal; the caller may retry later
    RateLimited,
    /// The rewrite service could not be reached
    Unavailable,
    /// Anything else
    Unknown,
}

/// Rewrite failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RewriteError {
    /// Request failed validation
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too many requests
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Connection-level failure or timeout
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Unclassified failure
    #[error("Rewrite failed: {0}")]
    Unknown(String),
}

impl RewriteError {
    /// Create a new InvalidInput error with context
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new RateLimited error with context
    pub fn rate_limited(msg: impl Into<String>) -> Self {
        Self::RateLimited(msg.into())
    }

    /// Request refused by the local per-client gate
    pub fn gate_rejected() -> Self {
        Self::RateLimited(GATE_REJECTED_MESSAGE.to_string())
    }

    /// Whether this is a local gate refusal rather than an upstream limit
    pub fn is_gate_rejection(&self) -> bool {
        matches!(self, RewriteError::RateLimited(msg) if msg == GATE_REJECTED_MESSAGE)
    }

    /// Create a new Unavailable error with context
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create a new Unknown error with context
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    /// Failure class
    pub fn kind(&self) -> ErrorKind {
        match self {
            RewriteError::InvalidInput(_) => ErrorKind::InvalidInput,
            RewriteError::RateLimited(_) => ErrorKind::RateLimited,
            RewriteError::Unavailable(_) => ErrorKind::Unavailable,
            RewriteError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Detail message without the class prefix
    pub fn message(&self) -> &str {
        match self {
            RewriteError::InvalidInput(msg)
            | RewriteError::RateLimited(msg)
            | RewriteError::Unavailable(msg)
            | RewriteError::Unknown(msg) => msg,
        }
    }

    /// HTTP status this failure is reported with
    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Classify an HTTP error status and its body message
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::BAD_REQUEST => RewriteError::InvalidInput(message),
            StatusCode::TOO_MANY_REQUESTS => RewriteError::RateLimited(message),
            StatusCode::SERVICE_UNAVAILABLE => RewriteError::Unavailable(message),
            _ => RewriteError::Unknown(format!("HTTP {status}: {message}")),
        }
    }
}

impl From<reqwest::Error> for RewriteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            RewriteError::Unavailable(err.to_string())
        } else if err.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
            RewriteError::RateLimited(err.to_string())
        } else {
            RewriteError::Unknown(err.to_string())
        }
    }
}

impl From<toneshift_history::HistoryError> for RewriteError {
    fn from(err: toneshift_history::HistoryError) -> Self {
        RewriteError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RewriteError::invalid_input("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RewriteError::rate_limited("x").status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            RewriteError::unavailable("x").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            RewriteError::unknown("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_status() {
        assert_eq!(
            RewriteError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down").kind(),
            ErrorKind::RateLimited
        );
        assert_eq!(
            RewriteError::from_status(StatusCode::SERVICE_UNAVAILABLE, "down").kind(),
            ErrorKind::Unavailable
        );
        assert_eq!(
            RewriteError::from_status(StatusCode::BAD_GATEWAY, "?").kind(),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn test_message_strips_prefix() {
        let err = RewriteError::rate_limited("Please try again later.");
        assert_eq!(err.message(), "Please try again later.");
        assert_eq!(err.to_string(), "Rate limit exceeded: Please try again later.");
    }
}
