//! API error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use toneshift_http::{ErrorBody, RewriteError};

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Classified rewrite failure
    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Socket or file failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Rewrite(err) => StatusCode::from_u16(err.status().as_u16())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Rewrite(err) => ErrorBody::from(err),
            other => {
                tracing::error!(error = %other, "Unhandled server error");
                ErrorBody::from(&RewriteError::unknown(other.to_string()))
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (RewriteError::invalid_input("x"), StatusCode::BAD_REQUEST),
            (RewriteError::rate_limited("x"), StatusCode::TOO_MANY_REQUESTS),
            (RewriteError::unavailable("x"), StatusCode::SERVICE_UNAVAILABLE),
            (RewriteError::unknown("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
        assert_eq!(
            ApiError::Internal("x".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
