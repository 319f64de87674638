//! Wire models of the adjust-tone endpoint

use serde::{Deserialize, Serialize};
use toneshift_history::ToneLevel;
use utoipa::ToSchema;

use crate::error::{Result, RewriteError};

/// Adjust-tone request body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustToneRequest {
    /// Text to rewrite
    #[serde(default)]
    pub text: String,
    /// Tone dial, integer in `[0, 100]`
    #[schema(value_type = i64)]
    pub tone_level: serde_json::Number,
}

impl AdjustToneRequest {
    /// Build a request from already validated parts
    pub fn new(text: impl Into<String>, tone_level: ToneLevel) -> Self {
        Self {
            text: text.into(),
            tone_level: serde_json::Number::from(tone_level.value()),
        }
    }

    /// Validate the body, returning the parsed tone level
    pub fn validate(&self) -> Result<ToneLevel> {
        if self.text.trim().is_empty() {
            return Err(RewriteError::invalid_input("Text cannot be empty"));
        }

        self.tone_level
            .as_i64()
            .and_then(|level| ToneLevel::new(level).ok())
            .ok_or_else(|| {
                RewriteError::invalid_input("toneLevel must be a number between 0 and 100")
            })
    }
}

/// Adjust-tone success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustToneResponse {
    /// Rewritten text
    pub adjusted_text: String,
}

/// Error body shared by every failing response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Short error classification
    pub error: String,
    /// Human readable message
    pub message: String,
}

impl From<&RewriteError> for ErrorBody {
    fn from(err: &RewriteError) -> Self {
        let error = match err {
            RewriteError::InvalidInput(_) => "Invalid input",
            RewriteError::RateLimited(_) if err.is_gate_rejection() => "Too many requests",
            RewriteError::RateLimited(_) => "Rate limit",
            RewriteError::Unavailable(_) => "Service unavailable",
            RewriteError::Unknown(_) => "Server error",
        };
        let message = match err {
            RewriteError::InvalidInput(msg) | RewriteError::RateLimited(msg) => msg.clone(),
            RewriteError::Unavailable(_) => {
                "Unable to connect to the AI service. Please try again later.".to_string()
            }
            RewriteError::Unknown(_) => {
                "An error occurred while adjusting the text tone.".to_string()
            }
        };
        ErrorBody {
            error: error.to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> AdjustToneRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_wire_format() {
        let request = AdjustToneRequest::new("Hello", ToneLevel::new(10).unwrap());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "text": "Hello", "toneLevel": 10 })
        );
    }

    #[test]
    fn test_validate_ok() {
        let tone = parse(r#"{"text":"Hello","toneLevel":75}"#).validate().unwrap();
        assert_eq!(tone.value(), 75);
    }

    #[test]
    fn test_validate_rejects_blank_text() {
        let err = parse(r#"{"text":"   ","toneLevel":75}"#).validate().unwrap_err();
        assert_eq!(err, RewriteError::invalid_input("Text cannot be empty"));

        let err = parse(r#"{"toneLevel":75}"#).validate().unwrap_err();
        assert!(matches!(err, RewriteError::InvalidInput(_)));
    }

    #[test]
    fn test_validate_rejects_bad_tone() {
        for body in [
            r#"{"text":"Hi","toneLevel":101}"#,
            r#"{"text":"Hi","toneLevel":-3}"#,
            r#"{"text":"Hi","toneLevel":12.5}"#,
        ] {
            let err = parse(body).validate().unwrap_err();
            assert!(matches!(err, RewriteError::InvalidInput(_)), "{body}");
        }
    }

    #[test]
    fn test_error_body_from_error() {
        let body = ErrorBody::from(&RewriteError::unavailable("connection refused"));
        assert_eq!(body.error, "Service unavailable");
        assert!(!body.message.contains("refused"));

        let body = ErrorBody::from(&RewriteError::invalid_input("Text cannot be empty"));
        assert_eq!(body.message, "Text cannot be empty");
    }

    #[test]
    fn test_error_body_rate_limit_labels() {
        let body = ErrorBody::from(&RewriteError::gate_rejected());
        assert_eq!(body.error, "Too many requests");
        assert_eq!(body.message, "Rate limit exceeded. Please try again later.");

        let body = ErrorBody::from(&RewriteError::rate_limited(
            crate::error::UPSTREAM_RATE_LIMITED_MESSAGE,
        ));
        assert_eq!(body.error, "Rate limit");
        assert_eq!(body.message, "API rate limit exceeded. Please try again later.");
    }

    #[test]
    fn test_response_wire_format() {
        let response: AdjustToneResponse =
            serde_json::from_str(r#"{"adjustedText":"Hey there"}"#).unwrap();
        assert_eq!(response.adjusted_text, "Hey there");
    }
}
