//! Error types for the Pixabay SDK.

use serde::Deserialize;

/// Result type for SDK operations.
pub type PixabayResult<T> = Result<T, PixabayError>;

/// Error types that can occur when talking to Pixabay.
#[derive(Debug, thiserror::Error)]
pub enum PixabayError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned a non-success status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Search parameters failed local validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl PixabayError {
    /// Create an API error from a status code and response body.
    ///
    /// Pixabay answers most failures with a plain-text body such as
    /// `[ERROR 400] "per_page" is out of valid range.`, but JSON bodies with a
    /// `message` field are honoured too.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(error_response) => error_response.message,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => format!("HTTP {}", status),
        };

        Self::Api { status, message }
    }

    /// HTTP status of the failed exchange, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The most specific message available: the upstream-provided message for
    /// API errors, otherwise the error's own text.
    pub fn upstream_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether this error came from the network exchange itself, as opposed to
    /// local configuration or validation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_plain_text() {
        let err = PixabayError::from_response(400, "[ERROR 400] Invalid or missing API key\n");
        match err {
            PixabayError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "[ERROR 400] Invalid or missing API key");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_response_json_message() {
        let err = PixabayError::from_response(429, r#"{"message": "Too many requests"}"#);
        assert_eq!(err.upstream_message(), "Too many requests");
        assert_eq!(err.status(), Some(429));
    }

    #[test]
    fn test_from_response_empty_body() {
        let err = PixabayError::from_response(503, "");
        assert_eq!(err.upstream_message(), "HTTP 503");
    }

    #[test]
    fn test_is_transport() {
        assert!(PixabayError::from_response(500, "boom").is_transport());
        assert!(!PixabayError::Config("missing key".to_string()).is_transport());
        assert!(!PixabayError::InvalidInput("bad".to_string()).is_transport());
    }
}
