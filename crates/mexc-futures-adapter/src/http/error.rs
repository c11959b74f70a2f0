/*
[INPUT]:  Error sources (HTTP transport, envelope codes, payload parsing, configuration)
[OUTPUT]: Structured error types with classification helpers
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::Method;
use thiserror::Error;

/// Main error type for the MEXC futures adapter
#[derive(Error, Debug)]
pub enum MexcError {
    /// Transport failure: connection, timeout or non-2xx status
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Envelope carried a code other than 200
    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    /// Signed request attempted on a client built without credentials
    #[error("Signed request requires API credentials")]
    MissingCredentials,

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Payload decoded but does not match the endpoint's shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Only GET and POST are dispatched; anything else is a caller bug
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),
}

impl MexcError {
    /// Check if the error is a defect in the caller rather than a runtime condition
    pub fn is_programming_error(&self) -> bool {
        matches!(self, MexcError::UnsupportedMethod(_))
    }

    /// Check if the exchange answered with a non-success envelope
    pub fn is_api_error(&self) -> bool {
        matches!(self, MexcError::Api { .. })
    }

    /// Create an API error from an envelope code and message
    pub fn api_error(code: i64, message: impl Into<String>) -> Self {
        MexcError::Api {
            code,
            message: message.into(),
        }
    }
}

/// Result type alias for MEXC operations
pub type Result<T> = std::result::Result<T, MexcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_programming_error() {
        assert!(MexcError::UnsupportedMethod(Method::DELETE).is_programming_error());
        assert!(!MexcError::MissingCredentials.is_programming_error());
        assert!(!MexcError::api_error(500, "system error").is_programming_error());
    }

    #[test]
    fn test_api_error_creation() {
        let err = MexcError::api_error(1001, "contract not exists");
        assert!(err.is_api_error());
        match err {
            MexcError::Api { code, message } => {
                assert_eq!(code, 1001);
                assert_eq!(message, "contract not exists");
            }
            _ => panic!("Expected Api error variant"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = MexcError::UnsupportedMethod(Method::PUT);
        assert_eq!(err.to_string(), "Unsupported HTTP method: PUT");

        let err = MexcError::api_error(602, "signature verification failed");
        assert_eq!(
            err.to_string(),
            "API error (code 602): signature verification failed"
        );
    }
}
