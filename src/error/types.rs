//! Core error types.

use thiserror::Error;

/// Coarse error classification.
///
/// Every `LlmError` variant maps onto exactly one kind, which is what callers
/// should match on when they only care about *where* a call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid arguments; raised before any I/O.
    Configuration,
    /// Local file could not be read.
    Io,
    /// Transport failure or non-success response from the remote service.
    RemoteCall,
    /// Structured output did not match the declared shape.
    SchemaValidation,
    /// The remote call did not finish within the configured timeout.
    Timeout,
}

/// Library error type.
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    /// Invalid or missing arguments
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Local file I/O failure
    #[error("IO error: {0}")]
    IoError(String),

    /// Non-success response from the remote service
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The remote service answered with a body we could not decode
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Structured output failed validation against the declared schema
    #[error("Schema validation error: {0}")]
    SchemaValidationError(String),

    /// Request timed out
    #[error("Timeout error: {0}")]
    TimeoutError(String),
}

impl LlmError {
    /// Create an API error without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create an API error carrying the decoded response body.
    pub fn api_error_with_details(
        code: u16,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: Some(details),
        }
    }

    /// Classify the error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigurationError(_) => ErrorKind::Configuration,
            Self::IoError(_) => ErrorKind::Io,
            Self::ApiError { .. } | Self::HttpError(_) | Self::ParseError(_) => {
                ErrorKind::RemoteCall
            }
            Self::SchemaValidationError(_) => ErrorKind::SchemaValidation,
            Self::TimeoutError(_) => ErrorKind::Timeout,
        }
    }

    /// HTTP status reported by the remote service, if any.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the error originated on the remote side of the call.
    pub const fn is_remote(&self) -> bool {
        matches!(self.kind(), ErrorKind::RemoteCall | ErrorKind::Timeout)
    }
}
