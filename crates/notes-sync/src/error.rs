//! Error Types
//!
//! Gateway, validation and configuration errors.

use std::time::Duration;

use thiserror::Error;

/// Common result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure of one remote call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No response arrived within the request bound
    #[error("{operation} timed out after {} ms", after.as_millis())]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
    /// Transport failure, rejected status, or malformed body
    #[error("{operation} failed: {message}")]
    OperationFailed {
        operation: &'static str,
        message: String,
    },
}

impl GatewayError {
    pub fn failed(operation: &'static str, message: impl Into<String>) -> Self {
        GatewayError::OperationFailed {
            operation,
            message: message.into(),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, GatewayError::Timeout { .. })
    }
}

/// Local form-field failure. Never blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title must be at least {min} characters")]
    TitleTooShort { min: usize },
    #[error("Title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("Note must be at least {min} characters")]
    BodyTooShort { min: usize },
}

/// Invalid client configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
    #[error("refresh_ack_timeout_ms ({ack_ms}) must exceed request_timeout_ms ({request_ms})")]
    AckBeforeRequest { ack_ms: u64, request_ms: u64 },
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
