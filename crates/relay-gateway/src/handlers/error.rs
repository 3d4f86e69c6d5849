//! Handler error types

use relay_core::DomainError;
use thiserror::Error;

/// Handler error type
///
/// Every variant concerns a single inbound frame; none of them closes the connection.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Frame is not a valid envelope
    #[error("Failed to decode message: {0}")]
    Decode(String),

    /// Envelope is fine but the payload is not
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Payload failed domain validation
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl HandlerError {
    /// Get an error code string for logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DECODE_ERROR",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::Domain(e) => e.code(),
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Handler result type
pub type HandlerResult<T> = Result<T, HandlerError>;
