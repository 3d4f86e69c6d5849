//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid hour: {0} (expected 0-23)")]
    InvalidHour(i64),

    #[error("Invalid minute: {0} (expected 0-59)")]
    InvalidMinute(i64),

    #[error("Invalid clock time: {0:?} (expected HH:MM)")]
    InvalidClockTime(String),

    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl DomainError {
    /// Get an error code string for logs and client-facing messages
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidHour(_) => "INVALID_HOUR",
            Self::InvalidMinute(_) => "INVALID_MINUTE",
            Self::InvalidClockTime(_) => "INVALID_CLOCK_TIME",
            Self::InvalidField { .. } => "INVALID_FIELD",
        }
    }

    /// Create an invalid field error
    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidHour(_)
                | Self::InvalidMinute(_)
                | Self::InvalidClockTime(_)
                | Self::InvalidField { .. }
        )
    }
}
