//! Application error types
//!
//! Errors that can stop the relay from starting or serving.

use crate::config::ConfigError;
use std::fmt;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // Listener errors
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(String),
}

impl AppError {
    /// Get an error code string for logs
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Bind { .. } => "BIND_ERROR",
            Self::Server(_) => "SERVER_ERROR",
        }
    }

    /// Create a bind error for an address
    pub fn bind(addr: impl fmt::Display, source: std::io::Error) -> Self {
        Self::Bind {
            addr: addr.to_string(),
            source,
        }
    }

    /// Create a server error
    pub fn server(msg: impl fmt::Display) -> Self {
        Self::Server(msg.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
