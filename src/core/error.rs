//! Error types and error handling for the customer lookup client.
//!
//! This module defines the error taxonomy used throughout the
//! client. Every failure is handled at the user action that
//! triggered it; nothing here is retried automatically.
//!
//! An empty search result is deliberately absent from this enum:
//! it is an informational outcome, not an error.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, LookupError>;

/// Main error type for the client
#[derive(Error, Debug)]
pub enum LookupError {
    /// Inline, non-fatal input problem. No network call was issued.
    #[error("{0}")]
    Validation(String),

    /// Missing or rejected session token.
    #[error("Authentication required")]
    AuthRequired,

    /// Non-success status or malformed body from the backend.
    #[error("{0}")]
    Backend(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl LookupError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this error should send the user back to the login page
    pub fn is_auth_required(&self) -> bool {
        matches!(self, LookupError::AuthRequired)
    }

    /// Check if this is an inline validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, LookupError::Validation(_))
    }

    /// Message to show the user for a failed action.
    ///
    /// Backend and validation messages are shown verbatim; anything else
    /// collapses to `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            LookupError::Validation(msg) | LookupError::Backend(msg) if !msg.is_empty() => {
                msg.clone()
            }
            _ => fallback.to_string(),
        }
    }
}
