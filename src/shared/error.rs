//! Shared Error Types
//!
//! Errors produced by input validation. They do not know about HTTP; the
//! backend maps them to `400 Bad Request`.
//!
//! # Usage
//!
//! ```rust
//! use ffcodex_auth::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "Username must be 3-50 characters");
//! assert_eq!(error.field(), "username");
//! ```
use thiserror::Error;

/// Errors raised while checking user-supplied values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A single field failed validation
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// The request carried nothing to act on
    #[error("Empty request: {message}")]
    EmptyRequest {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new empty-request error
    pub fn empty(message: impl Into<String>) -> Self {
        Self::EmptyRequest {
            message: message.into(),
        }
    }

    /// Name of the offending field, or an empty string for request-level errors
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
            Self::EmptyRequest { .. } => "",
        }
    }

    /// Message without the field prefix, suitable for API responses
    pub fn message(&self) -> &str {
        match self {
            Self::ValidationError { message, .. } => message,
            Self::EmptyRequest { message } => message,
        }
    }
}
