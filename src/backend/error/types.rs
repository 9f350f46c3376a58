/**
 * Backend Error Types
 *
 * This module defines the single error type returned by handlers, account
 * operations and middleware. Every variant knows its HTTP status code.
 *
 * # Status Code Mapping
 *
 * - `HandlerError` - carries its own status (400, 403, 404 ...)
 * - `Unauthorized` - 401, rendered with `WWW-Authenticate: Bearer`
 * - `SharedError` - 400 (input validation)
 * - `TokenError` - 401
 * - `PasswordError` - 500
 * - `DatabaseError` - 404 for `RowNotFound`, otherwise 500
 * - `InternalError` - 500
 *
 * Server-side failures never leak their details to clients; the message
 * for any 500 is a fixed string and the cause goes to the log instead.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::passwords::PasswordError;
use crate::backend::auth::sessions::TokenError;
use crate::shared::SharedError;

/// Message used for every credential failure on protected routes
pub const CREDENTIALS_MESSAGE: &str = "Could not validate credentials";

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
///
/// ```rust
/// use axum::http::StatusCode;
/// use ffcodex_auth::backend::error::BackendError;
///
/// let err = BackendError::not_found("User not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Client error with an explicit status code
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing or rejected credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Input validation failure
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Token could not be issued or decoded
    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),

    /// Password hashing failure
    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    /// Database failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Any other server-side failure
    #[error("Internal error: {message}")]
    InternalError {
        /// Description for the log; never sent to clients
        message: String,
    },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    /// 403 Forbidden
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    /// 404 Not Found
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    /// 401 Unauthorized
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// 500 Internal Server Error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::TokenError(_) => StatusCode::UNAUTHORIZED,
            Self::PasswordError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::DatabaseError(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Unauthorized { message } => message.clone(),
            Self::SharedError(err) => err.message().to_string(),
            Self::TokenError(_) => CREDENTIALS_MESSAGE.to_string(),
            Self::DatabaseError(sqlx::Error::RowNotFound) => "Not found".to_string(),
            Self::PasswordError(_) | Self::DatabaseError(_) | Self::InternalError { .. } => {
                INTERNAL_MESSAGE.to_string()
            }
        }
    }
}

impl From<tokio::task::JoinError> for BackendError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("blocking task failed: {}", err))
    }
}
