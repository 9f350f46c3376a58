//! Shared Module
//!
//! Types used by every part of the service that do not depend on the HTTP
//! stack: configuration loading, account field validation and the error
//! type those checks return.

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Account field validation
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
