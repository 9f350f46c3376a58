//! Backend Error Module
//!
//! Error types used by HTTP handlers, account operations and middleware.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! All backend errors implement `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and let `?` do the rest.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, CREDENTIALS_MESSAGE};
