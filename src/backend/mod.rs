//! Backend Module
//!
//! Server-side code for the FF Codex authentication service: an Axum HTTP
//! server that registers users, issues JWT bearer tokens, and manages
//! accounts stored in SQLite.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, database setup
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Passwords, JWT tokens, user persistence and handlers
//! - **`middleware`** - Bearer-token authentication and role extractors
//! - **`error`** - Backend error type and its HTTP mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! HTTP request → `auth_middleware` (protected routes only) → handler →
//! account operation → sqlx query → JSON response. Errors surface as
//! [`BackendError`], which renders itself as a JSON error body.
//!
//! # Thread Safety
//!
//! `AppState` is immutable after startup and cheap to clone; the SQLite pool
//! hands out one connection per request. bcrypt runs on Tokio's blocking pool
//! so it never stalls the async workers.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use server::create_app;
pub use error::BackendError;
