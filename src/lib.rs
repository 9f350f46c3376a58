//! FF Codex Auth - Main Library
//!
//! Authentication and user-management service for the FF Codex
//! fantasy-football platform. It issues signed, time-limited bearer tokens,
//! verifies salted password hashes, and exposes account and admin endpoints
//! over HTTP.
//!
//! # Module Structure
//!
//! - **`shared`** - Types that do not depend on the HTTP server
//!   - Configuration (`AppConfig`, loaded from the environment)
//!   - Account field validation and its error type
//!
//! - **`backend`** - Server-side code
//!   - Axum router, middleware and handlers
//!   - Password hashing and JWT issuance
//!   - SQLite persistence via sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use ffcodex_auth::backend::server::init::create_app;
//! use ffcodex_auth::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Use app with axum::serve
//! # Ok(())
//! # }
//! ```

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
pub mod backend;
