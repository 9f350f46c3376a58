//! Middleware Module
//!
//! HTTP middleware for the backend server. Middleware runs before handlers;
//! the extractors defined alongside it read what the middleware attached.
//!
//! # Architecture
//!
//! - **`auth`** - Bearer-token authentication and access-level extractors
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use ffcodex_auth::backend::middleware::{auth_middleware, ActiveUser};
//! use ffcodex_auth::backend::server::state::AppState;
//!
//! async fn whoami(ActiveUser(user): ActiveUser) -> String {
//!     user.username
//! }
//!
//! fn protected(state: AppState) -> Router<AppState> {
//!     Router::new()
//!         .route("/whoami", get(whoami))
//!         .route_layer(middleware::from_fn_with_state(state, auth_middleware))
//! }
//! ```

pub mod auth;

pub use auth::{auth_middleware, bearer_token, ActiveUser, AdminUser, AuthenticatedUser, CurrentUser};
