//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, service routes and layers
//! └── api_routes.rs   - Authentication and user-management API
//! ```
//!
//! # Route Types
//!
//! ## Service Routes
//!
//! - `GET /` - Welcome message
//! - `GET /health` - Liveness check, `{"status": "ok"}`
//! - `GET /version` - Package name and version
//!
//! ## API Routes
//!
//! Everything under `/api/v1/auth`; see [`api_routes`].

/// Main router creation
pub mod router;

/// API route configuration
pub mod api_routes;

pub use router::create_router;
