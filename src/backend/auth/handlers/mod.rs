//! Authentication Handlers Module
//!
//! HTTP handlers for the authentication and user-management endpoints.
//! Each handler is a thin wrapper around an operation in
//! [`crate::backend::auth::accounts`].
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── types.rs     - Request and response types
//! ├── register.rs  - User registration handler
//! ├── login.rs     - Login and token refresh handlers
//! ├── me.rs        - Current user read/update/delete
//! └── admin.rs     - Superuser user management
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /api/v1/auth/register
//! - **`login`** - POST /api/v1/auth/login
//! - **`refresh`** - POST /api/v1/auth/refresh
//! - **`get_me`** / **`update_me`** / **`delete_me`** - GET/PUT/DELETE /api/v1/auth/me
//! - **`list_users`** - GET /api/v1/auth/users
//! - **`get_user`** - GET /api/v1/auth/users/{id}
//! - **`deactivate_user`** / **`activate_user`** - PATCH /api/v1/auth/users/{id}/...

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login and refresh handlers
pub mod login;

/// Current user handlers
pub mod me;

/// Admin handlers
pub mod admin;

// Re-export commonly used types
pub use types::{
    ApiJson, ApiPath, ApiQuery, LoginCredentials, LoginRequest, Pagination, RefreshRequest,
    RegisterRequest, UserPublic, UserResponse, UserUpdate,
};

// Re-export handlers
pub use admin::{activate_user, deactivate_user, get_user, list_users};
pub use login::{login, refresh};
pub use me::{delete_me, get_me, update_me};
pub use register::register;
