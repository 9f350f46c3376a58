//! Authentication Module
//!
//! User registration, login, token refresh, profile management and admin
//! user management.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`passwords`** - Salted bcrypt hashing
//! - **`sessions`** - JWT access/refresh token issuing and verification
//! - **`accounts`** - Account rules shared by handlers and binaries
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── passwords.rs    - Salted password hashing
//! ├── sessions.rs     - JWT token management
//! ├── accounts.rs     - Account operations
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email and password → user created (no token)
//! 2. **Login**: username or email plus password → access and refresh tokens
//! 3. **Refresh**: refresh token → new token pair
//! 4. **Me**: access token → profile read, update or delete
//!
//! # Security
//!
//! - Passwords are stored as bcrypt hashes over password and per-user salt
//! - Access tokens expire after `JWT_ACCESS_TOKEN_EXPIRE_MINUTES`
//! - Refresh tokens are rejected where access tokens are expected, and vice versa
//! - Unknown users and wrong passwords get the same 401

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod passwords;

/// JWT token generation and validation
pub mod sessions;

/// Account operations
pub mod accounts;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types
pub use handlers::types::{LoginRequest, RegisterRequest, UserPublic, UserResponse, UserUpdate};
pub use sessions::{Claims, TokenError, TokenIssuer, TokenPair, TokenType};
pub use users::{Role, User};
