//! Server Module
//!
//! Server-side setup for the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Database connection and migrations
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Database loading (SQLite, migrations)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig` is loaded by the caller and validated here
//! 2. **Database**: pool opened, migrations applied
//! 3. **State Creation**: pool, configuration and token issuer bundled into `AppState`
//! 4. **Router Creation**: routes and layers configured
//!
//! # Example
//!
//! ```rust,no_run
//! use ffcodex_auth::backend::server::create_app;
//! use ffcodex_auth::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Database setup
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use init::{build_app, create_app, create_state};
pub use state::AppState;
