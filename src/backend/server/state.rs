/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct is the central state container, holding:
 * - The SQLite connection pool
 * - The validated configuration
 * - The token issuer built from that configuration
 *
 * Nothing in it is mutable. Cloning is cheap: the pool is reference counted
 * and everything else sits behind an `Arc`.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use ffcodex_auth::backend::server::state::AppState;
 *
 * async fn handler(State(state): State<AppState>) {
 *     let ttl = state.config.access_token_ttl;
 *     // ...
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenIssuer;
use crate::shared::AppConfig;

/// Application state shared by every handler and middleware
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Validated configuration
    pub config: Arc<AppConfig>,

    /// Signs and verifies session tokens
    pub tokens: Arc<TokenIssuer>,
}

impl AppState {
    /// Build state from a connected pool and validated configuration
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let tokens = TokenIssuer::new(&config);
        Self {
            db,
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the pool directly with
/// `State(pool): State<SqlitePool>`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
