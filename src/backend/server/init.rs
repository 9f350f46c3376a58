/**
 * Server Initialization
 *
 * This module handles the setup of the Axum application: database loading,
 * state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Validate the configuration
 * 2. Connect to the database and apply migrations
 * 3. Build `AppState` (pool, configuration, token issuer)
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if the configuration is invalid or the database cannot be opened or
/// migrated. Unlike optional services, a missing database is fatal.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, BackendError> {
    let state = create_state(config).await?;
    Ok(build_app(state))
}

/// Validate configuration, connect and migrate
pub async fn create_state(config: AppConfig) -> Result<AppState, BackendError> {
    tracing::info!(
        "Initializing {} auth service ({})",
        config.project_name,
        config.environment
    );

    config.validate().map_err(|e| {
        tracing::error!("Invalid configuration: {}", e);
        BackendError::internal(e.to_string())
    })?;

    let db = load_database(&config).await?;
    Ok(AppState::new(db, config))
}

/// Router for an already-built state
pub fn build_app(state: AppState) -> Router<()> {
    let app = create_router(state);
    tracing::info!("Router configured");
    app
}
