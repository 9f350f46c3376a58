/**
 * Login and Refresh Handlers
 *
 * POST /api/v1/auth/login exchanges credentials for a token pair;
 * POST /api/v1/auth/refresh exchanges a refresh token for a new one.
 *
 * # Authentication Process
 *
 * 1. Look up user by email (identifier contains `@`) or username
 * 2. Verify the salted password hash
 * 3. Reject inactive accounts
 * 4. Record the login time
 * 5. Return access and refresh tokens
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::accounts;
use crate::backend::auth::handlers::types::{ApiJson, LoginCredentials, RefreshRequest};
use crate::backend::auth::sessions::TokenPair;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// Accepts a JSON body or an `application/x-www-form-urlencoded` form with
/// `username` and `password` fields.
///
/// # Errors
///
/// * `401 Unauthorized` - Unknown user or wrong password (same message for both)
/// * `400 Bad Request` - Inactive user, or missing fields
/// * `500 Internal Server Error` - Database or token failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/auth/login HTTP/1.1
/// Content-Type: application/x-www-form-urlencoded
///
/// username=waiver_wire&password=Password123
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///   "token_type": "bearer",
///   "expires_in": 7200
/// }
/// ```
pub async fn login(
    State(state): State<AppState>,
    LoginCredentials(request): LoginCredentials,
) -> Result<Json<TokenPair>, BackendError> {
    let user = accounts::authenticate(&state, &request.username, &request.password).await?;
    let tokens = accounts::issue_tokens(&state, &user)?;
    Ok(Json(tokens))
}

/// Refresh handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid, expired, or non-refresh token
/// * `404 Not Found` - User missing or inactive
pub async fn refresh(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> Result<Json<TokenPair>, BackendError> {
    let tokens = accounts::refresh(&state, &request.refresh_token).await?;
    tracing::info!("Tokens refreshed");
    Ok(Json(tokens))
}
