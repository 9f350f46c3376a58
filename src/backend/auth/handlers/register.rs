/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/v1/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate username, email and password strength
 * 2. Check that neither email nor username is taken
 * 3. Hash password with a fresh per-user salt
 * 4. Create the user in the database
 * 5. Return the new profile
 *
 * No tokens are issued; clients log in afterwards.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::accounts;
use crate::backend::auth::handlers::types::{ApiJson, RegisterRequest, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Invalid username, email or weak password
/// * `400 Bad Request` - "Email already registered" / "Username already taken"
/// * `500 Internal Server Error` - Hashing or database failure
///
/// # Example Request
///
/// ```http
/// POST /api/v1/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "waiver_wire",
///   "email": "user@example.com",
///   "password": "Password123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "id": 1,
///   "username": "waiver_wire",
///   "email": "user@example.com",
///   "is_active": true,
///   "is_superuser": false,
///   "preferences": {},
///   "created_at": "2025-03-01T12:00:00Z",
///   "updated_at": "2025-03-01T12:00:00Z",
///   "last_login": null
/// }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    tracing::info!("Registration request for username: {}", request.username);

    let user = accounts::register(&state, request).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
