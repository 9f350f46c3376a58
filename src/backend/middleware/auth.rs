/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies the access token from the
 * `Authorization: Bearer` header, loads the user it names, and attaches both
 * to the request for handlers.
 *
 * Every credential failure is the same 401 with `WWW-Authenticate: Bearer`.
 * Handlers then pick an extractor for the access level they need:
 *
 * - [`CurrentUser`] - any authenticated user
 * - [`ActiveUser`] - authenticated and active (400 "Inactive user" otherwise)
 * - [`AdminUser`] - active superuser (403 "Not enough permissions" otherwise)
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::Claims;
use crate::backend::auth::users::{get_user_by_id, User};
use crate::backend::error::{BackendError, CREDENTIALS_MESSAGE};
use crate::backend::server::state::AppState;

/// User and token claims attached by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub claims: Claims,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Verifies it as an access token
/// 3. Loads the user from the database and checks it still matches the token
/// 4. Attaches [`AuthenticatedUser`] to request extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers().get(AUTHORIZATION).and_then(|h| h.to_str().ok()))
        .ok_or_else(|| {
            tracing::warn!("Missing or malformed Authorization header");
            credentials_error()
        })?;

    let claims = app_state.tokens.decode_access(token).map_err(|e| {
        tracing::warn!("Invalid token: {}", e);
        credentials_error()
    })?;

    let user = get_user_by_id(&app_state.db, claims.user_id)
        .await?
        .filter(|user| user.username == claims.sub)
        .ok_or_else(|| {
            tracing::warn!("Token names unknown user {}", claims.user_id);
            credentials_error()
        })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser { user, claims });

    Ok(next.run(request).await)
}

/// Pull the token out of a `Bearer <token>` header value
///
/// The scheme is matched case-insensitively.
pub fn bearer_token(header: Option<&str>) -> Option<&str> {
    let (scheme, token) = header?.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn credentials_error() -> BackendError {
    BackendError::unauthorized(CREDENTIALS_MESSAGE)
}

/// Axum extractor for any authenticated user
#[derive(Clone, Debug)]
pub struct CurrentUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                credentials_error()
            })?;

        Ok(CurrentUser(user))
    }
}

/// Axum extractor for an authenticated, active user
#[derive(Clone, Debug)]
pub struct ActiveUser(pub User);

impl<S> FromRequestParts<S> for ActiveUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(auth) = CurrentUser::from_request_parts(parts, state).await?;
        if !auth.user.is_active {
            tracing::warn!("Inactive user {} rejected", auth.user.id);
            return Err(BackendError::bad_request("Inactive user"));
        }
        Ok(ActiveUser(auth.user))
    }
}

/// Axum extractor for an active superuser
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ActiveUser(user) = ActiveUser::from_request_parts(parts, state).await?;
        if !user.is_superuser {
            tracing::warn!("User {} denied admin access", user.id);
            return Err(BackendError::forbidden("Not enough permissions"));
        }
        Ok(AdminUser(user))
    }
}
