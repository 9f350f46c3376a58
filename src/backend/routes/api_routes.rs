/**
 * API Route Handlers
 *
 * Routes under `/api/v1/auth`.
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/v1/auth/register` - User registration
 * - `POST /api/v1/auth/login` - Login (JSON or form body)
 * - `POST /api/v1/auth/refresh` - Exchange a refresh token
 *
 * ## Authenticated (active user)
 * - `GET /api/v1/auth/me` - Current profile
 * - `PUT /api/v1/auth/me` - Update profile
 * - `DELETE /api/v1/auth/me` - Delete account
 *
 * ## Admin (active superuser)
 * - `GET /api/v1/auth/users` - List users
 * - `GET /api/v1/auth/users/{id}` - Get a user
 * - `PATCH /api/v1/auth/users/{id}/deactivate` - Deactivate a user
 * - `PATCH /api/v1/auth/users/{id}/activate` - Activate a user
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::handlers::{
    activate_user, deactivate_user, delete_me, get_me, get_user, list_users, login, refresh,
    register, update_me,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

/// Prefix shared by every auth route
pub const AUTH_PREFIX: &str = "/api/v1/auth";

/// Configure API routes
///
/// Protected routes get [`auth_middleware`] as a route layer, so the public
/// routes merged alongside them never see it. Access level beyond "has a
/// valid token" is enforced by each handler's extractor.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh));

    let protected = Router::new()
        .route("/me", get(get_me).put(update_me).delete(delete_me))
        .route("/users", get(list_users))
        .route("/users/{user_id}", get(get_user))
        .route("/users/{user_id}/deactivate", patch(deactivate_user))
        .route("/users/{user_id}/activate", patch(activate_user))
        .route_layer(middleware::from_fn_with_state(app_state, auth_middleware));

    router.nest(AUTH_PREFIX, public.merge(protected))
}
