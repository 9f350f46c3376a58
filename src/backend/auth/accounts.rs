/**
 * Account Operations
 *
 * Business rules for registration, login, token refresh, profile changes and
 * admin user management. Handlers stay thin and call into here; everything
 * returns [`BackendError`] with the status and message the API exposes.
 *
 * bcrypt hashing and verification run on Tokio's blocking pool.
 */

use sqlx::types::Json;

use crate::backend::auth::handlers::types::{Pagination, RegisterRequest, UserUpdate};
use crate::backend::auth::passwords::{generate_salt, hash_password, verify_password};
use crate::backend::auth::sessions::{TokenError, TokenPair};
use crate::backend::auth::users::{self, NewUser, UniqueField, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::validation::{validate_email, validate_password_strength, validate_username};
use crate::shared::SharedError;

pub const EMAIL_TAKEN: &str = "Email already registered";
pub const USERNAME_TAKEN: &str = "Username already taken";
pub const BAD_CREDENTIALS: &str = "Incorrect username or password";
pub const INACTIVE_USER: &str = "Inactive user";
pub const USER_NOT_FOUND: &str = "User not found";

/// Register a regular, active account
pub async fn register(state: &AppState, request: RegisterRequest) -> Result<User, BackendError> {
    create_account(state, request, false).await
}

/// Register an active superuser
pub async fn create_superuser(
    state: &AppState,
    request: RegisterRequest,
) -> Result<User, BackendError> {
    create_account(state, request, true).await
}

async fn create_account(
    state: &AppState,
    request: RegisterRequest,
    is_superuser: bool,
) -> Result<User, BackendError> {
    let username = validate_username(&request.username)?;
    let email = validate_email(&request.email)?;
    validate_password_strength(&request.password)?;

    if users::get_user_by_email(&state.db, &email).await?.is_some() {
        tracing::warn!("Registration rejected, email already registered");
        return Err(BackendError::bad_request(EMAIL_TAKEN));
    }
    if users::get_user_by_username(&state.db, &username).await?.is_some() {
        tracing::warn!("Registration rejected, username already taken: {}", username);
        return Err(BackendError::bad_request(USERNAME_TAKEN));
    }

    let (hashed_password, salt) = hash_in_background(request.password, state.config.bcrypt_cost).await?;

    let user = users::create_user(
        &state.db,
        NewUser {
            username,
            email,
            hashed_password,
            salt,
            is_superuser,
        },
    )
    .await
    .map_err(conflict_or_database)?;

    tracing::info!(
        "User created: {} (id {}, superuser: {})",
        user.username,
        user.id,
        user.is_superuser
    );
    Ok(user)
}

/// Check a login identifier and password
///
/// Unknown users and wrong passwords produce the same 401, and both pay
/// for one bcrypt run at the configured cost.
pub async fn authenticate(
    state: &AppState,
    login: &str,
    password: &str,
) -> Result<User, BackendError> {
    if login.trim().is_empty() || password.is_empty() {
        return Err(SharedError::empty("Username and password are required").into());
    }

    let found = users::get_user_by_login(&state.db, login).await?;
    let password_matches =
        check_credentials(password, found.as_ref(), state.config.bcrypt_cost).await?;

    let Some(user) = found else {
        tracing::warn!("Login failed, unknown user");
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    };
    if !password_matches {
        tracing::warn!("Login failed, wrong password for user {}", user.id);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    }

    if !user.is_active {
        tracing::warn!("Login rejected, user {} is inactive", user.id);
        return Err(BackendError::bad_request(INACTIVE_USER));
    }

    let user = users::record_login(&state.db, user.id)
        .await?
        .ok_or_else(|| BackendError::unauthorized(BAD_CREDENTIALS))?;

    tracing::info!("User logged in: {} (id {})", user.username, user.id);
    Ok(user)
}

/// Issue a token pair for an authenticated user
pub fn issue_tokens(state: &AppState, user: &User) -> Result<TokenPair, BackendError> {
    Ok(state.tokens.issue_pair(user)?)
}

/// Exchange a refresh token for a fresh pair
pub async fn refresh(state: &AppState, refresh_token: &str) -> Result<TokenPair, BackendError> {
    let claims = state.tokens.decode_refresh(refresh_token).map_err(|e| {
        tracing::warn!("Refresh rejected: {}", e);
        match e {
            TokenError::WrongType { .. } => BackendError::bad_request("Invalid token type"),
            _ => BackendError::bad_request("Invalid or expired refresh token"),
        }
    })?;

    let user = users::get_user_by_id(&state.db, claims.user_id)
        .await?
        .filter(|user| user.is_active && user.username == claims.sub)
        .ok_or_else(|| {
            tracing::warn!("Refresh rejected, user {} missing or inactive", claims.user_id);
            BackendError::not_found("User not found or inactive")
        })?;

    issue_tokens(state, &user)
}

/// Apply a profile update for `user`
pub async fn update_profile(
    state: &AppState,
    user: &User,
    update: UserUpdate,
) -> Result<User, BackendError> {
    let mut updated = user.clone();

    if let Some(new_password) = update.new_password.as_deref() {
        let current = update
            .current_password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                BackendError::bad_request("Current password is required to set a new password")
            })?;
        validate_password_strength(new_password)?;

        if !verify_in_background(current, user).await? {
            tracing::warn!("Password change rejected for user {}", user.id);
            return Err(BackendError::bad_request("Incorrect current password"));
        }

        let (hashed_password, salt) =
            hash_in_background(new_password.to_string(), state.config.bcrypt_cost).await?;
        updated.hashed_password = hashed_password;
        updated.salt = salt;
    }

    if let Some(email) = update.email.as_deref() {
        let email = validate_email(email)?;
        if email != user.email {
            if let Some(existing) = users::get_user_by_email(&state.db, &email).await? {
                if existing.id != user.id {
                    return Err(BackendError::bad_request(EMAIL_TAKEN));
                }
            }
        }
        updated.email = email;
    }

    if let Some(username) = update.username.as_deref() {
        let username = validate_username(username)?;
        if username != user.username {
            if let Some(existing) = users::get_user_by_username(&state.db, &username).await? {
                if existing.id != user.id {
                    return Err(BackendError::bad_request(USERNAME_TAKEN));
                }
            }
        }
        updated.username = username;
    }

    if let Some(preferences) = update.preferences {
        updated.preferences = Json(serde_json::Value::Object(preferences));
    }

    let saved = users::save_profile(&state.db, &updated)
        .await
        .map_err(conflict_or_database)?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;

    tracing::info!("Profile updated for user {}", saved.id);
    Ok(saved)
}

/// Permanently remove an account
pub async fn delete_account(state: &AppState, user_id: i64) -> Result<(), BackendError> {
    if !users::delete_user(&state.db, user_id).await? {
        return Err(BackendError::not_found(USER_NOT_FOUND));
    }
    tracing::info!("User {} deleted", user_id);
    Ok(())
}

/// Page through all users
pub async fn list_users(state: &AppState, page: Pagination) -> Result<Vec<User>, BackendError> {
    Ok(users::list_users(&state.db, page.offset(), page.page_size()).await?)
}

/// Look up a user by ID
pub async fn get_user(state: &AppState, user_id: i64) -> Result<User, BackendError> {
    users::get_user_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))
}

/// Activate or deactivate a user
pub async fn set_active(
    state: &AppState,
    user_id: i64,
    is_active: bool,
) -> Result<User, BackendError> {
    let user = users::set_active_status(&state.db, user_id, is_active)
        .await?
        .ok_or_else(|| BackendError::not_found(USER_NOT_FOUND))?;
    tracing::info!("User {} active status set to {}", user.id, user.is_active);
    Ok(user)
}

async fn hash_in_background(password: String, cost: u32) -> Result<(String, String), BackendError> {
    let salt = generate_salt();
    let hashed = tokio::task::spawn_blocking(move || {
        hash_password(&password, &salt, cost).map(|hash| (hash, salt))
    })
    .await??;
    Ok(hashed)
}

async fn verify_in_background(password: &str, user: &User) -> Result<bool, BackendError> {
    let password = password.to_string();
    let salt = user.salt.clone();
    let hashed = user.hashed_password.clone();
    let matches =
        tokio::task::spawn_blocking(move || verify_password(&password, &salt, &hashed)).await?;
    Ok(matches)
}

/// Verify against `user`, or burn an equivalent hash when there is none
async fn check_credentials(
    password: &str,
    user: Option<&User>,
    cost: u32,
) -> Result<bool, BackendError> {
    match user {
        Some(user) => verify_in_background(password, user).await,
        None => {
            hash_in_background(password.to_string(), cost).await?;
            Ok(false)
        }
    }
}

fn conflict_or_database(err: sqlx::Error) -> BackendError {
    match users::unique_violation(&err) {
        Some(UniqueField::Email) => BackendError::bad_request(EMAIL_TAKEN),
        Some(UniqueField::Username) => BackendError::bad_request(USERNAME_TAKEN),
        None => err.into(),
    }
}
