/**
 * Authentication Handler Types
 *
 * Request and response types used by the authentication and user-management
 * handlers. Responses are built from [`User`] and never include the password
 * hash or salt.
 */

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::backend::auth::users::User;
use crate::backend::error::BackendError;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// 3-50 chars, letters, digits and underscores
    pub username: String,
    /// Email address, stored lower-cased
    pub email: String,
    /// Plain-text password (hashed before storage)
    pub password: String,
}

/// Login request
///
/// `username` may hold either a username or an email address. JSON bodies
/// may also send it as `email`.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

/// Login body accepted as either JSON or an HTML form
///
/// Form bodies (`application/x-www-form-urlencoded`) follow the OAuth2
/// password-flow field names so standard clients can log in; anything else
/// is parsed as JSON.
#[derive(Debug, Clone)]
pub struct LoginCredentials(pub LoginRequest);

impl<S> FromRequest<S> for LoginCredentials
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let request = if is_form {
            let Form(request) = Form::<LoginRequest>::from_request(req, state).await?;
            request
        } else {
            let Json(request) = Json::<LoginRequest>::from_request(req, state).await?;
            request
        };

        Ok(Self(request))
    }
}

/// JSON body whose parse failures render as [`BackendError`]
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters whose parse failures render as [`BackendError`]
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Query string whose parse failures render as [`BackendError`]
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Token refresh request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Profile update request
///
/// Every field is optional. Setting `new_password` requires
/// `current_password`. `preferences` must be a JSON object and replaces the
/// stored one.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
    pub preferences: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Pagination query for user listings
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    /// Largest page an admin can request
    pub const MAX_LIMIT: i64 = 100;

    /// Offset, never negative
    pub fn offset(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Page size, clamped to `1..=MAX_LIMIT`
    pub fn page_size(&self) -> i64 {
        self.limit
            .unwrap_or(Self::MAX_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }
}

/// Full profile, returned to the user themselves
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
    pub preferences: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
            preferences: user.preferences.0,
            created_at: user.created_at,
            updated_at: user.updated_at,
            last_login: user.last_login,
        }
    }
}

/// Public profile, returned by admin listings
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}
