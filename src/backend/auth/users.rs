/**
 * User Model and Database Operations
 *
 * Row type for the `users` table and the queries the service runs against
 * it. Functions take the pool explicitly and return raw `sqlx::Error`s;
 * callers decide how a failure maps to HTTP.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::shared::validation::normalize_email;

/// User row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Auto-incremented identifier
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Unique, lower-cased email address
    pub email: String,
    /// bcrypt hash of password and salt
    pub hashed_password: String,
    /// Per-user salt (hex)
    pub salt: String,
    /// Inactive users cannot log in or use their tokens
    pub is_active: bool,
    /// Grants access to the admin endpoints
    pub is_superuser: bool,
    /// Free-form client preferences
    pub preferences: Json<serde_json::Value>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,
}

/// Authorization role carried in tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Scopes granted to this role
    pub fn scopes(self) -> Vec<String> {
        match self {
            Role::Admin => vec!["admin".to_string()],
            Role::User => vec!["user".to_string()],
        }
    }
}

impl User {
    /// Role derived from the superuser flag
    pub fn role(&self) -> Role {
        if self.is_superuser {
            Role::Admin
        } else {
            Role::User
        }
    }
}

/// Values for a new row
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub salt: String,
    pub is_superuser: bool,
}

/// Column that caused a uniqueness violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Email,
    Username,
}

/// Inspect a database error for a `users` uniqueness violation
pub fn unique_violation(err: &sqlx::Error) -> Option<UniqueField> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    if !db_err.is_unique_violation() {
        return None;
    }
    let message = db_err.message();
    if message.contains("users.email") {
        Some(UniqueField::Email)
    } else if message.contains("users.username") {
        Some(UniqueField::Username)
    } else {
        None
    }
}

/// Create a new user
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, hashed_password, salt, is_active, is_superuser, preferences, created_at, updated_at)
        VALUES (?, ?, ?, ?, 1, ?, ?, ?, ?)
        RETURNING *
        "#,
    )
    .bind(&new_user.username)
    .bind(normalize_email(&new_user.email))
    .bind(&new_user.hashed_password)
    .bind(&new_user.salt)
    .bind(new_user.is_superuser)
    .bind(Json(serde_json::json!({})))
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by email (case-insensitive)
pub async fn get_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(normalize_email(email))
        .fetch_optional(pool)
        .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by a login identifier
///
/// Anything containing `@` is treated as an email, everything else as a
/// username.
pub async fn get_user_by_login(
    pool: &SqlitePool,
    identifier: &str,
) -> Result<Option<User>, sqlx::Error> {
    if identifier.contains('@') {
        get_user_by_email(pool, identifier).await
    } else {
        get_user_by_username(pool, identifier.trim()).await
    }
}

/// List users ordered by ID
pub async fn list_users(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id LIMIT ? OFFSET ?")
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await
}

/// Overwrite the mutable profile columns of a user
///
/// Returns `None` if the user no longer exists.
pub async fn save_profile(pool: &SqlitePool, user: &User) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET username = ?, email = ?, hashed_password = ?, salt = ?, preferences = ?, updated_at = ?
        WHERE id = ?
        RETURNING *
        "#,
    )
    .bind(&user.username)
    .bind(normalize_email(&user.email))
    .bind(&user.hashed_password)
    .bind(&user.salt)
    .bind(&user.preferences)
    .bind(Utc::now())
    .bind(user.id)
    .fetch_optional(pool)
    .await
}

/// Activate or deactivate a user
pub async fn set_active_status(
    pool: &SqlitePool,
    id: i64,
    is_active: bool,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "UPDATE users SET is_active = ?, updated_at = ? WHERE id = ? RETURNING *",
    )
    .bind(is_active)
    .bind(Utc::now())
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Record a successful login
pub async fn record_login(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("UPDATE users SET last_login = ? WHERE id = ? RETURNING *")
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Delete a user, returning whether a row was removed
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
