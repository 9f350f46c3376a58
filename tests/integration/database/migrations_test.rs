//! Database migration tests
//!
//! Migrations against a real database file rather than memory.

use ffcodex_auth::backend::server::config::load_database;
use ffcodex_auth::shared::AppConfig;
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> AppConfig {
    let path = dir.path().join("auth.db");
    AppConfig::builder()
        .database_url(format!("sqlite://{}", path.display()))
        .jwt_secret_key("migration-test-secret")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_database_file_created_and_migrated() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let pool = load_database(&config).await.unwrap();
    assert!(dir.path().join("auth.db").exists());

    let result = sqlx::query("SELECT 1 FROM users LIMIT 1")
        .execute(&pool)
        .await;
    assert!(result.is_ok(), "Users table should exist");
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let first = load_database(&config).await.unwrap();
    first.close().await;

    let second = load_database(&config).await;
    assert!(second.is_ok(), "Reopening a migrated database should succeed");
}

#[tokio::test]
async fn test_users_columns_have_defaults() {
    let dir = TempDir::new().unwrap();
    let pool = load_database(&file_config(&dir)).await.unwrap();

    sqlx::query(
        "INSERT INTO users (username, email, hashed_password, salt, created_at, updated_at)
         VALUES ('raw', 'raw@example.com', 'h', 's', CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let (is_active, is_superuser, preferences): (bool, bool, String) = sqlx::query_as(
        "SELECT is_active, is_superuser, preferences FROM users WHERE username = 'raw'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(is_active);
    assert!(!is_superuser);
    assert_eq!(preferences, "{}");
}
