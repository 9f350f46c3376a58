//! Authentication API integration tests
//!
//! Registration, login (JSON and form), and token refresh.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{create_test_user, register_body, TestApp, TEST_PASSWORD};
use crate::{assert_error, assert_no_secrets, assert_status};

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/v1/auth/register",
            register_body("sleeper_pick", "Sleeper@Example.com"),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["username"], "sleeper_pick");
    assert_eq!(response.body["email"], "sleeper@example.com");
    assert_eq!(response.body["is_active"], true);
    assert_eq!(response.body["is_superuser"], false);
    assert_eq!(response.body["preferences"], json!({}));
    assert!(response.body["id"].as_i64().is_some());
    assert_no_secrets!(response.body);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    create_test_user(&app, "first").await;

    let response = app
        .post(
            "/api/v1/auth/register",
            register_body("second", "FIRST@example.com"),
        )
        .await;

    assert_error!(response, StatusCode::BAD_REQUEST, "Email already registered");
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::new().await;
    create_test_user(&app, "first").await;

    let response = app
        .post(
            "/api/v1/auth/register",
            register_body("first", "another@example.com"),
        )
        .await;

    assert_error!(response, StatusCode::BAD_REQUEST, "Username already taken");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::new().await;

    let weak = app
        .post(
            "/api/v1/auth/register",
            json!({"username": "rookie", "email": "rookie@example.com", "password": "password123"}),
        )
        .await;
    assert_error!(
        weak,
        StatusCode::BAD_REQUEST,
        "Password must contain at least one uppercase letter"
    );

    let bad_name = app
        .post(
            "/api/v1/auth/register",
            register_body("no spaces", "rookie@example.com"),
        )
        .await;
    assert_status!(bad_name, StatusCode::BAD_REQUEST);

    let bad_email = app
        .post("/api/v1/auth/register", register_body("rookie", "not-an-email"))
        .await;
    assert_error!(bad_email, StatusCode::BAD_REQUEST, "Invalid email address");
}

#[tokio::test]
async fn test_login_with_username_and_email() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "gm_jones").await;

    for login in ["gm_jones", "gm_jones@example.com", "GM_JONES@example.com"] {
        let response = app
            .post(
                "/api/v1/auth/login",
                json!({"username": login, "password": TEST_PASSWORD}),
            )
            .await;

        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["token_type"], "bearer");
        assert_eq!(response.body["expires_in"], 120 * 60);

        let access = response.body["access_token"].as_str().unwrap();
        let claims = app.state.tokens.decode_access(access).unwrap();
        assert_eq!(claims.user_id, user.user.id);
        assert_eq!(claims.sub, "gm_jones");
    }
}

#[tokio::test]
async fn test_login_json_email_field() {
    let app = TestApp::new().await;
    create_test_user(&app, "gm_jones").await;

    let response = app
        .post(
            "/api/v1/auth/login",
            json!({"email": "gm_jones@example.com", "password": TEST_PASSWORD}),
        )
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_login_form_body() {
    let app = TestApp::new().await;
    create_test_user(&app, "gm_jones").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username=gm_jones&password={}",
            TEST_PASSWORD
        )))
        .unwrap();
    let response = app.send(request).await;

    assert_status!(response, StatusCode::OK);
    assert!(response.body["access_token"].is_string());
    assert!(response.body["refresh_token"].is_string());
}

#[tokio::test]
async fn test_login_records_last_login() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "gm_jones").await;
    assert!(user.user.last_login.is_none());

    app.post(
        "/api/v1/auth/login",
        json!({"username": "gm_jones", "password": TEST_PASSWORD}),
    )
    .await;

    let me = app
        .get("/api/v1/auth/me", Some(&user.access_token))
        .await;
    assert!(me.body["last_login"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_user() {
    let app = TestApp::new().await;
    create_test_user(&app, "gm_jones").await;

    let wrong = app
        .post(
            "/api/v1/auth/login",
            json!({"username": "gm_jones", "password": "Wrong12345"}),
        )
        .await;
    assert_error!(wrong, StatusCode::UNAUTHORIZED, "Incorrect username or password");
    assert_eq!(wrong.headers[header::WWW_AUTHENTICATE], "Bearer");

    let unknown = app
        .post(
            "/api/v1/auth/login",
            json!({"username": "nobody", "password": TEST_PASSWORD}),
        )
        .await;
    assert_error!(unknown, StatusCode::UNAUTHORIZED, "Incorrect username or password");
}

#[tokio::test]
async fn test_login_inactive_user() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "benched").await;
    ffcodex_auth::backend::auth::accounts::set_active(&app.state, user.user.id, false)
        .await
        .unwrap();

    let response = app
        .post(
            "/api/v1/auth/login",
            json!({"username": "benched", "password": TEST_PASSWORD}),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Inactive user");
}

#[tokio::test]
async fn test_refresh_returns_new_pair() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "gm_jones").await;

    let response = app
        .post(
            "/api/v1/auth/refresh",
            json!({"refresh_token": user.refresh_token}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    let access = response.body["access_token"].as_str().unwrap();
    let refresh = response.body["refresh_token"].as_str().unwrap();
    assert!(app.state.tokens.decode_access(access).is_ok());
    assert!(app.state.tokens.decode_refresh(refresh).is_ok());
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "gm_jones").await;

    let response = app
        .post(
            "/api/v1/auth/refresh",
            json!({"refresh_token": user.access_token}),
        )
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Invalid token type");
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/v1/auth/refresh", json!({"refresh_token": "nope"}))
        .await;
    assert_error!(
        response,
        StatusCode::BAD_REQUEST,
        "Invalid or expired refresh token"
    );
}

#[tokio::test]
async fn test_refresh_for_deleted_user() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "gm_jones").await;
    ffcodex_auth::backend::auth::accounts::delete_account(&app.state, user.user.id)
        .await
        .unwrap();

    let response = app
        .post(
            "/api/v1/auth/refresh",
            json!({"refresh_token": user.refresh_token}),
        )
        .await;
    assert_error!(response, StatusCode::NOT_FOUND, "User not found or inactive");
}

#[tokio::test]
async fn test_malformed_bodies_return_json_errors() {
    let app = TestApp::new().await;

    let register = app
        .post("/api/v1/auth/register", json!({"username": "x"}))
        .await;
    assert_status!(register, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(register.body["status"], 422);
    assert!(
        register.error().contains("missing field `email`"),
        "unexpected error: {}",
        register.body
    );

    let refresh = app.post("/api/v1/auth/refresh", json!({})).await;
    assert_status!(refresh, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(refresh.error().contains("refresh_token"));

    let not_json = app
        .send(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_status!(not_json, StatusCode::BAD_REQUEST);
    assert_eq!(not_json.body["status"], 400);
}
