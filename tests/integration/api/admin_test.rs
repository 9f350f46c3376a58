//! Admin API integration tests
//!
//! User listing and activation, restricted to active superusers.

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;

use crate::common::{create_test_admin, create_test_user, TestApp};
use crate::{assert_credentials_rejected, assert_error, assert_no_secrets, assert_status};

#[tokio::test]
async fn test_admin_routes_reject_anonymous() {
    let app = TestApp::new().await;

    let response = app.get("/api/v1/auth/users", None).await;
    assert_credentials_rejected!(response);
}

#[tokio::test]
async fn test_admin_routes_reject_regular_users() {
    let app = TestApp::new().await;
    let user = create_test_user(&app, "regular").await;

    let list = app
        .get("/api/v1/auth/users", Some(&user.access_token))
        .await;
    assert_error!(list, StatusCode::FORBIDDEN, "Not enough permissions");

    let deactivate = app
        .request(
            Method::PATCH,
            &format!("/api/v1/auth/users/{}/deactivate", user.user.id),
            None,
            Some(&user.access_token),
        )
        .await;
    assert_error!(deactivate, StatusCode::FORBIDDEN, "Not enough permissions");
}

#[tokio::test]
async fn test_list_users_with_pagination() {
    let app = TestApp::new().await;
    let admin = create_test_admin(&app, "commissioner").await;
    for name in ["alpha", "bravo", "charlie"] {
        create_test_user(&app, name).await;
    }

    let all = app
        .get("/api/v1/auth/users", Some(&admin.access_token))
        .await;
    assert_status!(all, StatusCode::OK);
    assert_eq!(all.body.as_array().unwrap().len(), 4);
    assert_no_secrets!(all.body);

    let page = app
        .get("/api/v1/auth/users?skip=1&limit=2", Some(&admin.access_token))
        .await;
    let names: Vec<&str> = page
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alpha", "bravo"]);

    let clamped = app
        .get("/api/v1/auth/users?limit=0", Some(&admin.access_token))
        .await;
    assert_eq!(clamped.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_user_by_id() {
    let app = TestApp::new().await;
    let admin = create_test_admin(&app, "commissioner").await;
    let user = create_test_user(&app, "alpha").await;

    let found = app
        .get(
            &format!("/api/v1/auth/users/{}", user.user.id),
            Some(&admin.access_token),
        )
        .await;
    assert_status!(found, StatusCode::OK);
    assert_eq!(found.body["username"], "alpha");
    assert!(found.body.get("email").is_none());

    let missing = app
        .get("/api/v1/auth/users/9999", Some(&admin.access_token))
        .await;
    assert_error!(missing, StatusCode::NOT_FOUND, "User not found");
}

#[tokio::test]
async fn test_deactivate_and_activate() {
    let app = TestApp::new().await;
    let admin = create_test_admin(&app, "commissioner").await;
    let user = create_test_user(&app, "alpha").await;

    let deactivated = app
        .request(
            Method::PATCH,
            &format!("/api/v1/auth/users/{}/deactivate", user.user.id),
            None,
            Some(&admin.access_token),
        )
        .await;
    assert_status!(deactivated, StatusCode::OK);
    assert_eq!(deactivated.body["is_active"], false);

    let blocked = app
        .get("/api/v1/auth/me", Some(&user.access_token))
        .await;
    assert_error!(blocked, StatusCode::BAD_REQUEST, "Inactive user");

    let activated = app
        .request(
            Method::PATCH,
            &format!("/api/v1/auth/users/{}/activate", user.user.id),
            None,
            Some(&admin.access_token),
        )
        .await;
    assert_eq!(activated.body["is_active"], true);

    let restored = app
        .get("/api/v1/auth/me", Some(&user.access_token))
        .await;
    assert_status!(restored, StatusCode::OK);
}

#[tokio::test]
async fn test_deactivated_admin_loses_access() {
    let app = TestApp::new().await;
    let admin = create_test_admin(&app, "commissioner").await;
    ffcodex_auth::backend::auth::accounts::set_active(&app.state, admin.user.id, false)
        .await
        .unwrap();

    let response = app
        .get("/api/v1/auth/users", Some(&admin.access_token))
        .await;
    assert_error!(response, StatusCode::BAD_REQUEST, "Inactive user");
}

#[tokio::test]
async fn test_unparseable_path_and_query_return_json_errors() {
    let app = TestApp::new().await;
    let admin = create_test_admin(&app, "commissioner").await;

    let bad_id = app
        .get("/api/v1/auth/users/abc", Some(&admin.access_token))
        .await;
    assert_status!(bad_id, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["status"], 400);
    assert!(
        bad_id.error().contains("Cannot parse `abc`"),
        "unexpected error: {}",
        bad_id.body
    );

    let bad_limit = app
        .get("/api/v1/auth/users?limit=lots", Some(&admin.access_token))
        .await;
    assert_status!(bad_limit, StatusCode::BAD_REQUEST);
    assert_eq!(bad_limit.body["status"], 400);
}
