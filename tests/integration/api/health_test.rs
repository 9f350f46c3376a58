//! Service route tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.get("/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_root_welcome() {
    let app = TestApp::new().await;
    let response = app.get("/", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Welcome to the FF Codex API");
}

#[tokio::test]
async fn test_version() {
    let app = TestApp::new().await;
    let response = app.get("/version", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(response.body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let app = TestApp::new().await;
    let response = app.get("/api/v1/nope", None).await;
    crate::assert_error!(response, StatusCode::NOT_FOUND, "Not Found");
}
