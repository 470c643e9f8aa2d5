//! Request body validation.

use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::json;

use portal_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error_code};

#[tokio::test]
async fn test_empty_asset_code_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Admin);

    let response = app
        .request(
            "POST",
            "/api/assets",
            Some(json!({
                "code": "",
                "name": "Monitor 24\"",
                "category": "Monitor",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_code(&response, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Admin);

    let request = Request::builder()
        .method("POST")
        .uri("/api/assets")
        .header("Authorization", format!("Bearer {token}"))
        .header("Content-Type", "application/json")
        .body(Body::from("{\"code\": "))
        .expect("Failed to build request");
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_code(&response, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Admin);

    let response = app
        .request(
            "POST",
            "/api/assets",
            Some(json!({ "code": "LT-0001" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_code(&response, "VALIDATION_ERROR");
}
