//! Bearer token handling.

use axum::body::Body;
use http::{Request, StatusCode};
use uuid::Uuid;

use portal_auth::JwtEncoder;
use portal_core::config::AuthConfig;
use portal_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error_code};

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/users/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_error_code(&response, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/actas", None, Some("definitely-not-a-jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_error_code(&response, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = TestApp::new().await;
    let foreign = AuthConfig {
        jwt_secret: "some-other-secret".into(),
        ..app.config.auth.clone()
    };
    let token = JwtEncoder::new(&foreign)
        .generate_access_token(Uuid::new_v4(), UserRole::Admin, "intruder")
        .expect("Failed to mint token");

    let response = app.request("GET", "/api/dashboard", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_unauthorized() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/tickets")
        .header("Authorization", "Basic YWRtaW46YWRtaW4=")
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_error_code(&response, "UNAUTHORIZED");
}

#[tokio::test]
async fn test_acta_and_clearance_routes_require_token() {
    let app = TestApp::new().await;
    let id = Uuid::new_v4();

    let cases = [
        ("GET", "/api/actas".to_string()),
        ("POST", format!("/api/actas/{id}/sign")),
        ("POST", format!("/api/actas/{id}/approve")),
        ("GET", "/api/paz-y-salvo".to_string()),
        ("POST", format!("/api/paz-y-salvo/{id}/send")),
        ("POST", format!("/api/paz-y-salvo/{id}/close")),
    ];

    for (method, uri) in cases {
        let response = app.request(method, &uri, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        assert_error_code(&response, "UNAUTHORIZED");
    }
}
