//! Role checks that reject before touching the database.

use http::StatusCode;
use serde_json::json;

use portal_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error_code};

#[tokio::test]
async fn test_usuario_cannot_read_audit_log() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Usuario);

    let response = app
        .request("GET", "/api/admin/audit", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_error_code(&response, "FORBIDDEN");
}

#[tokio::test]
async fn test_usuario_cannot_view_dashboard() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Usuario);

    let response = app.request("GET", "/api/dashboard", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_usuario_cannot_create_asset() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Usuario);

    let response = app
        .request(
            "POST",
            "/api/assets",
            Some(json!({
                "code": "LT-0042",
                "name": "Laptop Dell Latitude",
                "category": "Portatil",
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_error_code(&response, "FORBIDDEN");
}

#[tokio::test]
async fn test_usuario_cannot_review_actas() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Usuario);
    let id = uuid::Uuid::new_v4();

    for action in ["approve", "annul"] {
        let response = app
            .request(
                "POST",
                &format!("/api/actas/{id}/{action}"),
                Some(json!({})),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{action}");
        assert_error_code(&response, "FORBIDDEN");
    }
}

#[tokio::test]
async fn test_usuario_cannot_open_or_close_clearances() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Usuario);
    let id = uuid::Uuid::new_v4();

    let response = app
        .request(
            "POST",
            "/api/paz-y-salvo",
            Some(json!({
                "employee_id": uuid::Uuid::new_v4(),
                "motive": "Renuncia voluntaria",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/paz-y-salvo/{id}/close?expected_version=1"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_error_code(&response, "FORBIDDEN");
}

#[tokio::test]
async fn test_only_admin_approves_clearance_exceptions() {
    let app = TestApp::new().await;
    let token = app.token_for(UserRole::Rrhh);

    let response = app
        .request(
            "POST",
            &format!("/api/paz-y-salvo/{}/exceptions", uuid::Uuid::new_v4()),
            Some(json!({ "motive": "Equipo extraviado con denuncia" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
