//! Handover flow through the HTTP API against a real database.

use http::StatusCode;
use serde_json::{Value, json};

use portal_entity::user::UserRole;

use crate::helpers::{TestApp, assert_error_code};

#[tokio::test]
async fn test_assignment_opens_pending_acta() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.create_user(UserRole::Admin).await;
    let employee = app.create_user(UserRole::Usuario).await;
    let asset = app.create_asset().await;
    let admin_token = app.token(&admin);

    let response = app
        .request(
            "POST",
            "/api/assignments",
            Some(json!({ "asset_id": asset.id, "employee_id": employee.id })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["data"]["assignment"]["state"], "Activa");
    assert_eq!(response.body["data"]["acta"]["status"], "Pendiente");

    let response = app
        .request("GET", &format!("/api/assets/{}", asset.id), None, Some(&admin_token))
        .await;
    assert_eq!(response.body["data"]["status"], "Asignado");

    // The asset is no longer available for a second handover.
    let response = app
        .request(
            "POST",
            "/api/assignments",
            Some(json!({ "asset_id": asset.id, "employee_id": employee.id })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_acta_sign_approve_annul() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.create_user(UserRole::Admin).await;
    let employee = app.create_user(UserRole::Usuario).await;
    let stranger = app.create_user(UserRole::Usuario).await;
    let asset = app.create_asset().await;
    let admin_token = app.token(&admin);
    let employee_token = app.token(&employee);

    let response = app
        .request(
            "POST",
            "/api/assignments",
            Some(json!({ "asset_id": asset.id, "employee_id": employee.id })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let acta_id = response.body["data"]["acta"]["id"]
        .as_str()
        .expect("acta id")
        .to_string();

    // Only the receiving employee signs.
    let response = app
        .request(
            "POST",
            &format!("/api/actas/{acta_id}/sign"),
            None,
            Some(&app.token(&stranger)),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            &format!("/api/actas/{acta_id}/sign"),
            None,
            Some(&employee_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "Firmada");
    assert_eq!(response.body["data"]["signing_method"], "Digital");

    let response = app
        .request(
            "POST",
            &format!("/api/actas/{acta_id}/approve"),
            Some(json!({ "comment": "Recibido conforme" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "Aprobada");
    assert_eq!(response.body["data"]["approved_by"], json!(admin.id));

    // Aprobada cannot go back to Pendiente.
    let response = app
        .request(
            "POST",
            &format!("/api/actas/{acta_id}/reopen"),
            None,
            Some(&employee_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_code(&response, "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            &format!("/api/actas/{acta_id}/annul"),
            Some(json!({ "reason": "Equipo reemplazado" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "Anulada");

    let response = app
        .request(
            "GET",
            &format!("/api/actas/{acta_id}/transitions"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], Value::Array(Vec::new()));

    let response = app
        .request(
            "POST",
            &format!("/api/actas/{acta_id}/approve"),
            Some(json!({})),
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
