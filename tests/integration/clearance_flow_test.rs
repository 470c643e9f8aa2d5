//! Paz y salvo flow and version checks through the HTTP API.

use http::StatusCode;
use serde_json::{Value, json};

use portal_entity::user::{User, UserRole};

use crate::helpers::{TestApp, TestResponse, assert_error_code};

struct Cast {
    admin: User,
    boss: User,
    it: User,
}

async fn cast(app: &TestApp) -> Cast {
    Cast {
        admin: app.create_user(UserRole::Admin).await,
        boss: app.create_user(UserRole::Usuario).await,
        it: app.create_user(UserRole::Tecnico).await,
    }
}

/// Open a two-step clearance (supervisor, then IT) for a fresh employee.
async fn open_clearance(app: &TestApp, cast: &Cast) -> Value {
    let employee = app.create_user(UserRole::Usuario).await;
    let response = app
        .request(
            "POST",
            "/api/paz-y-salvo",
            Some(json!({
                "employee_id": employee.id,
                "motive": "Renuncia voluntaria",
                "signers": [
                    { "role": "JefeInmediato", "signer_id": cast.boss.id },
                    { "role": "TI", "signer_id": cast.it.id },
                ],
            })),
            Some(&app.token(&cast.admin)),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "Borrador");
    response.body["data"].clone()
}

fn id_and_version(doc: &Value) -> (String, i64) {
    (
        doc["id"].as_str().expect("clearance id").to_string(),
        doc["row_version"].as_i64().expect("row_version"),
    )
}

async fn sign_as(app: &TestApp, user: &User, id: &str, role: &str, version: i64) -> TestResponse {
    app.request(
        "POST",
        &format!("/api/paz-y-salvo/{id}/sign?expected_version={version}"),
        Some(json!({ "role": role })),
        Some(&app.token(user)),
    )
    .await
}

#[tokio::test]
async fn test_stale_expected_version_is_conflict() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let cast = cast(&app).await;
    let (id, version) = id_and_version(&open_clearance(&app, &cast).await);
    let token = app.token(&cast.admin);
    let uri = format!("/api/paz-y-salvo/{id}?expected_version={version}");

    let first = app
        .request("PUT", &uri, Some(json!({ "observations": "Entrega parcial" })), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK, "{}", first.body);
    assert_eq!(first.body["data"]["row_version"], json!(version + 1));

    let second = app
        .request("PUT", &uri, Some(json!({ "observations": "Otra edición" })), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_error_code(&second, "CONFLICT");

    let current = app
        .request("GET", &format!("/api/paz-y-salvo/{id}"), None, Some(&token))
        .await;
    assert_eq!(current.body["data"]["observations"], "Entrega parcial");
    assert_eq!(current.body["data"]["row_version"], json!(version + 1));
}

#[tokio::test]
async fn test_sequential_signing_to_closure() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let cast = cast(&app).await;
    let (id, version) = id_and_version(&open_clearance(&app, &cast).await);
    let admin_token = app.token(&cast.admin);

    let response = app
        .request(
            "POST",
            &format!("/api/paz-y-salvo/{id}/send?expected_version={version}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "EnFirma");
    let (_, version) = id_and_version(&response.body["data"]);

    // IT must wait for the supervisor.
    let response = sign_as(&app, &cast.it, &id, "TI", version).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_error_code(&response, "VALIDATION_ERROR");

    let response = sign_as(&app, &cast.boss, &id, "JefeInmediato", version).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "EnFirma");
    let (_, version) = id_and_version(&response.body["data"]);

    let response = sign_as(&app, &cast.it, &id, "TI", version).await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "Aprobado");
    assert!(response.body["data"]["final_hash"].is_string());
    assert!(response.body["data"]["approved_at"].is_string());
    let (_, version) = id_and_version(&response.body["data"]);

    let response = app
        .request(
            "POST",
            &format!("/api/paz-y-salvo/{id}/close?expected_version={version}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["status"], "Cerrado");

    let actions: Vec<&str> = response.body["data"]["history"]
        .as_array()
        .expect("history")
        .iter()
        .filter_map(|h| h["action"].as_str())
        .collect();
    assert_eq!(
        actions,
        vec!["creado", "enviado_a_firma", "firmado", "firmado", "aprobado", "cerrado"]
    );

    // Cerrado is terminal.
    let (_, version) = id_and_version(&response.body["data"]);
    let response = app
        .request(
            "POST",
            &format!("/api/paz-y-salvo/{id}/close?expected_version={version}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
