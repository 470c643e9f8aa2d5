//! Repository behavior that only a real database can show.

use uuid::Uuid;

use portal_database::VersionedUpdate;
use portal_database::repositories::{
    ActaRepository, AssetRepository, AssignmentRepository, PazYSalvoRepository,
};
use portal_entity::acta::ActaStatus;
use portal_entity::asset::AssetStatus;
use portal_entity::assignment::{AssignmentState, CreateAssignment};
use portal_entity::paz_y_salvo::embedded::encode_list;
use portal_entity::paz_y_salvo::signing::default_chain;
use portal_entity::paz_y_salvo::{CreatePazYSalvo, HistoryRecord, PazYSalvoStatus};
use portal_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_concurrent_writers_one_wins() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let requester = app.create_user(UserRole::Rrhh).await;
    let employee = app.create_user(UserRole::Usuario).await;
    let repo = PazYSalvoRepository::new(app.db.pool().clone());

    let created = repo
        .create(&CreatePazYSalvo {
            id: Uuid::new_v4(),
            employee_id: employee.id,
            requested_by: requester.id,
            motive: "Fin de contrato".into(),
            observations: None,
            signatures_json: encode_list(&default_chain()).expect("encode chain"),
            history_json: encode_list::<HistoryRecord>(&[]).expect("encode history"),
            asset_snapshot_json: "[]".into(),
        })
        .await
        .expect("create clearance");

    // Both writers loaded the same version.
    let mut first = created.clone();
    first.observations = Some("primero".into());
    let mut second = created.clone();
    second.observations = Some("segundo".into());

    let saved = match repo.update(&first, created.row_version).await.expect("first update") {
        VersionedUpdate::Updated(doc) => doc,
        VersionedUpdate::Conflict => panic!("first writer should win"),
    };
    assert_eq!(saved.row_version, created.row_version + 1);

    let outcome = repo
        .update(&second, created.row_version)
        .await
        .expect("second update");
    assert_eq!(outcome, VersionedUpdate::Conflict);

    let stored = repo
        .find_by_id(created.id)
        .await
        .expect("reload")
        .expect("clearance exists");
    assert_eq!(stored.observations.as_deref(), Some("primero"));
    assert_eq!(stored.status, PazYSalvoStatus::Borrador);

    // A missing row is not a conflict.
    let mut ghost = created.clone();
    ghost.id = Uuid::new_v4();
    assert!(repo.update(&ghost, 1).await.is_err());
}

#[tokio::test]
async fn test_create_with_acta_is_one_unit() {
    let Some(app) = TestApp::with_database().await else {
        return;
    };
    let admin = app.create_user(UserRole::Admin).await;
    let employee = app.create_user(UserRole::Usuario).await;
    let asset = app.create_asset().await;
    let pool = app.db.pool().clone();
    let assignments = AssignmentRepository::new(pool.clone());

    let data = CreateAssignment {
        asset_id: asset.id,
        employee_id: employee.id,
        assigned_by: admin.id,
        notes: Some("Entrega inicial".into()),
    };
    let (assignment, acta) = assignments
        .create_with_acta(&data)
        .await
        .expect("assign available asset");

    assert_eq!(assignment.state, AssignmentState::Activa);
    assert_eq!(acta.assignment_id, assignment.id);
    assert_eq!(acta.status, ActaStatus::Pendiente);

    let stored_asset = AssetRepository::new(pool.clone())
        .find_by_id(asset.id)
        .await
        .expect("reload asset")
        .expect("asset exists");
    assert_eq!(stored_asset.status, AssetStatus::Asignado);

    let stored_acta = ActaRepository::new(pool)
        .find_by_id(acta.id)
        .await
        .expect("reload acta");
    assert!(stored_acta.is_some());

    // A second handover of the same asset is refused and leaves nothing behind.
    assert!(assignments.create_with_acta(&data).await.is_err());
    let open = assignments
        .find_all_for_employee(employee.id)
        .await
        .expect("list assignments");
    assert_eq!(open.len(), 1);
}
