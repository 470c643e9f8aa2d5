//! Paz y salvo handlers.
//!
//! Mutating endpoints accept `?expected_version=N`; a stale version is
//! answered with 409.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::types::pagination::PageResponse;
use portal_entity::paz_y_salvo::PazYSalvoDetail;

use super::upload::read_file_part;
use crate::dto::request::{
    CreatePazYSalvoRequest, ExceptionRequest, PazYSalvoQuery, RejectPazYSalvoRequest,
    SignPazYSalvoRequest, UpdatePazYSalvoRequest, VersionQuery,
};
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

type DetailResponse = Result<Json<ApiResponse<PazYSalvoDetail>>, AppError>;

/// GET /api/paz-y-salvo?employee_id=&status=
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<PazYSalvoQuery>,
) -> Result<Json<ApiResponse<PageResponse<PazYSalvoDetail>>>, AppError> {
    let docs = state
        .paz_y_salvo_service
        .list(&auth, query.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(docs)))
}

/// POST /api/paz-y-salvo
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePazYSalvoRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PazYSalvoDetail>>), AppError> {
    let doc = state.paz_y_salvo_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(doc))))
}

/// GET /api/paz-y-salvo/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> DetailResponse {
    let doc = state.paz_y_salvo_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// PUT /api/paz-y-salvo/{id}
pub async fn update_draft(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
    ValidatedJson(req): ValidatedJson<UpdatePazYSalvoRequest>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .update_draft(&auth, id, req.into(), version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/snapshot
pub async fn refresh_snapshot(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .refresh_snapshot(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/send
pub async fn send_to_sign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .send_to_sign(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/sign
pub async fn sign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
    ValidatedJson(req): ValidatedJson<SignPazYSalvoRequest>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .sign(&auth, id, req.role, req.comment, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
    ValidatedJson(req): ValidatedJson<RejectPazYSalvoRequest>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .reject(&auth, id, req.role, req.comment, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/attachments (multipart, field `file`)
pub async fn attach(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
    multipart: Multipart,
) -> DetailResponse {
    let file = read_file_part(multipart).await?;
    let doc = state
        .paz_y_salvo_service
        .attach(&auth, id, file, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/exceptions
pub async fn add_exception(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
    ValidatedJson(req): ValidatedJson<ExceptionRequest>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .add_exception(&auth, id, req.motive, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}

/// POST /api/paz-y-salvo/{id}/close
pub async fn close(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(version): Query<VersionQuery>,
) -> DetailResponse {
    let doc = state
        .paz_y_salvo_service
        .close(&auth, id, version.expected_version)
        .await?;
    Ok(Json(ApiResponse::ok(doc)))
}
