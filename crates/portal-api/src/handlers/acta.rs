//! Acta handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::Response;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::types::pagination::PageResponse;
use portal_entity::acta::{Acta, ActaStatus, ActaView};

use super::upload::read_file_part;
use crate::dto::request::{ActaQuery, AnnulActaRequest, ApproveActaRequest, RejectActaRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/actas?employee_id=&status=
pub async fn list_actas(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<ActaQuery>,
) -> Result<Json<ApiResponse<PageResponse<ActaView>>>, AppError> {
    let actas = state
        .acta_service
        .list(&auth, query.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(actas)))
}

/// GET /api/actas/{id}
pub async fn get_acta(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let acta = state.acta_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// GET /api/actas/{id}/transitions
pub async fn transitions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<ActaStatus>>>, AppError> {
    let next = state.acta_service.transitions(&auth, id).await?;
    Ok(Json(ApiResponse::ok(next)))
}

/// POST /api/actas/{id}/sign
pub async fn sign(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let acta = state.acta_service.sign(&auth, id).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// POST /api/actas/{id}/upload (multipart, field `file`)
pub async fn upload_signed(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let file = read_file_part(multipart).await?;
    let acta = state.acta_service.upload_signed(&auth, id, file).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// POST /api/actas/{id}/admin-upload (multipart, field `file`)
pub async fn admin_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let file = read_file_part(multipart).await?;
    let acta = state.acta_service.admin_upload(&auth, id, file).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// POST /api/actas/{id}/approve
pub async fn approve(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<ApproveActaRequest>,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let acta = state.acta_service.approve(&auth, id, req.comment).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// POST /api/actas/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<RejectActaRequest>,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let acta = state
        .acta_service
        .reject(&auth, id, req.observations)
        .await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// POST /api/actas/{id}/reopen
pub async fn reopen(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let acta = state.acta_service.reopen(&auth, id).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// POST /api/actas/{id}/annul
pub async fn annul(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AnnulActaRequest>,
) -> Result<Json<ApiResponse<Acta>>, AppError> {
    let acta = state.acta_service.annul(&auth, id, req.reason).await?;
    Ok(Json(ApiResponse::ok(acta)))
}

/// GET /api/actas/{id}/download
pub async fn download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let file = state.acta_service.download(&auth, id).await?;

    Response::builder()
        .header(header::CONTENT_TYPE, file.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}\"",
                file.file_name.replace('"', "")
            ),
        )
        .header(header::CONTENT_LENGTH, file.data.len())
        .body(Body::from(file.data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// DELETE /api/actas/{id}
pub async fn delete_acta(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.acta_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Acta deleted"))))
}
