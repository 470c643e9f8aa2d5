//! Assignment handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::types::pagination::PageResponse;
use portal_entity::assignment::{Assignment, AssignmentView};

use crate::dto::request::{AssignmentQuery, CreateAssignmentRequest};
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// POST /api/assignments
pub async fn create_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Value>>), AppError> {
    let (assignment, acta) = state
        .assignment_service
        .assign(&auth, req.asset_id, req.employee_id, req.notes)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(json!({ "assignment": assignment, "acta": acta }))),
    ))
}

/// GET /api/assignments?employee_id=
pub async fn list_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<AssignmentQuery>,
) -> Result<Json<ApiResponse<PageResponse<AssignmentView>>>, AppError> {
    let items = state
        .assignment_service
        .list(&auth, query.employee_id, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/assignments/{id}/return
pub async fn return_asset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Assignment>>, AppError> {
    let assignment = state.assignment_service.return_asset(&auth, id).await?;
    Ok(Json(ApiResponse::ok(assignment)))
}

/// POST /api/assignments/{id}/lost
pub async fn mark_lost(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Assignment>>, AppError> {
    let assignment = state.assignment_service.mark_lost(&auth, id).await?;
    Ok(Json(ApiResponse::ok(assignment)))
}
