//! Audit log handlers (admin).

use axum::Json;
use axum::extract::{Query, State};

use portal_core::error::AppError;
use portal_core::types::pagination::PageResponse;
use portal_entity::audit::AuditLogEntry;

use crate::dto::request::AuditQuery;
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams};
use crate::state::AppState;

/// GET /api/admin/audit?actor_id=&action=&target_type=&target_id=
pub async fn search_audit(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<ApiResponse<PageResponse<AuditLogEntry>>>, AppError> {
    let entries = state
        .audit_service
        .search(&auth, query.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(entries)))
}
