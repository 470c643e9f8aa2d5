//! Dashboard handler.

use axum::Json;
use axum::extract::State;

use portal_core::error::AppError;
use portal_service::dashboard::DashboardSummary;

use crate::dto::response::ApiResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/dashboard
pub async fn summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let summary = state.dashboard_service.summary(&auth).await?;
    Ok(Json(ApiResponse::ok(summary)))
}
