//! Asset inventory handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::types::pagination::PageResponse;
use portal_entity::asset::Asset;

use crate::dto::request::{AssetQuery, CreateAssetRequest, UpdateAssetRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/assets?status=&category=&search=
pub async fn list_assets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<AssetQuery>,
) -> Result<Json<ApiResponse<PageResponse<Asset>>>, AppError> {
    let assets = state
        .asset_service
        .list(&auth, query.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(assets)))
}

/// GET /api/assets/{id}
pub async fn get_asset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Asset>>, AppError> {
    let asset = state.asset_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(asset)))
}

/// POST /api/assets
pub async fn create_asset(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateAssetRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Asset>>), AppError> {
    let asset = state.asset_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(asset))))
}

/// PUT /api/assets/{id}
pub async fn update_asset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<UpdateAssetRequest>,
) -> Result<Json<ApiResponse<Asset>>, AppError> {
    let asset = state.asset_service.update(&auth, id, req.into()).await?;
    Ok(Json(ApiResponse::ok(asset)))
}

/// DELETE /api/assets/{id}
pub async fn delete_asset(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.asset_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Asset deleted"))))
}
