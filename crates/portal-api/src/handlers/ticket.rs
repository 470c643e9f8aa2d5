//! Ticket handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::types::pagination::PageResponse;
use portal_entity::ticket::{Ticket, TicketMessage};

use crate::dto::request::{
    AssignTicketRequest, CreateTicketRequest, TicketMessageRequest, TicketQuery,
    TicketStatusRequest,
};
use crate::dto::response::ApiResponse;
use crate::extractors::{AuthUser, PaginationParams, ValidatedJson};
use crate::state::AppState;

/// GET /api/tickets?status=&requester_id=
pub async fn list_tickets(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
    Query(query): Query<TicketQuery>,
) -> Result<Json<ApiResponse<PageResponse<Ticket>>>, AppError> {
    let tickets = state
        .ticket_service
        .list(&auth, query.into(), params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(tickets)))
}

/// POST /api/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateTicketRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Ticket>>), AppError> {
    let ticket = state.ticket_service.create(&auth, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(ticket))))
}

/// GET /api/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = state.ticket_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// PUT /api/tickets/{id}/assign
pub async fn assign_ticket(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<AssignTicketRequest>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = state
        .ticket_service
        .assign(&auth, id, req.technician_id)
        .await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// PUT /api/tickets/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<TicketStatusRequest>,
) -> Result<Json<ApiResponse<Ticket>>, AppError> {
    let ticket = state
        .ticket_service
        .change_status(&auth, id, req.status)
        .await?;
    Ok(Json(ApiResponse::ok(ticket)))
}

/// GET /api/tickets/{id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<TicketMessage>>>, AppError> {
    let messages = state.ticket_service.list_messages(&auth, id).await?;
    Ok(Json(ApiResponse::ok(messages)))
}

/// POST /api/tickets/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(req): ValidatedJson<TicketMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TicketMessage>>), AppError> {
    let message = state
        .ticket_service
        .post_message(&auth, id, req.body)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(message))))
}
