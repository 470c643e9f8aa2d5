//! Route definitions for the Portal TI HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Multipart framing on top of the largest accepted file.
    let body_limit = state.config.storage.max_upload_size_bytes as usize + 64 * 1024;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(asset_routes())
        .merge(assignment_routes())
        .merge(acta_routes())
        .merge(paz_y_salvo_routes())
        .merge(ticket_routes())
        .merge(notification_routes())
        .merge(admin_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(handlers::user::me))
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route("/users/{id}", put(handlers::user::update_user))
}

fn asset_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assets",
            get(handlers::asset::list_assets).post(handlers::asset::create_asset),
        )
        .route(
            "/assets/{id}",
            get(handlers::asset::get_asset)
                .put(handlers::asset::update_asset)
                .delete(handlers::asset::delete_asset),
        )
}

fn assignment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/assignments",
            get(handlers::assignment::list_assignments)
                .post(handlers::assignment::create_assignment),
        )
        .route(
            "/assignments/{id}/return",
            post(handlers::assignment::return_asset),
        )
        .route("/assignments/{id}/lost", post(handlers::assignment::mark_lost))
}

fn acta_routes() -> Router<AppState> {
    Router::new()
        .route("/actas", get(handlers::acta::list_actas))
        .route(
            "/actas/{id}",
            get(handlers::acta::get_acta).delete(handlers::acta::delete_acta),
        )
        .route("/actas/{id}/transitions", get(handlers::acta::transitions))
        .route("/actas/{id}/sign", post(handlers::acta::sign))
        .route("/actas/{id}/upload", post(handlers::acta::upload_signed))
        .route("/actas/{id}/admin-upload", post(handlers::acta::admin_upload))
        .route("/actas/{id}/approve", post(handlers::acta::approve))
        .route("/actas/{id}/reject", post(handlers::acta::reject))
        .route("/actas/{id}/reopen", post(handlers::acta::reopen))
        .route("/actas/{id}/annul", post(handlers::acta::annul))
        .route("/actas/{id}/download", get(handlers::acta::download))
}

fn paz_y_salvo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/paz-y-salvo",
            get(handlers::paz_y_salvo::list).post(handlers::paz_y_salvo::create),
        )
        .route(
            "/paz-y-salvo/{id}",
            get(handlers::paz_y_salvo::get).put(handlers::paz_y_salvo::update_draft),
        )
        .route(
            "/paz-y-salvo/{id}/snapshot",
            post(handlers::paz_y_salvo::refresh_snapshot),
        )
        .route(
            "/paz-y-salvo/{id}/send",
            post(handlers::paz_y_salvo::send_to_sign),
        )
        .route("/paz-y-salvo/{id}/sign", post(handlers::paz_y_salvo::sign))
        .route("/paz-y-salvo/{id}/reject", post(handlers::paz_y_salvo::reject))
        .route(
            "/paz-y-salvo/{id}/attachments",
            post(handlers::paz_y_salvo::attach),
        )
        .route(
            "/paz-y-salvo/{id}/exceptions",
            post(handlers::paz_y_salvo::add_exception),
        )
        .route("/paz-y-salvo/{id}/close", post(handlers::paz_y_salvo::close))
}

fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tickets",
            get(handlers::ticket::list_tickets).post(handlers::ticket::create_ticket),
        )
        .route("/tickets/{id}", get(handlers::ticket::get_ticket))
        .route("/tickets/{id}/assign", put(handlers::ticket::assign_ticket))
        .route("/tickets/{id}/status", put(handlers::ticket::change_status))
        .route(
            "/tickets/{id}/messages",
            get(handlers::ticket::list_messages).post(handlers::ticket::post_message),
        )
}

fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/audit", get(handlers::audit::search_audit))
        .route("/dashboard", get(handlers::dashboard::summary))
}
