//! # portal-api
//!
//! HTTP API layer for Portal TI built on Axum.
//!
//! Provides the REST endpoints, middleware (CORS, request logging),
//! extractors (bearer auth, pagination, validated JSON), and DTOs.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
