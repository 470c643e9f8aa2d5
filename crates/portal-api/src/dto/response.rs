//! Response DTOs.
//!
//! Every success body is wrapped as `{ "success": true, "data": ... }`;
//! failures are rendered by `AppError` itself.

use serde::{Deserialize, Serialize};

/// Envelope for successful responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Acknowledgement for commands that return no resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Unread notification badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: i64,
}

/// Liveness payload for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness payload for `GET /api/health/detailed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// `"ok"` when every dependency answered, `"degraded"` otherwise.
    pub status: String,
    pub database: String,
    pub storage: String,
}

impl DetailedHealthResponse {
    /// Build the report from the database ping and the file store check.
    pub fn from_checks(database_ok: bool, storage_ok: bool) -> Self {
        let healthy = database_ok && storage_ok;
        Self {
            status: if healthy { "ok" } else { "degraded" }.to_string(),
            database: if database_ok { "connected" } else { "unavailable" }.to_string(),
            storage: if storage_ok { "available" } else { "unavailable" }.to_string(),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::ok(CountResponse { count: 3 })).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true, "data": { "count": 3 } }));
    }

    #[test]
    fn test_detailed_health_degrades_on_any_failure() {
        assert!(DetailedHealthResponse::from_checks(true, true).is_healthy());

        let db_down = DetailedHealthResponse::from_checks(false, true);
        assert!(!db_down.is_healthy());
        assert_eq!(db_down.database, "unavailable");
        assert_eq!(db_down.storage, "available");

        assert!(!DetailedHealthResponse::from_checks(true, false).is_healthy());
    }
}
