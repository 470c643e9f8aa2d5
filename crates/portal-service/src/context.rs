//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built by the API extractor from the bearer token and passed into
/// service methods so every operation knows who is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's role at the time the token was issued.
    pub role: UserRole,
    /// The username (convenience field from token claims).
    pub username: String,
    /// IP address of the request origin.
    pub ip_address: Option<String>,
    /// When the request was received. Used as the timestamp of every change.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, role: UserRole, username: String, ip_address: Option<String>) -> Self {
        Self {
            user_id,
            role,
            username,
            ip_address,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
