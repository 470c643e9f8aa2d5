//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// An employee known to Portal TI.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier (matches the token subject).
    pub id: Uuid,
    /// Corporate login name.
    pub username: String,
    /// Full name shown on actas and clearances.
    pub full_name: String,
    /// Email address.
    pub email: Option<String>,
    /// Department or cost center.
    pub department: Option<String>,
    /// Role.
    pub role: UserRole,
    /// Whether the employee is still active.
    pub is_active: bool,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Login name.
    pub username: String,
    /// Full name.
    pub full_name: String,
    /// Email address.
    pub email: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}

/// Administrative update of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New role.
    pub role: Option<UserRole>,
    /// New active flag.
    pub is_active: Option<bool>,
    /// New department.
    pub department: Option<String>,
}
