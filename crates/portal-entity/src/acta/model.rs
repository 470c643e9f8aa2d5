//! Acta entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::signing::SigningMethod;
use super::status::ActaStatus;

/// Record of an asset handed to, and accepted by, an employee.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Acta {
    /// Unique acta identifier.
    pub id: Uuid,
    /// The assignment this acta documents.
    pub assignment_id: Uuid,
    /// Current status.
    pub status: ActaStatus,
    /// How it was signed (set once signed).
    pub signing_method: Option<SigningMethod>,
    /// Original name of the uploaded file.
    pub file_name: Option<String>,
    /// Storage path of the uploaded file.
    pub file_path: Option<String>,
    /// Rejection observations.
    pub observations: Option<String>,
    /// Approval comment.
    pub approval_comment: Option<String>,
    /// Administrator who approved it.
    pub approved_by: Option<Uuid>,
    /// When the acta was created.
    pub created_at: DateTime<Utc>,
    /// When a file was uploaded.
    pub uploaded_at: Option<DateTime<Utc>>,
    /// When it was signed.
    pub signed_at: Option<DateTime<Utc>>,
    /// When it was approved.
    pub approved_at: Option<DateTime<Utc>>,
}

impl Acta {
    /// Whether a signed file is attached.
    pub fn has_file(&self) -> bool {
        self.file_path.is_some()
    }
}

/// Acta joined with its assignment, for listings and permission checks.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActaView {
    /// Acta identifier.
    pub id: Uuid,
    /// Assignment identifier.
    pub assignment_id: Uuid,
    /// Employee who holds the asset.
    pub employee_id: Uuid,
    /// Asset identifier.
    pub asset_id: Uuid,
    /// Asset inventory code.
    pub asset_code: String,
    /// Asset name.
    pub asset_name: String,
    /// Current status.
    pub status: ActaStatus,
    /// Signing method.
    pub signing_method: Option<SigningMethod>,
    /// Original file name.
    pub file_name: Option<String>,
    /// When the acta was created.
    pub created_at: DateTime<Utc>,
    /// When it was signed.
    pub signed_at: Option<DateTime<Utc>>,
    /// When it was approved.
    pub approved_at: Option<DateTime<Utc>>,
}
