//! Clearance entity and typed access to its embedded collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::AppResult;

use super::embedded::{decode_list, encode_list};
use super::records::{
    AssetSnapshotRecord, AttachmentRecord, ExceptionRecord, HistoryRecord, SignatureRecord,
};
use super::status::PazYSalvoStatus;

/// A clearance request row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PazYSalvo {
    /// Unique identifier.
    pub id: Uuid,
    /// Employee being cleared.
    pub employee_id: Uuid,
    /// Who opened the request.
    pub requested_by: Uuid,
    /// Current status.
    pub status: PazYSalvoStatus,
    /// Reason for leaving.
    pub motive: String,
    /// Free-text observations.
    pub observations: Option<String>,
    /// Embedded signatures (JSON text).
    pub signatures_json: Option<String>,
    /// Embedded history (JSON text).
    pub history_json: Option<String>,
    /// Embedded attachments (JSON text).
    pub attachments_json: Option<String>,
    /// Embedded exceptions (JSON text).
    pub exceptions_json: Option<String>,
    /// Embedded asset snapshot (JSON text).
    pub asset_snapshot_json: Option<String>,
    /// Hash over the signature chain, set on approval.
    pub final_hash: Option<String>,
    /// Generated document path.
    pub pdf_path: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// When it went out for signatures.
    pub sent_at: Option<DateTime<Utc>>,
    /// When it was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When it was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency stamp.
    pub row_version: i32,
}

impl PazYSalvo {
    /// Signatures, in stored order.
    pub fn signatures(&self) -> Vec<SignatureRecord> {
        decode_list(self.signatures_json.as_deref(), "signatures")
    }

    /// Replace the signatures.
    pub fn set_signatures(&mut self, items: &[SignatureRecord]) -> AppResult<()> {
        self.signatures_json = Some(encode_list(items)?);
        Ok(())
    }

    /// History entries, oldest first.
    pub fn history(&self) -> Vec<HistoryRecord> {
        decode_list(self.history_json.as_deref(), "history")
    }

    /// Replace the history.
    pub fn set_history(&mut self, items: &[HistoryRecord]) -> AppResult<()> {
        self.history_json = Some(encode_list(items)?);
        Ok(())
    }

    /// Attachments.
    pub fn attachments(&self) -> Vec<AttachmentRecord> {
        decode_list(self.attachments_json.as_deref(), "attachments")
    }

    /// Replace the attachments.
    pub fn set_attachments(&mut self, items: &[AttachmentRecord]) -> AppResult<()> {
        self.attachments_json = Some(encode_list(items)?);
        Ok(())
    }

    /// Approved exceptions.
    pub fn exceptions(&self) -> Vec<ExceptionRecord> {
        decode_list(self.exceptions_json.as_deref(), "exceptions")
    }

    /// Replace the exceptions.
    pub fn set_exceptions(&mut self, items: &[ExceptionRecord]) -> AppResult<()> {
        self.exceptions_json = Some(encode_list(items)?);
        Ok(())
    }

    /// Asset snapshot.
    pub fn asset_snapshot(&self) -> Vec<AssetSnapshotRecord> {
        decode_list(self.asset_snapshot_json.as_deref(), "asset_snapshot")
    }

    /// Replace the asset snapshot.
    pub fn set_asset_snapshot(&mut self, items: &[AssetSnapshotRecord]) -> AppResult<()> {
        self.asset_snapshot_json = Some(encode_list(items)?);
        Ok(())
    }

    pub fn is_draft(&self) -> bool {
        self.status == PazYSalvoStatus::Borrador
    }

    pub fn is_in_signing(&self) -> bool {
        self.status == PazYSalvoStatus::EnFirma
    }

    pub fn is_approved(&self) -> bool {
        self.status == PazYSalvoStatus::Aprobado
    }

    pub fn is_rejected(&self) -> bool {
        self.status == PazYSalvoStatus::Rechazado
    }

    pub fn is_closed(&self) -> bool {
        self.status == PazYSalvoStatus::Cerrado
    }

    /// Only drafts go out for signatures.
    pub fn can_be_sent_to_sign(&self) -> bool {
        self.is_draft()
    }

    /// Only approved requests can be closed.
    pub fn can_be_closed(&self) -> bool {
        self.is_approved()
    }

    /// Closed and rejected requests accept no further changes.
    pub fn is_final(&self) -> bool {
        self.is_closed() || self.is_rejected()
    }

    /// Decode every embedded collection for presentation.
    pub fn to_detail(&self) -> PazYSalvoDetail {
        PazYSalvoDetail {
            id: self.id,
            employee_id: self.employee_id,
            requested_by: self.requested_by,
            status: self.status,
            motive: self.motive.clone(),
            observations: self.observations.clone(),
            signatures: self.signatures(),
            history: self.history(),
            attachments: self.attachments(),
            exceptions: self.exceptions(),
            asset_snapshot: self.asset_snapshot(),
            final_hash: self.final_hash.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            sent_at: self.sent_at,
            approved_at: self.approved_at,
            closed_at: self.closed_at,
            row_version: self.row_version,
        }
    }
}

/// Clearance with decoded collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PazYSalvoDetail {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub requested_by: Uuid,
    pub status: PazYSalvoStatus,
    pub motive: String,
    pub observations: Option<String>,
    pub signatures: Vec<SignatureRecord>,
    pub history: Vec<HistoryRecord>,
    pub attachments: Vec<AttachmentRecord>,
    pub exceptions: Vec<ExceptionRecord>,
    pub asset_snapshot: Vec<AssetSnapshotRecord>,
    pub final_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub approved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub row_version: i32,
}

/// Data for inserting a new clearance.
#[derive(Debug, Clone)]
pub struct CreatePazYSalvo {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub requested_by: Uuid,
    pub motive: String,
    pub observations: Option<String>,
    pub signatures_json: String,
    pub history_json: String,
    pub asset_snapshot_json: String,
}
