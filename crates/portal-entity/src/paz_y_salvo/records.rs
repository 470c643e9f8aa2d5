//! Value records embedded in a clearance row.
//!
//! None of these has an identity of its own beyond its position in the list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::PazYSalvoStatus;

/// A signing step in the approval chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureRole {
    /// Direct supervisor.
    JefeInmediato,
    /// Human resources.
    RecursosHumanos,
    /// Accounting.
    Contabilidad,
    /// IT: confirms every asset came back.
    #[serde(rename = "TI")]
    Ti,
    /// Finance management.
    GerenciaFinanciera,
}

impl SignatureRole {
    /// Default approval chain, in signing order.
    pub const DEFAULT_CHAIN: [SignatureRole; 4] = [
        Self::JefeInmediato,
        Self::Contabilidad,
        Self::Ti,
        Self::GerenciaFinanciera,
    ];

    /// Return the role as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::JefeInmediato => "JefeInmediato",
            Self::RecursosHumanos => "RecursosHumanos",
            Self::Contabilidad => "Contabilidad",
            Self::Ti => "TI",
            Self::GerenciaFinanciera => "GerenciaFinanciera",
        }
    }
}

impl std::fmt::Display for SignatureRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State of one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureState {
    /// Not signed yet.
    Pendiente,
    /// Signed.
    Firmada,
    /// Rejected by the signer.
    Rechazada,
}

/// One signing step and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Role that signs this step.
    pub role: SignatureRole,
    /// Assigned signer.
    pub signer_id: Option<Uuid>,
    /// Outcome.
    pub state: SignatureState,
    /// When it was signed or rejected.
    pub signed_at: Option<DateTime<Utc>>,
    /// Signer's comment.
    pub comment: Option<String>,
    /// SHA-256 of the signature payload.
    pub hash: Option<String>,
    /// Position in the chain (1-based).
    pub order: u32,
    /// Whether approval requires this step.
    pub mandatory: bool,
}

impl SignatureRecord {
    /// A pending, mandatory step.
    pub fn pending(role: SignatureRole, signer_id: Option<Uuid>, order: u32) -> Self {
        Self {
            role,
            signer_id,
            state: SignatureState::Pendiente,
            signed_at: None,
            comment: None,
            hash: None,
            order,
            mandatory: true,
        }
    }

    /// Whether this step is still open.
    pub fn is_pending(&self) -> bool {
        self.state == SignatureState::Pendiente
    }
}

/// One entry of the append-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Who acted.
    pub actor_id: Uuid,
    /// What happened (`"creado"`, `"enviado_a_firma"`, `"firmado"`...).
    pub action: String,
    /// Status before the action.
    pub from_status: Option<PazYSalvoStatus>,
    /// Status after the action.
    pub to_status: PazYSalvoStatus,
    /// Free-text note.
    pub note: Option<String>,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// A supporting file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    /// Uploader.
    pub uploaded_by: Uuid,
    /// Original file name.
    pub file_name: String,
    /// Storage path.
    pub path: String,
    /// MIME type.
    pub mime_type: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Upload time.
    pub uploaded_at: DateTime<Utc>,
}

/// An approved policy exception.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExceptionRecord {
    /// Approving administrator.
    pub approved_by: Uuid,
    /// Why the exception was granted.
    pub motive: String,
    /// Approval time.
    pub approved_at: DateTime<Utc>,
}

/// State of an asset as of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotState {
    /// Still in the employee's custody.
    Pendiente,
    /// Returned.
    Devuelto,
    /// Lost.
    Perdido,
}

/// Point-in-time view of one of the employee's assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshotRecord {
    /// Asset identifier.
    pub asset_id: Uuid,
    /// Inventory code.
    pub asset_code: String,
    /// Asset name.
    pub asset_name: String,
    /// Custody outcome.
    pub state: SnapshotState,
    /// When it was handed over.
    pub assigned_at: DateTime<Utc>,
    /// When it came back, if it did.
    pub returned_at: Option<DateTime<Utc>>,
}
