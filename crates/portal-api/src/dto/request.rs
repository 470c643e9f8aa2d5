//! Request DTOs with validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use portal_database::repositories::{ActaFilter, PazYSalvoFilter};
use portal_entity::acta::ActaStatus;
use portal_entity::asset::{AssetFilter, AssetStatus, CreateAsset, UpdateAsset};
use portal_entity::audit::AuditFilter;
use portal_entity::paz_y_salvo::{PazYSalvoStatus, SignatureRole};
use portal_entity::ticket::{TicketFilter, TicketPriority, TicketStatus};
use portal_entity::user::{CreateUser, UpdateUser, UserRole};
use portal_service::paz_y_salvo::{CreateClearanceRequest, SignerAssignment, UpdateDraftRequest};
use portal_service::ticket::OpenTicketRequest;

// ── Users ────────────────────────────────────────────────────

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(length(min = 1, max = 200, message = "Full name is required"))]
    pub full_name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub department: Option<String>,
    pub role: UserRole,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            full_name: req.full_name,
            email: req.email,
            department: req.department,
            role: req.role,
        }
    }
}

/// Update user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    #[validate(length(max = 200))]
    pub department: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            role: req.role,
            is_active: req.is_active,
            department: req.department,
        }
    }
}

// ── Assets ───────────────────────────────────────────────────

/// Register asset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssetRequest {
    /// Inventory code, unique.
    #[validate(length(min = 1, max = 50, message = "Asset code is required"))]
    pub code: String,
    #[validate(length(min = 1, max = 200, message = "Asset name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl From<CreateAssetRequest> for CreateAsset {
    fn from(req: CreateAssetRequest) -> Self {
        Self {
            code: req.code.trim().to_string(),
            name: req.name,
            category: req.category,
            brand: req.brand,
            model: req.model,
            serial_number: req.serial_number,
            location: req.location,
            purchase_date: req.purchase_date,
            notes: req.notes,
        }
    }
}

/// Update asset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateAssetRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub status: Option<AssetStatus>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl From<UpdateAssetRequest> for UpdateAsset {
    fn from(req: UpdateAssetRequest) -> Self {
        Self {
            name: req.name,
            category: req.category,
            brand: req.brand,
            model: req.model,
            serial_number: req.serial_number,
            status: req.status,
            location: req.location,
            notes: req.notes,
        }
    }
}

/// Asset listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetQuery {
    pub status: Option<AssetStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl From<AssetQuery> for AssetFilter {
    fn from(q: AssetQuery) -> Self {
        Self {
            status: q.status,
            category: q.category,
            search: q.search.filter(|s| !s.trim().is_empty()),
        }
    }
}

// ── Assignments ──────────────────────────────────────────────

/// Assign asset request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssignmentRequest {
    pub asset_id: Uuid,
    pub employee_id: Uuid,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Assignment listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentQuery {
    pub employee_id: Option<Uuid>,
}

// ── Actas ────────────────────────────────────────────────────

/// Acta listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActaQuery {
    pub employee_id: Option<Uuid>,
    pub status: Option<ActaStatus>,
}

impl From<ActaQuery> for ActaFilter {
    fn from(q: ActaQuery) -> Self {
        Self {
            employee_id: q.employee_id,
            status: q.status,
        }
    }
}

/// Approve acta request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ApproveActaRequest {
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Reject acta request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectActaRequest {
    #[validate(length(min = 1, max = 2000, message = "Observations are required"))]
    pub observations: String,
}

/// Annul acta request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AnnulActaRequest {
    #[validate(length(max = 2000))]
    pub reason: Option<String>,
}

// ── Paz y Salvo ──────────────────────────────────────────────

/// Clearance listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PazYSalvoQuery {
    pub employee_id: Option<Uuid>,
    pub status: Option<PazYSalvoStatus>,
}

impl From<PazYSalvoQuery> for PazYSalvoFilter {
    fn from(q: PazYSalvoQuery) -> Self {
        Self {
            employee_id: q.employee_id,
            status: q.status,
        }
    }
}

/// Version the client last read, sent as `?expected_version=N`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionQuery {
    pub expected_version: Option<i32>,
}

/// Open clearance request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePazYSalvoRequest {
    pub employee_id: Uuid,
    #[validate(length(min = 1, max = 500, message = "Motive is required"))]
    pub motive: String,
    #[validate(length(max = 2000))]
    pub observations: Option<String>,
    #[serde(default)]
    pub signers: Vec<SignerAssignment>,
}

impl From<CreatePazYSalvoRequest> for CreateClearanceRequest {
    fn from(req: CreatePazYSalvoRequest) -> Self {
        Self {
            employee_id: req.employee_id,
            motive: req.motive,
            observations: req.observations,
            signers: req.signers,
        }
    }
}

/// Edit draft request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePazYSalvoRequest {
    #[validate(length(min = 1, max = 500))]
    pub motive: Option<String>,
    #[validate(length(max = 2000))]
    pub observations: Option<String>,
    #[serde(default)]
    pub signers: Vec<SignerAssignment>,
}

impl From<UpdatePazYSalvoRequest> for UpdateDraftRequest {
    fn from(req: UpdatePazYSalvoRequest) -> Self {
        Self {
            motive: req.motive,
            observations: req.observations,
            signers: req.signers,
        }
    }
}

/// Sign one step.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignPazYSalvoRequest {
    pub role: SignatureRole,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Reject at one step.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RejectPazYSalvoRequest {
    pub role: SignatureRole,
    #[validate(length(min = 1, max = 2000, message = "A comment is required"))]
    pub comment: String,
}

/// Approve an exception.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExceptionRequest {
    #[validate(length(min = 1, max = 2000, message = "Motive is required"))]
    pub motive: String,
}

// ── Tickets ──────────────────────────────────────────────────

/// Open ticket request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTicketRequest {
    #[validate(length(min = 1, max = 200, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000, message = "Description is required"))]
    pub description: String,
    pub asset_id: Option<Uuid>,
    pub priority: Option<TicketPriority>,
}

impl From<CreateTicketRequest> for OpenTicketRequest {
    fn from(req: CreateTicketRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            asset_id: req.asset_id,
            priority: req.priority.unwrap_or_default(),
        }
    }
}

/// Ticket listing query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketQuery {
    pub requester_id: Option<Uuid>,
    pub status: Option<TicketStatus>,
}

impl From<TicketQuery> for TicketFilter {
    fn from(q: TicketQuery) -> Self {
        Self {
            requester_id: q.requester_id,
            status: q.status,
        }
    }
}

/// Assign technician request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignTicketRequest {
    pub technician_id: Uuid,
}

/// Change ticket status request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketStatusRequest {
    pub status: TicketStatus,
}

/// Post chat message request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TicketMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message is required"))]
    pub body: String,
}

// ── Audit ────────────────────────────────────────────────────

/// Audit search query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditQuery {
    pub actor_id: Option<Uuid>,
    pub action: Option<String>,
    pub target_type: Option<String>,
    pub target_id: Option<Uuid>,
}

impl From<AuditQuery> for AuditFilter {
    fn from(q: AuditQuery) -> Self {
        Self {
            actor_id: q.actor_id,
            action: q.action,
            target_type: q.target_type,
            target_id: q.target_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_asset_validation() {
        let req: CreateAssetRequest = serde_json::from_value(serde_json::json!({
            "code": "",
            "name": "Notebook",
            "category": "Computo"
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_user_rejects_bad_email() {
        let req = CreateUserRequest {
            username: "jperez".into(),
            full_name: "Juan Perez".into(),
            email: Some("not-an-email".into()),
            department: None,
            role: UserRole::Usuario,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_ticket_priority_defaults() {
        let req: CreateTicketRequest = serde_json::from_value(serde_json::json!({
            "title": "Impresora",
            "description": "Atasco de papel"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        let open: OpenTicketRequest = req.into();
        assert_eq!(open.priority, TicketPriority::Media);
    }

    #[test]
    fn test_signature_role_wire_name() {
        let req: SignPazYSalvoRequest =
            serde_json::from_value(serde_json::json!({ "role": "TI" })).unwrap();
        assert_eq!(req.role, SignatureRole::Ti);
    }
}
