//! Audit trail recording and search.

use std::sync::Arc;

use tracing::error;
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::error::AppError;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::AuditLogRepository;
use portal_entity::audit::{AuditFilter, AuditLogEntry, CreateAuditLogEntry};

use crate::context::RequestContext;

/// Writes and searches the append-only audit log.
#[derive(Debug, Clone)]
pub struct AuditService {
    audit_repo: Arc<AuditLogRepository>,
    rbac: Arc<RbacEnforcer>,
}

impl AuditService {
    /// Creates a new audit service.
    pub fn new(audit_repo: Arc<AuditLogRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { audit_repo, rbac }
    }

    /// Records an action by the current user.
    ///
    /// A failed write is logged; the originating request still succeeds.
    pub async fn record(
        &self,
        ctx: &RequestContext,
        action: &str,
        target_type: &str,
        target_id: Option<Uuid>,
        details: Option<serde_json::Value>,
    ) {
        let entry = CreateAuditLogEntry {
            actor_id: ctx.user_id,
            action: action.to_string(),
            target_type: target_type.to_string(),
            target_id,
            details,
            ip_address: ctx.ip_address.clone(),
        };

        if let Err(e) = self.audit_repo.create(&entry).await {
            error!(action, target_type, ?target_id, error = %e, "Failed to write audit entry");
        }
    }

    /// Searches the audit log. Admin only.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        filter: AuditFilter,
        page: PageRequest,
    ) -> Result<PageResponse<AuditLogEntry>, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::AuditRead)?;
        self.audit_repo.search(&filter, &page).await
    }
}
