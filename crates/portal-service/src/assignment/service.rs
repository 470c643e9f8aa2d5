//! Assignment service: hand over, return, and report lost assets.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::error::AppError;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::{AssignmentRepository, UserRepository};
use portal_entity::acta::Acta;
use portal_entity::asset::AssetStatus;
use portal_entity::assignment::{Assignment, AssignmentState, AssignmentView, CreateAssignment};
use portal_entity::notification::{CreateNotification, NotificationCategory};

use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Manages asset custody.
#[derive(Debug, Clone)]
pub struct AssignmentService {
    assignment_repo: Arc<AssignmentRepository>,
    user_repo: Arc<UserRepository>,
    notifications: Arc<NotificationService>,
    audit: Arc<AuditService>,
    rbac: Arc<RbacEnforcer>,
}

impl AssignmentService {
    /// Creates a new assignment service.
    pub fn new(
        assignment_repo: Arc<AssignmentRepository>,
        user_repo: Arc<UserRepository>,
        notifications: Arc<NotificationService>,
        audit: Arc<AuditService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            assignment_repo,
            user_repo,
            notifications,
            audit,
            rbac,
        }
    }

    /// Hands an available asset to an active employee and opens its acta.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        asset_id: Uuid,
        employee_id: Uuid,
        notes: Option<String>,
    ) -> Result<(Assignment, Acta), AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::AssignmentManage)?;

        let employee = self
            .user_repo
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;
        if !employee.is_active {
            return Err(AppError::validation("Employee is not active"));
        }

        let (assignment, acta) = self
            .assignment_repo
            .create_with_acta(&CreateAssignment {
                asset_id,
                employee_id,
                assigned_by: ctx.user_id,
                notes,
            })
            .await?;

        self.notifications
            .notify(CreateNotification::about(
                employee_id,
                NotificationCategory::Assignment,
                "Nuevo activo asignado",
                "Se te asignó un activo. Revisa y firma el acta de entrega.",
                "acta",
                acta.id,
            ))
            .await;

        self.audit
            .record(
                ctx,
                "assignment.create",
                "assignment",
                Some(assignment.id),
                Some(json!({ "asset_id": asset_id, "employee_id": employee_id, "acta_id": acta.id })),
            )
            .await;

        Ok((assignment, acta))
    }

    /// Lists assignments. Without `AssignmentViewAll` only the caller's own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        employee_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<PageResponse<AssignmentView>, AppError> {
        let employee_id = if self
            .rbac
            .has_permission(&ctx.role, Permission::AssignmentViewAll)
        {
            employee_id
        } else {
            Some(ctx.user_id)
        };
        self.assignment_repo.list(employee_id, &page).await
    }

    /// Records the asset as returned; it becomes available again.
    pub async fn return_asset(
        &self,
        ctx: &RequestContext,
        assignment_id: Uuid,
    ) -> Result<Assignment, AppError> {
        self.close(
            ctx,
            assignment_id,
            AssignmentState::Devuelta,
            AssetStatus::Disponible,
        )
        .await
    }

    /// Records the asset as lost while in custody.
    pub async fn mark_lost(
        &self,
        ctx: &RequestContext,
        assignment_id: Uuid,
    ) -> Result<Assignment, AppError> {
        self.close(
            ctx,
            assignment_id,
            AssignmentState::Perdida,
            AssetStatus::Perdido,
        )
        .await
    }

    async fn close(
        &self,
        ctx: &RequestContext,
        assignment_id: Uuid,
        state: AssignmentState,
        asset_status: AssetStatus,
    ) -> Result<Assignment, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::AssignmentManage)?;

        let assignment = self
            .assignment_repo
            .close(assignment_id, state, asset_status)
            .await?;

        let (action, message) = match state {
            AssignmentState::Perdida => (
                "assignment.lost",
                "Un activo a tu cargo fue reportado como perdido.",
            ),
            _ => (
                "assignment.return",
                "Se registró la devolución de un activo a tu cargo.",
            ),
        };

        info!(assignment_id = %assignment.id, state = state.as_str(), "Assignment closed");

        self.notifications
            .notify(CreateNotification::about(
                assignment.employee_id,
                NotificationCategory::Assignment,
                "Actualización de activo",
                message,
                "assignment",
                assignment.id,
            ))
            .await;

        self.audit
            .record(
                ctx,
                action,
                "assignment",
                Some(assignment.id),
                Some(json!({ "asset_id": assignment.asset_id })),
            )
            .await;

        Ok(assignment)
    }
}
