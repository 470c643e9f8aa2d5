//! Acta service: enforces who may move an acta and stores its files.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::config::StorageConfig;
use portal_core::error::AppError;
use portal_core::traits::FileStore;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::{ActaFilter, ActaRepository};
use portal_entity::acta::{Acta, ActaStatus, ActaView, SigningMethod};
use portal_entity::notification::{CreateNotification, NotificationCategory};
use portal_entity::user::UserRole;
use portal_storage::paths::{acta_file_path, mime_from_path};

use super::transitions::{self, SignedFile};
use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::notification::NotificationService;
use crate::upload::UploadedFile;

/// A stored acta file ready to be sent to the client.
#[derive(Debug, Clone)]
pub struct ActaDownload {
    /// Original file name.
    pub file_name: String,
    /// MIME type derived from the file name.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

/// Manages actas after they are opened by an assignment.
#[derive(Debug, Clone)]
pub struct ActaService {
    acta_repo: Arc<ActaRepository>,
    storage: Arc<dyn FileStore>,
    storage_config: StorageConfig,
    notifications: Arc<NotificationService>,
    audit: Arc<AuditService>,
    rbac: Arc<RbacEnforcer>,
}

impl ActaService {
    /// Creates a new acta service.
    pub fn new(
        acta_repo: Arc<ActaRepository>,
        storage: Arc<dyn FileStore>,
        storage_config: StorageConfig,
        notifications: Arc<NotificationService>,
        audit: Arc<AuditService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            acta_repo,
            storage,
            storage_config,
            notifications,
            audit,
            rbac,
        }
    }

    /// Lists actas. Without `ActaViewAll` only the caller's own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        mut filter: ActaFilter,
        page: PageRequest,
    ) -> Result<PageResponse<ActaView>, AppError> {
        if !self.rbac.has_permission(&ctx.role, Permission::ActaViewAll) {
            filter.employee_id = Some(ctx.user_id);
        }
        self.acta_repo.list(&filter, &page).await
    }

    /// Gets one acta.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Acta, AppError> {
        let (acta, view) = self.load(id).await?;
        self.require_viewer(ctx, &view)?;
        Ok(acta)
    }

    /// Statuses the acta may move to next.
    pub async fn transitions(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<ActaStatus>, AppError> {
        let (acta, view) = self.load(id).await?;
        self.require_viewer(ctx, &view)?;
        Ok(acta.status.allowed_transitions().to_vec())
    }

    /// The employee signs in the portal.
    pub async fn sign(&self, ctx: &RequestContext, id: Uuid) -> Result<Acta, AppError> {
        let (mut acta, view) = self.load(id).await?;
        require_owner(ctx, &view)?;

        let before = acta.status;
        transitions::mark_signed(&mut acta, SigningMethod::Digital, None, ctx.request_time)?;
        let acta = self.acta_repo.save(&acta).await?;

        self.after_change(ctx, &acta, &view, before, "acta.sign").await;
        self.notify_admins(ctx, &acta, "Acta firmada", "Un empleado firmó su acta de entrega.")
            .await;
        Ok(acta)
    }

    /// The employee uploads the signed document.
    pub async fn upload_signed(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        file: UploadedFile,
    ) -> Result<Acta, AppError> {
        let (acta, view) = self.load(id).await?;
        require_owner(ctx, &view)?;

        let acta = self
            .store_signed(ctx, acta, &view, file, SigningMethod::PdfSubido)
            .await?;
        self.notify_admins(
            ctx,
            &acta,
            "Acta cargada",
            "Un empleado cargó su acta firmada para revisión.",
        )
        .await;
        Ok(acta)
    }

    /// An administrator uploads the signed document for the employee.
    pub async fn admin_upload(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        file: UploadedFile,
    ) -> Result<Acta, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::ActaReview)?;
        let (acta, view) = self.load(id).await?;

        let acta = self
            .store_signed(ctx, acta, &view, file, SigningMethod::AdminSubida)
            .await?;
        self.notify_employee(
            &view,
            "Acta cargada",
            "TI cargó tu acta de entrega firmada.",
        )
        .await;
        Ok(acta)
    }

    /// Approves a signed acta.
    pub async fn approve(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        comment: Option<String>,
    ) -> Result<Acta, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::ActaReview)?;
        let (mut acta, view) = self.load(id).await?;

        let before = acta.status;
        transitions::approve(&mut acta, ctx.user_id, comment, ctx.request_time)?;
        let acta = self.acta_repo.save(&acta).await?;

        self.after_change(ctx, &acta, &view, before, "acta.approve").await;
        self.notify_employee(&view, "Acta aprobada", "Tu acta de entrega fue aprobada.")
            .await;
        Ok(acta)
    }

    /// Rejects an acta with observations.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        observations: String,
    ) -> Result<Acta, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::ActaReview)?;
        let (mut acta, view) = self.load(id).await?;

        let before = acta.status;
        transitions::reject(&mut acta, observations)?;
        let acta = self.acta_repo.save(&acta).await?;

        self.after_change(ctx, &acta, &view, before, "acta.reject").await;
        self.notify_employee(
            &view,
            "Acta rechazada",
            "Tu acta de entrega fue rechazada. Revisa las observaciones.",
        )
        .await;
        Ok(acta)
    }

    /// Sends a rejected acta back to `Pendiente` and drops its file.
    pub async fn reopen(&self, ctx: &RequestContext, id: Uuid) -> Result<Acta, AppError> {
        let (mut acta, view) = self.load(id).await?;
        let reviewer = self.rbac.has_permission(&ctx.role, Permission::ActaReview);
        if !reviewer {
            require_owner(ctx, &view)?;
        }

        let before = acta.status;
        let old_file = transitions::reopen(&mut acta)?;
        let acta = self.acta_repo.save(&acta).await?;

        if let Some(path) = old_file {
            self.remove_file(&path).await;
        }

        self.after_change(ctx, &acta, &view, before, "acta.reopen").await;
        if reviewer {
            self.notify_employee(
                &view,
                "Acta reabierta",
                "Tu acta de entrega está pendiente de firma nuevamente.",
            )
            .await;
        } else {
            self.notify_admins(ctx, &acta, "Acta reabierta", "Un empleado reabrió su acta.")
                .await;
        }
        Ok(acta)
    }

    /// Voids an acta.
    pub async fn annul(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        reason: Option<String>,
    ) -> Result<Acta, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::ActaReview)?;
        let (mut acta, view) = self.load(id).await?;

        let before = acta.status;
        transitions::annul(&mut acta, reason)?;
        let acta = self.acta_repo.save(&acta).await?;

        self.after_change(ctx, &acta, &view, before, "acta.annul").await;
        self.notify_employee(&view, "Acta anulada", "Tu acta de entrega fue anulada.")
            .await;
        Ok(acta)
    }

    /// Deletes the acta and its stored file.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac.require_permission(&ctx.role, Permission::ActaReview)?;
        let (acta, view) = self.load(id).await?;

        if !self.acta_repo.delete(id).await? {
            return Err(AppError::not_found("Acta not found"));
        }
        if let Some(path) = acta.file_path.as_deref() {
            self.remove_file(path).await;
        }

        info!(acta_id = %id, status = %acta.status, "Acta deleted");
        self.audit
            .record(
                ctx,
                "acta.delete",
                "acta",
                Some(id),
                Some(json!({ "assignment_id": acta.assignment_id, "asset_code": view.asset_code })),
            )
            .await;
        Ok(())
    }

    /// Reads the stored signed file.
    pub async fn download(&self, ctx: &RequestContext, id: Uuid) -> Result<ActaDownload, AppError> {
        let (acta, view) = self.load(id).await?;
        self.require_viewer(ctx, &view)?;

        let path = acta
            .file_path
            .as_deref()
            .ok_or_else(|| AppError::not_found("Acta has no uploaded file"))?;
        let data = self.storage.read_bytes(path).await?;
        let file_name = acta.file_name.clone().unwrap_or_else(|| format!("acta-{id}.pdf"));
        let content_type = mime_from_path(&file_name)
            .unwrap_or("application/octet-stream")
            .to_string();

        Ok(ActaDownload {
            file_name,
            content_type,
            data,
        })
    }

    async fn load(&self, id: Uuid) -> Result<(Acta, ActaView), AppError> {
        let acta = self
            .acta_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Acta not found"))?;
        let view = self
            .acta_repo
            .find_view_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Acta not found"))?;
        Ok((acta, view))
    }

    fn require_viewer(&self, ctx: &RequestContext, view: &ActaView) -> Result<(), AppError> {
        if view.employee_id == ctx.user_id
            || self.rbac.has_permission(&ctx.role, Permission::ActaViewAll)
        {
            Ok(())
        } else {
            Err(AppError::authorization("You cannot view this acta"))
        }
    }

    async fn store_signed(
        &self,
        ctx: &RequestContext,
        mut acta: Acta,
        view: &ActaView,
        file: UploadedFile,
        method: SigningMethod,
    ) -> Result<Acta, AppError> {
        file.validate(&self.storage_config)?;
        transitions::check_can_sign(&acta)?;

        let path = acta_file_path(acta.id, &file.file_name);
        let size = file.size();
        self.storage.write(&path, file.data).await?;

        let before = acta.status;
        let signed = SignedFile {
            file_name: file.file_name,
            path: path.clone(),
        };
        transitions::mark_signed(&mut acta, method, Some(signed), ctx.request_time)?;

        let acta = match self.acta_repo.save(&acta).await {
            Ok(acta) => acta,
            Err(e) => {
                self.remove_file(&path).await;
                return Err(e);
            }
        };

        info!(acta_id = %acta.id, method = %method, size, "Acta file stored");
        self.after_change(ctx, &acta, view, before, "acta.upload").await;
        Ok(acta)
    }

    async fn remove_file(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            warn!(path, error = %e, "Failed to remove acta file");
        }
    }

    async fn after_change(
        &self,
        ctx: &RequestContext,
        acta: &Acta,
        view: &ActaView,
        before: ActaStatus,
        action: &str,
    ) {
        info!(
            acta_id = %acta.id,
            from = %before,
            to = %acta.status,
            actor = %ctx.user_id,
            "Acta status changed"
        );
        self.audit
            .record(
                ctx,
                action,
                "acta",
                Some(acta.id),
                Some(json!({
                    "from": before,
                    "to": acta.status,
                    "asset_code": view.asset_code,
                })),
            )
            .await;
    }

    async fn notify_employee(&self, view: &ActaView, title: &str, message: &str) {
        self.notifications
            .notify(CreateNotification::about(
                view.employee_id,
                NotificationCategory::Acta,
                title,
                message,
                "acta",
                view.id,
            ))
            .await;
    }

    async fn notify_admins(&self, ctx: &RequestContext, acta: &Acta, title: &str, message: &str) {
        self.notifications
            .notify_roles(
                ctx,
                &[UserRole::Admin],
                NotificationCategory::Acta,
                title,
                message,
                "acta",
                acta.id,
            )
            .await;
    }
}

fn require_owner(ctx: &RequestContext, view: &ActaView) -> Result<(), AppError> {
    if view.employee_id == ctx.user_id {
        Ok(())
    } else {
        Err(AppError::authorization(
            "Only the assigned employee can sign this acta",
        ))
    }
}
