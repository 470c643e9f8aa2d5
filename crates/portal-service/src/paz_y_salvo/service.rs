//! Clearance service: permissions, persistence and side effects around
//! the pure workflow.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::config::StorageConfig;
use portal_core::error::AppError;
use portal_core::traits::FileStore;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::{
    AssignmentRepository, PazYSalvoFilter, PazYSalvoRepository, UserRepository,
};
use portal_entity::notification::{CreateNotification, NotificationCategory};
use portal_entity::paz_y_salvo::embedded::encode_list;
use portal_entity::paz_y_salvo::{
    AttachmentRecord, CreatePazYSalvo, HistoryRecord, PazYSalvo, PazYSalvoDetail,
    PazYSalvoStatus, SignatureRole,
};
use portal_storage::paths::clearance_attachment_path;

use super::workflow::{self, Actor, SignerAssignment};
use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::notification::NotificationService;
use crate::upload::UploadedFile;

/// Input for opening a clearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateClearanceRequest {
    /// Departing employee.
    pub employee_id: Uuid,
    /// Why the employee leaves.
    pub motive: String,
    /// Free-form observations.
    pub observations: Option<String>,
    /// Signature chain; empty for the default one.
    #[serde(default)]
    pub signers: Vec<SignerAssignment>,
}

/// Input for editing a draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDraftRequest {
    /// New motive.
    pub motive: Option<String>,
    /// New observations.
    pub observations: Option<String>,
    /// Signer assignments by role.
    #[serde(default)]
    pub signers: Vec<SignerAssignment>,
}

/// Manages clearance requests.
#[derive(Debug, Clone)]
pub struct PazYSalvoService {
    clearance_repo: Arc<PazYSalvoRepository>,
    assignment_repo: Arc<AssignmentRepository>,
    user_repo: Arc<UserRepository>,
    storage: Arc<dyn FileStore>,
    storage_config: StorageConfig,
    notifications: Arc<NotificationService>,
    audit: Arc<AuditService>,
    rbac: Arc<RbacEnforcer>,
}

impl PazYSalvoService {
    /// Creates a new clearance service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        clearance_repo: Arc<PazYSalvoRepository>,
        assignment_repo: Arc<AssignmentRepository>,
        user_repo: Arc<UserRepository>,
        storage: Arc<dyn FileStore>,
        storage_config: StorageConfig,
        notifications: Arc<NotificationService>,
        audit: Arc<AuditService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            clearance_repo,
            assignment_repo,
            user_repo,
            storage,
            storage_config,
            notifications,
            audit,
            rbac,
        }
    }

    /// Opens a clearance in `Borrador` with its signature chain and a
    /// snapshot of the employee's assets.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateClearanceRequest,
    ) -> Result<PazYSalvoDetail, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::ClearanceManage)?;

        if req.motive.trim().is_empty() {
            return Err(AppError::validation("Motive is required"));
        }
        self.user_repo
            .find_by_id(req.employee_id)
            .await?
            .ok_or_else(|| AppError::not_found("Employee not found"))?;

        let chain = workflow::build_chain(&req.signers)?;
        let assignments = self
            .assignment_repo
            .find_all_for_employee(req.employee_id)
            .await?;
        let snapshot = workflow::build_snapshot(&assignments);
        let history = [HistoryRecord {
            actor_id: ctx.user_id,
            action: "creado".to_string(),
            from_status: None,
            to_status: PazYSalvoStatus::Borrador,
            note: None,
            at: ctx.request_time,
        }];

        let doc = self
            .clearance_repo
            .create(&CreatePazYSalvo {
                id: Uuid::new_v4(),
                employee_id: req.employee_id,
                requested_by: ctx.user_id,
                motive: req.motive,
                observations: req.observations,
                signatures_json: encode_list(&chain)?,
                history_json: encode_list(&history)?,
                asset_snapshot_json: encode_list(&snapshot)?,
            })
            .await?;

        info!(
            clearance_id = %doc.id,
            employee_id = %doc.employee_id,
            signatures = chain.len(),
            assets = snapshot.len(),
            "Paz y salvo created"
        );

        self.notify_user(
            doc.employee_id,
            &doc,
            "Paz y salvo iniciado",
            "Se inició tu proceso de paz y salvo.",
        )
        .await;
        self.audit
            .record(
                ctx,
                "paz_y_salvo.create",
                "paz_y_salvo",
                Some(doc.id),
                Some(json!({ "employee_id": doc.employee_id })),
            )
            .await;

        Ok(doc.to_detail())
    }

    /// Lists clearances. Without `ClearanceManage` only the caller's own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        mut filter: PazYSalvoFilter,
        page: PageRequest,
    ) -> Result<PageResponse<PazYSalvoDetail>, AppError> {
        if !self
            .rbac
            .has_permission(&ctx.role, Permission::ClearanceManage)
        {
            filter.employee_id = Some(ctx.user_id);
        }
        let docs = self.clearance_repo.list(&filter, &page).await?;
        Ok(docs.map(|doc| doc.to_detail()))
    }

    /// Gets one clearance with its decoded collections.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<PazYSalvoDetail, AppError> {
        let doc = self.find(id).await?;
        self.require_viewer(ctx, &doc)?;
        Ok(doc.to_detail())
    }

    /// Edits a draft.
    pub async fn update_draft(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateDraftRequest,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::ClearanceManage)?;
        let mut doc = self.load(id, expected_version).await?;

        workflow::update_draft(
            &mut doc,
            actor(ctx),
            req.motive,
            req.observations,
            &req.signers,
            ctx.request_time,
        )?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.update").await?;
        Ok(doc.to_detail())
    }

    /// Re-reads the employee's assets into the snapshot.
    pub async fn refresh_snapshot(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::ClearanceManage)?;
        let mut doc = self.load(id, expected_version).await?;

        let assignments = self
            .assignment_repo
            .find_all_for_employee(doc.employee_id)
            .await?;
        workflow::refresh_snapshot(&mut doc, actor(ctx), &assignments, ctx.request_time)?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.snapshot").await?;
        Ok(doc.to_detail())
    }

    /// Sends a draft out for signatures and notifies the first signer.
    pub async fn send_to_sign(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::ClearanceManage)?;
        let mut doc = self.load(id, expected_version).await?;

        let first = workflow::send_to_sign(&mut doc, actor(ctx), ctx.request_time)?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.send").await?;

        if let Some(signer) = first {
            self.notify_user(
                signer,
                &doc,
                "Firma pendiente",
                "Tienes un paz y salvo pendiente de firma.",
            )
            .await;
        }
        Ok(doc.to_detail())
    }

    /// Signs one step of the chain.
    pub async fn sign(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        role: SignatureRole,
        comment: Option<String>,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        let mut doc = self.load(id, expected_version).await?;

        let outcome = workflow::sign(&mut doc, actor(ctx), role, comment, ctx.request_time)?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.sign").await?;

        if outcome.approved {
            self.notify_user(
                doc.requested_by,
                &doc,
                "Paz y salvo aprobado",
                "Todas las firmas obligatorias fueron registradas.",
            )
            .await;
        } else if let Some(next) = outcome.next_signer {
            self.notify_user(
                next,
                &doc,
                "Firma pendiente",
                "Tienes un paz y salvo pendiente de firma.",
            )
            .await;
        }
        Ok(doc.to_detail())
    }

    /// Rejects the request at one step of the chain.
    pub async fn reject(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        role: SignatureRole,
        comment: String,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        let mut doc = self.load(id, expected_version).await?;

        workflow::reject(&mut doc, actor(ctx), role, comment, ctx.request_time)?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.reject").await?;

        self.notify_user(
            doc.requested_by,
            &doc,
            "Paz y salvo rechazado",
            "Un firmante rechazó el paz y salvo.",
        )
        .await;
        Ok(doc.to_detail())
    }

    /// Stores a supporting file on the request.
    pub async fn attach(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        file: UploadedFile,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        let mut doc = self.load(id, expected_version).await?;
        self.require_viewer(ctx, &doc)?;
        let mime_type = file.validate(&self.storage_config)?;
        workflow::check_can_attach(&doc)?;

        let path = clearance_attachment_path(doc.id, Uuid::new_v4(), &file.file_name);
        let size_bytes = file.size();
        self.storage.write(&path, file.data).await?;

        let attachment = AttachmentRecord {
            uploaded_by: ctx.user_id,
            file_name: file.file_name,
            path: path.clone(),
            mime_type,
            size_bytes,
            uploaded_at: ctx.request_time,
        };
        let saved = match workflow::attach(&mut doc, actor(ctx), attachment, ctx.request_time) {
            Ok(()) => self.persist(ctx, &doc, "paz_y_salvo.attach").await,
            Err(e) => Err(e),
        };

        match saved {
            Ok(doc) => Ok(doc.to_detail()),
            Err(e) => {
                if let Err(del) = self.storage.delete(&path).await {
                    warn!(path = %path, error = %del, "Failed to remove orphaned attachment");
                }
                Err(e)
            }
        }
    }

    /// Records an approved exception. Admin only.
    pub async fn add_exception(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        motive: String,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::ClearanceException)?;
        let mut doc = self.load(id, expected_version).await?;

        workflow::add_exception(&mut doc, actor(ctx), motive, ctx.request_time)?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.exception").await?;
        Ok(doc.to_detail())
    }

    /// Closes an approved request.
    pub async fn close(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        expected_version: Option<i32>,
    ) -> Result<PazYSalvoDetail, AppError> {
        self.rbac
            .require_permission(&ctx.role, Permission::ClearanceManage)?;
        let mut doc = self.load(id, expected_version).await?;

        workflow::close(&mut doc, actor(ctx), ctx.request_time)?;
        let doc = self.persist(ctx, &doc, "paz_y_salvo.close").await?;

        self.notify_user(
            doc.employee_id,
            &doc,
            "Paz y salvo cerrado",
            "Tu paz y salvo fue cerrado.",
        )
        .await;
        Ok(doc.to_detail())
    }

    async fn find(&self, id: Uuid) -> Result<PazYSalvo, AppError> {
        self.clearance_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Paz y salvo not found"))
    }

    async fn load(&self, id: Uuid, expected_version: Option<i32>) -> Result<PazYSalvo, AppError> {
        let doc = self.find(id).await?;
        workflow::check_version(&doc, expected_version)?;
        Ok(doc)
    }

    /// Compare-and-swap against the version the document was loaded at.
    async fn persist(
        &self,
        ctx: &RequestContext,
        doc: &PazYSalvo,
        action: &str,
    ) -> Result<PazYSalvo, AppError> {
        let saved = self
            .clearance_repo
            .update(doc, doc.row_version)
            .await?
            .into_result("Paz y salvo")?;

        info!(
            clearance_id = %saved.id,
            status = %saved.status,
            row_version = saved.row_version,
            action,
            "Paz y salvo saved"
        );
        self.audit
            .record(
                ctx,
                action,
                "paz_y_salvo",
                Some(saved.id),
                Some(json!({ "status": saved.status, "row_version": saved.row_version })),
            )
            .await;
        Ok(saved)
    }

    fn require_viewer(&self, ctx: &RequestContext, doc: &PazYSalvo) -> Result<(), AppError> {
        let allowed = doc.employee_id == ctx.user_id
            || doc.requested_by == ctx.user_id
            || self
                .rbac
                .has_permission(&ctx.role, Permission::ClearanceManage)
            || doc
                .signatures()
                .iter()
                .any(|s| s.signer_id == Some(ctx.user_id));
        if allowed {
            Ok(())
        } else {
            Err(AppError::authorization("You cannot view this paz y salvo"))
        }
    }

    async fn notify_user(&self, user_id: Uuid, doc: &PazYSalvo, title: &str, message: &str) {
        self.notifications
            .notify(CreateNotification::about(
                user_id,
                NotificationCategory::PazYSalvo,
                title,
                message,
                "paz_y_salvo",
                doc.id,
            ))
            .await;
    }
}

fn actor(ctx: &RequestContext) -> Actor {
    Actor {
        id: ctx.user_id,
        is_admin: ctx.is_admin(),
    }
}
