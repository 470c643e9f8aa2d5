//! Asset inventory service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::error::AppError;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::AssetRepository;
use portal_entity::asset::{Asset, AssetFilter, AssetStatus, CreateAsset, UpdateAsset};

use crate::audit::AuditService;
use crate::context::RequestContext;

/// Manages the hardware inventory.
#[derive(Debug, Clone)]
pub struct AssetService {
    asset_repo: Arc<AssetRepository>,
    audit: Arc<AuditService>,
    rbac: Arc<RbacEnforcer>,
}

impl AssetService {
    /// Creates a new asset service.
    pub fn new(
        asset_repo: Arc<AssetRepository>,
        audit: Arc<AuditService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            asset_repo,
            audit,
            rbac,
        }
    }

    /// Gets one asset.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Asset, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::AssetRead)?;
        self.find(id).await
    }

    /// Lists assets matching the filter.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: AssetFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Asset>, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::AssetRead)?;
        self.asset_repo.search(&filter, &page).await
    }

    /// Registers a new asset. The code must be unique.
    pub async fn create(&self, ctx: &RequestContext, data: CreateAsset) -> Result<Asset, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::AssetManage)?;

        let asset = self.asset_repo.create(&data).await?;
        info!(asset_id = %asset.id, code = %asset.code, "Asset created");
        self.audit
            .record(
                ctx,
                "asset.create",
                "asset",
                Some(asset.id),
                Some(json!({ "code": asset.code })),
            )
            .await;
        Ok(asset)
    }

    /// Updates an asset.
    ///
    /// The `Asignado` status is owned by assignments and cannot be set or
    /// cleared here.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        data: UpdateAsset,
    ) -> Result<Asset, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::AssetManage)?;

        if let Some(status) = data.status {
            let current = self.find(id).await?;
            check_manual_status_change(current.status, status)?;
        }

        let asset = self
            .asset_repo
            .update(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("Asset not found"))?;

        info!(asset_id = %asset.id, status = %asset.status, "Asset updated");
        self.audit
            .record(ctx, "asset.update", "asset", Some(asset.id), None)
            .await;
        Ok(asset)
    }

    /// Deletes an asset that is not currently assigned.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        self.rbac.require_permission(&ctx.role, Permission::AssetManage)?;

        let asset = self.find(id).await?;
        if asset.status == AssetStatus::Asignado {
            return Err(AppError::validation("Cannot delete an assigned asset"));
        }

        if !self.asset_repo.delete(id).await? {
            return Err(AppError::not_found("Asset not found"));
        }

        info!(asset_id = %id, code = %asset.code, "Asset deleted");
        self.audit
            .record(
                ctx,
                "asset.delete",
                "asset",
                Some(id),
                Some(json!({ "code": asset.code })),
            )
            .await;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Asset, AppError> {
        self.asset_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Asset not found"))
    }
}

fn check_manual_status_change(current: AssetStatus, next: AssetStatus) -> Result<(), AppError> {
    if current == next {
        return Ok(());
    }
    if current == AssetStatus::Asignado || next == AssetStatus::Asignado {
        return Err(AppError::validation(
            "Asset assignment status is managed through assignments",
        ));
    }
    Ok(())
}
