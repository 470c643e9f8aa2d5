//! User profile and administration service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::error::AppError;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::UserRepository;
use portal_entity::user::{CreateUser, UpdateUser, User, UserRole};

use crate::audit::AuditService;
use crate::context::RequestContext;

/// Manages user records.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    audit: Arc<AuditService>,
    rbac: Arc<RbacEnforcer>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        audit: Arc<AuditService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            user_repo,
            audit,
            rbac,
        }
    }

    /// Profile of the current user.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User profile not found"))
    }

    /// Lists all users.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::UserRead)?;
        self.user_repo.find_all(&page).await
    }

    /// Creates a user.
    pub async fn create(&self, ctx: &RequestContext, data: CreateUser) -> Result<User, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::UserManage)?;

        let user = self.user_repo.create(&data).await?;
        info!(user_id = %user.id, username = %user.username, role = %user.role, "User created");
        self.audit
            .record(
                ctx,
                "user.create",
                "user",
                Some(user.id),
                Some(json!({ "username": user.username, "role": user.role })),
            )
            .await;
        Ok(user)
    }

    /// Changes role, active flag or department of a user.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        data: UpdateUser,
    ) -> Result<User, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::UserManage)?;
        check_self_update(ctx, user_id, &data)?;

        let user = self
            .user_repo
            .update(user_id, &data)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user.id, role = %user.role, is_active = user.is_active, "User updated");
        self.audit
            .record(
                ctx,
                "user.update",
                "user",
                Some(user.id),
                Some(json!({ "role": data.role, "is_active": data.is_active })),
            )
            .await;
        Ok(user)
    }
}

/// An administrator may not demote or deactivate themselves.
fn check_self_update(ctx: &RequestContext, user_id: Uuid, data: &UpdateUser) -> Result<(), AppError> {
    if ctx.user_id != user_id {
        return Ok(());
    }
    if data.is_active == Some(false) {
        return Err(AppError::validation("You cannot deactivate your own account"));
    }
    if data.role.is_some_and(|r| r != UserRole::Admin) {
        return Err(AppError::validation("You cannot remove your own admin role"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> RequestContext {
        RequestContext::new(Uuid::new_v4(), UserRole::Admin, "admin".into(), None)
    }

    #[test]
    fn test_self_update_guard() {
        let ctx = admin();
        let deactivate = UpdateUser {
            role: None,
            is_active: Some(false),
            department: None,
        };
        assert!(check_self_update(&ctx, ctx.user_id, &deactivate).is_err());
        assert!(check_self_update(&ctx, Uuid::new_v4(), &deactivate).is_ok());

        let demote = UpdateUser {
            role: Some(UserRole::Usuario),
            is_active: None,
            department: None,
        };
        assert!(check_self_update(&ctx, ctx.user_id, &demote).is_err());

        let department = UpdateUser {
            role: Some(UserRole::Admin),
            is_active: Some(true),
            department: Some("TI".into()),
        };
        assert!(check_self_update(&ctx, ctx.user_id, &department).is_ok());
    }
}
