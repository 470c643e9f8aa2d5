//! RBAC enforcement: checks whether a role holds a required permission.

use tracing::debug;

use portal_core::error::AppError;
use portal_entity::user::UserRole;

use super::policies::{Permission, RbacPolicies};

/// Enforces role-based access control.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Returns `Ok(())` if allowed, or an authorization error if denied.
    pub fn require_permission(
        &self,
        role: &UserRole,
        permission: Permission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(role, &permission) {
            Ok(())
        } else {
            debug!(role = role.as_str(), ?permission, "Permission denied");
            Err(AppError::authorization(format!(
                "Role '{role}' does not have permission '{permission:?}'"
            )))
        }
    }

    /// Checks whether the role has the permission (returns bool).
    pub fn has_permission(&self, role: &UserRole, permission: Permission) -> bool {
        self.policies.has_permission(role, &permission)
    }
}
