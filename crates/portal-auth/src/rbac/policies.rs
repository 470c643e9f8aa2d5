//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use portal_entity::user::UserRole;

/// A system-level permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    // Inventory
    /// Browse assets.
    AssetRead,
    /// Create, edit and delete assets.
    AssetManage,
    /// Assign, return and mark assets lost.
    AssignmentManage,
    /// See assignments of other employees.
    AssignmentViewAll,

    // Actas
    /// See actas of other employees.
    ActaViewAll,
    /// Approve, reject, annul, upload on behalf of and delete actas.
    ActaReview,

    // Clearances
    /// Open and drive clearance requests.
    ClearanceManage,
    /// Approve policy exceptions on a clearance.
    ClearanceException,

    // Tickets
    /// See every ticket.
    TicketViewAll,
    /// Change ticket status and answer in the chat.
    TicketWork,
    /// Assign tickets to technicians.
    TicketAssign,

    // Administration
    /// List users.
    UserRead,
    /// Create users and change roles.
    UserManage,
    /// Search the audit log.
    AuditRead,
    /// View dashboard counters.
    DashboardView,
}

/// Static role-to-permission policy set.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    grants: HashMap<UserRole, HashSet<Permission>>,
}

impl RbacPolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        use Permission::*;

        let mut grants = HashMap::new();

        grants.insert(
            UserRole::Admin,
            [
                AssetRead,
                AssetManage,
                AssignmentManage,
                AssignmentViewAll,
                ActaViewAll,
                ActaReview,
                ClearanceManage,
                ClearanceException,
                TicketViewAll,
                TicketWork,
                TicketAssign,
                UserRead,
                UserManage,
                AuditRead,
                DashboardView,
            ]
            .into_iter()
            .collect(),
        );

        grants.insert(
            UserRole::Rrhh,
            [
                AssetRead,
                AssignmentViewAll,
                ClearanceManage,
                UserRead,
                DashboardView,
            ]
            .into_iter()
            .collect(),
        );

        grants.insert(
            UserRole::Tecnico,
            [
                AssetRead,
                AssignmentViewAll,
                ActaViewAll,
                TicketViewAll,
                TicketWork,
                UserRead,
                DashboardView,
            ]
            .into_iter()
            .collect(),
        );

        grants.insert(UserRole::Usuario, [AssetRead].into_iter().collect());

        Self { grants }
    }

    /// Whether `role` holds `permission`.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        self.grants
            .get(role)
            .is_some_and(|set| set.contains(permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
