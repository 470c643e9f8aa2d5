//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in Portal TI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// IT administrator: full control over assets, actas and users.
    Admin,
    /// Human resources: opens and follows clearance requests.
    Rrhh,
    /// Support technician: works tickets and sees inventory.
    Tecnico,
    /// Regular employee.
    Usuario,
}

impl UserRole {
    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// IT staff (admin or technician).
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Tecnico)
    }

    /// Roles allowed to open and manage clearance requests.
    pub fn can_manage_clearances(&self) -> bool {
        matches!(self, Self::Admin | Self::Rrhh)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Rrhh => "rrhh",
            Self::Tecnico => "tecnico",
            Self::Usuario => "usuario",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = portal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "rrhh" => Ok(Self::Rrhh),
            "tecnico" => Ok(Self::Tecnico),
            "usuario" => Ok(Self::Usuario),
            _ => Err(portal_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, rrhh, tecnico, usuario"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Tecnico.is_staff());
        assert!(!UserRole::Rrhh.is_staff());
        assert!(UserRole::Rrhh.can_manage_clearances());
        assert!(!UserRole::Usuario.can_manage_clearances());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("RRHH".parse::<UserRole>().unwrap(), UserRole::Rrhh);
        assert!("root".parse::<UserRole>().is_err());
    }
}
