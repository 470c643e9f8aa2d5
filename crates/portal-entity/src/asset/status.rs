//! Asset status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inventory status of a hardware asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "asset_status")]
pub enum AssetStatus {
    /// In stock, can be assigned.
    Disponible,
    /// Currently in an employee's custody.
    Asignado,
    /// Out for repair.
    EnMantenimiento,
    /// Retired from inventory.
    DeBaja,
    /// Reported lost.
    Perdido,
}

impl AssetStatus {
    /// Every status, in display order.
    pub const ALL: [AssetStatus; 5] = [
        Self::Disponible,
        Self::Asignado,
        Self::EnMantenimiento,
        Self::DeBaja,
        Self::Perdido,
    ];

    /// Whether the asset can be handed to an employee.
    pub fn is_assignable(&self) -> bool {
        matches!(self, Self::Disponible)
    }

    /// Return the status as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disponible => "Disponible",
            Self::Asignado => "Asignado",
            Self::EnMantenimiento => "EnMantenimiento",
            Self::DeBaja => "DeBaja",
            Self::Perdido => "Perdido",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
