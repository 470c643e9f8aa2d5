//! Clearance status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a clearance request. Distinct from the acta status set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "clearance_status")]
pub enum PazYSalvoStatus {
    /// Draft, still editable.
    #[serde(alias = "Draft")]
    Borrador,
    /// Out for signatures.
    EnFirma,
    /// Every mandatory signature collected.
    Aprobado,
    /// A signer rejected it. Terminal.
    Rechazado,
    /// Archived after approval. Terminal.
    Cerrado,
}

impl PazYSalvoStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [PazYSalvoStatus; 5] = [
        Self::Borrador,
        Self::EnFirma,
        Self::Aprobado,
        Self::Rechazado,
        Self::Cerrado,
    ];

    /// Return the status as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Borrador => "Borrador",
            Self::EnFirma => "EnFirma",
            Self::Aprobado => "Aprobado",
            Self::Rechazado => "Rechazado",
            Self::Cerrado => "Cerrado",
        }
    }
}

impl fmt::Display for PazYSalvoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
