//! How an acta got its signature.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signing method recorded on an acta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "signing_method")]
pub enum SigningMethod {
    /// Signed in the portal by the employee.
    Digital,
    /// The employee uploaded a signed PDF.
    #[serde(rename = "PDF_Subido")]
    #[sqlx(rename = "PDF_Subido")]
    PdfSubido,
    /// An administrator uploaded the signed document on the employee's behalf.
    #[serde(rename = "Admin_Subida")]
    #[sqlx(rename = "Admin_Subida")]
    AdminSubida,
}

impl SigningMethod {
    /// Return the method as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Digital => "Digital",
            Self::PdfSubido => "PDF_Subido",
            Self::AdminSubida => "Admin_Subida",
        }
    }

    /// Whether this method comes with an uploaded file.
    pub fn has_file(&self) -> bool {
        !matches!(self, Self::Digital)
    }
}

impl fmt::Display for SigningMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
