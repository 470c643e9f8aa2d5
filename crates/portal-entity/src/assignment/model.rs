//! Assignment entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Custody state of an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_state")]
pub enum AssignmentState {
    /// The employee holds the asset.
    Activa,
    /// The asset came back.
    Devuelta,
    /// The asset was lost while in custody.
    Perdida,
}

impl AssignmentState {
    /// Return the state as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activa => "Activa",
            Self::Devuelta => "Devuelta",
            Self::Perdida => "Perdida",
        }
    }
}

/// Links one asset to one employee for a period of custody.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: Uuid,
    /// The asset handed over.
    pub asset_id: Uuid,
    /// The employee receiving the asset.
    pub employee_id: Uuid,
    /// The administrator who made the assignment.
    pub assigned_by: Uuid,
    /// Custody state.
    pub state: AssignmentState,
    /// Notes recorded at handover.
    pub notes: Option<String>,
    /// When the asset was handed over.
    pub assigned_at: DateTime<Utc>,
    /// When the asset was returned or reported lost.
    pub returned_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Whether the employee still holds the asset.
    pub fn is_active(&self) -> bool {
        self.state == AssignmentState::Activa
    }
}

/// Assignment joined with the asset columns needed by listings and snapshots.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AssignmentView {
    /// Assignment identifier.
    pub id: Uuid,
    /// Asset identifier.
    pub asset_id: Uuid,
    /// Asset inventory code.
    pub asset_code: String,
    /// Asset name.
    pub asset_name: String,
    /// Employee identifier.
    pub employee_id: Uuid,
    /// Custody state.
    pub state: AssignmentState,
    /// When the asset was handed over.
    pub assigned_at: DateTime<Utc>,
    /// When the asset was returned or reported lost.
    pub returned_at: Option<DateTime<Utc>>,
}

/// Data required to create an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAssignment {
    /// The asset to hand over.
    pub asset_id: Uuid,
    /// The receiving employee.
    pub employee_id: Uuid,
    /// The acting administrator.
    pub assigned_by: Uuid,
    /// Handover notes.
    pub notes: Option<String>,
}
