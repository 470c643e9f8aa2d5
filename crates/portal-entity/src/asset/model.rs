//! Asset entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::AssetStatus;

/// A piece of hardware tracked in inventory.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Asset {
    /// Unique asset identifier.
    pub id: Uuid,
    /// Inventory code printed on the label (unique).
    pub code: String,
    /// Short descriptive name.
    pub name: String,
    /// Category (laptop, monitor, phone...).
    pub category: String,
    /// Brand.
    pub brand: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Manufacturer serial number.
    pub serial_number: Option<String>,
    /// Inventory status.
    pub status: AssetStatus,
    /// Physical location.
    pub location: Option<String>,
    /// Purchase date.
    pub purchase_date: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// When the asset was registered.
    pub created_at: DateTime<Utc>,
    /// When the asset was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to register an asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAsset {
    /// Inventory code.
    pub code: String,
    /// Name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Brand.
    pub brand: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Location.
    pub location: Option<String>,
    /// Purchase date.
    pub purchase_date: Option<NaiveDate>,
    /// Notes.
    pub notes: Option<String>,
}

/// Partial update of an asset. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAsset {
    /// Name.
    pub name: Option<String>,
    /// Category.
    pub category: Option<String>,
    /// Brand.
    pub brand: Option<String>,
    /// Model.
    pub model: Option<String>,
    /// Serial number.
    pub serial_number: Option<String>,
    /// Status. Moving into or out of `Asignado` is reserved to assignments.
    pub status: Option<AssetStatus>,
    /// Location.
    pub location: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Inventory list filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFilter {
    /// Only assets in this status.
    pub status: Option<AssetStatus>,
    /// Only assets in this category.
    pub category: Option<String>,
    /// Case-insensitive match on code, name or serial number.
    pub search: Option<String>,
}
