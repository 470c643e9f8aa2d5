//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::NotificationCategory;

/// A notification delivered to a user's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// Notification category.
    pub category: String,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Resource type involved (if applicable).
    pub resource_type: Option<String>,
    /// Resource ID involved (if applicable).
    pub resource_id: Option<Uuid>,
    /// Whether the user has read this notification.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification has been read.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Data required to create a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub user_id: Uuid,
    pub category: NotificationCategory,
    pub title: String,
    pub message: String,
    pub resource_type: Option<String>,
    pub resource_id: Option<Uuid>,
}

impl CreateNotification {
    /// Notification about a specific resource.
    pub fn about(
        user_id: Uuid,
        category: NotificationCategory,
        title: impl Into<String>,
        message: impl Into<String>,
        resource_type: &str,
        resource_id: Uuid,
    ) -> Self {
        Self {
            user_id,
            category,
            title: title.into(),
            message: message.into(),
            resource_type: Some(resource_type.to_string()),
            resource_id: Some(resource_id),
        }
    }
}
