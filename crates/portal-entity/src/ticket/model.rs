//! Ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{TicketPriority, TicketStatus};

/// A support request raised by a user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: Uuid,
    /// Short summary.
    pub title: String,
    /// Full description.
    pub description: String,
    /// User who opened the ticket.
    pub requester_id: Uuid,
    /// Related asset, if any.
    pub asset_id: Option<Uuid>,
    /// Technician working on it.
    pub assigned_to: Option<Uuid>,
    /// Urgency.
    pub priority: TicketPriority,
    /// Lifecycle status.
    pub status: TicketStatus,
    /// When it was opened.
    pub created_at: DateTime<Utc>,
    /// Last update.
    pub updated_at: DateTime<Utc>,
    /// When it was resolved.
    pub resolved_at: Option<DateTime<Utc>>,
    /// When it was closed or cancelled.
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Whether `user_id` takes part in the conversation.
    pub fn is_participant(&self, user_id: Uuid) -> bool {
        self.requester_id == user_id || self.assigned_to == Some(user_id)
    }
}

/// Data required to open a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    pub title: String,
    pub description: String,
    pub requester_id: Uuid,
    pub asset_id: Option<Uuid>,
    pub priority: TicketPriority,
}

/// Listing filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketFilter {
    /// Restrict to one requester.
    pub requester_id: Option<Uuid>,
    /// Restrict to one status.
    pub status: Option<TicketStatus>,
}
