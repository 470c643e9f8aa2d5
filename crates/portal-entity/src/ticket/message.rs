//! Ticket chat message entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One chat message on a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketMessage {
    /// Unique message identifier.
    pub id: Uuid,
    /// Owning ticket.
    pub ticket_id: Uuid,
    /// Author.
    pub author_id: Uuid,
    /// Message text.
    pub body: String,
    /// When it was posted.
    pub created_at: DateTime<Utc>,
}

/// Data required to post a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicketMessage {
    pub ticket_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
}
