//! Ticket and ticket message repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use portal_core::error::{AppError, ErrorKind};
use portal_core::result::AppResult;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_entity::ticket::{
    CreateTicket, CreateTicketMessage, Ticket, TicketFilter, TicketMessage, TicketStatus,
};

/// Repository for support tickets and their chat.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a ticket by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))
    }

    /// List tickets, newest first.
    pub async fn list(
        &self,
        filter: &TicketFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Ticket>> {
        let where_clause = "WHERE ($1::UUID IS NULL OR requester_id = $1) \
                            AND ($2::ticket_status IS NULL OR status = $2)";

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM tickets {where_clause}"))
            .bind(filter.requester_id)
            .bind(filter.status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tickets", e))?;

        let tickets = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT * FROM tickets {where_clause} ORDER BY created_at DESC LIMIT $3 OFFSET $4"
        ))
        .bind(filter.requester_id)
        .bind(filter.status)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tickets", e))?;

        Ok(PageResponse::new(tickets, page, total as u64))
    }

    /// Open a new ticket.
    pub async fn create(&self, data: &CreateTicket) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(
            "INSERT INTO tickets (title, description, requester_id, asset_id, priority) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.requester_id)
        .bind(data.asset_id)
        .bind(data.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create ticket", e))
    }

    /// Assign a technician.
    pub async fn assign(&self, id: Uuid, technician_id: Uuid) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET assigned_to = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(technician_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to assign ticket", e))
    }

    /// Store a new status with its timestamps.
    pub async fn update_status(&self, ticket: &Ticket) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(
            "UPDATE tickets SET status = $2, resolved_at = $3, closed_at = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(ticket.id)
        .bind(ticket.status)
        .bind(ticket.resolved_at)
        .bind(ticket.closed_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update ticket", e))?
        .ok_or_else(|| AppError::not_found("Ticket not found"))
    }

    /// Number of tickets still open or in progress.
    pub async fn count_open(&self) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets WHERE status IN ('Abierto', 'EnProceso')")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tickets", e))
    }

    /// Ticket counts grouped by status.
    pub async fn count_by_status(&self) -> AppResult<Vec<(TicketStatus, i64)>> {
        sqlx::query_as::<_, (TicketStatus, i64)>(
            "SELECT status, COUNT(*) FROM tickets GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tickets", e))
    }

    /// Post a chat message.
    pub async fn add_message(&self, data: &CreateTicketMessage) -> AppResult<TicketMessage> {
        sqlx::query_as::<_, TicketMessage>(
            "INSERT INTO ticket_messages (ticket_id, author_id, body) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.ticket_id)
        .bind(data.author_id)
        .bind(&data.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to add ticket message", e))
    }

    /// Chat messages of a ticket, oldest first.
    pub async fn list_messages(&self, ticket_id: Uuid) -> AppResult<Vec<TicketMessage>> {
        sqlx::query_as::<_, TicketMessage>(
            "SELECT * FROM ticket_messages WHERE ticket_id = $1 ORDER BY created_at ASC",
        )
        .bind(ticket_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list ticket messages", e)
        })
    }
}
