//! Ticket service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use portal_auth::rbac::{Permission, RbacEnforcer};
use portal_core::error::AppError;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::{AssetRepository, TicketRepository, UserRepository};
use portal_entity::notification::{CreateNotification, NotificationCategory};
use portal_entity::ticket::{
    CreateTicket, CreateTicketMessage, Ticket, TicketFilter, TicketMessage, TicketPriority,
    TicketStatus,
};
use portal_entity::user::UserRole;

use super::rules;
use crate::audit::AuditService;
use crate::context::RequestContext;
use crate::notification::NotificationService;

/// Input for opening a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTicketRequest {
    /// Short summary.
    pub title: String,
    /// Problem description.
    pub description: String,
    /// Affected asset.
    pub asset_id: Option<Uuid>,
    /// Priority; `Media` when omitted.
    #[serde(default)]
    pub priority: TicketPriority,
}

/// Manages support tickets.
#[derive(Debug, Clone)]
pub struct TicketService {
    ticket_repo: Arc<TicketRepository>,
    asset_repo: Arc<AssetRepository>,
    user_repo: Arc<UserRepository>,
    notifications: Arc<NotificationService>,
    audit: Arc<AuditService>,
    rbac: Arc<RbacEnforcer>,
}

impl TicketService {
    /// Creates a new ticket service.
    pub fn new(
        ticket_repo: Arc<TicketRepository>,
        asset_repo: Arc<AssetRepository>,
        user_repo: Arc<UserRepository>,
        notifications: Arc<NotificationService>,
        audit: Arc<AuditService>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            ticket_repo,
            asset_repo,
            user_repo,
            notifications,
            audit,
            rbac,
        }
    }

    /// Opens a ticket for the current user.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: OpenTicketRequest,
    ) -> Result<Ticket, AppError> {
        if let Some(asset_id) = req.asset_id {
            self.asset_repo
                .find_by_id(asset_id)
                .await?
                .ok_or_else(|| AppError::not_found("Asset not found"))?;
        }

        let ticket = self
            .ticket_repo
            .create(&CreateTicket {
                title: req.title,
                description: req.description,
                requester_id: ctx.user_id,
                asset_id: req.asset_id,
                priority: req.priority,
            })
            .await?;

        info!(ticket_id = %ticket.id, priority = ticket.priority.as_str(), "Ticket opened");

        self.notifications
            .notify_roles(
                ctx,
                &[UserRole::Admin, UserRole::Tecnico],
                NotificationCategory::Ticket,
                "Nuevo ticket",
                &ticket.title,
                "ticket",
                ticket.id,
            )
            .await;
        self.audit
            .record(ctx, "ticket.create", "ticket", Some(ticket.id), None)
            .await;
        Ok(ticket)
    }

    /// Lists tickets. Without `TicketViewAll` only the caller's own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        mut filter: TicketFilter,
        page: PageRequest,
    ) -> Result<PageResponse<Ticket>, AppError> {
        if !self.rbac.has_permission(&ctx.role, Permission::TicketViewAll) {
            filter.requester_id = Some(ctx.user_id);
        }
        self.ticket_repo.list(&filter, &page).await
    }

    /// Gets one ticket.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Ticket, AppError> {
        let ticket = self.find(id).await?;
        self.require_participant(ctx, &ticket)?;
        Ok(ticket)
    }

    /// Assigns a technician.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        technician_id: Uuid,
    ) -> Result<Ticket, AppError> {
        self.rbac.require_permission(&ctx.role, Permission::TicketAssign)?;

        let technician = self
            .user_repo
            .find_by_id(technician_id)
            .await?
            .ok_or_else(|| AppError::not_found("Technician not found"))?;
        if !technician.is_active || !technician.role.is_staff() {
            return Err(AppError::validation(
                "Tickets can only be assigned to active IT staff",
            ));
        }

        let current = self.find(id).await?;
        if !current.status.is_open() {
            return Err(AppError::validation(format!(
                "Cannot assign a ticket in status {}",
                current.status
            )));
        }

        let ticket = self
            .ticket_repo
            .assign(id, technician_id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))?;

        info!(ticket_id = %ticket.id, technician_id = %technician_id, "Ticket assigned");
        self.notify(
            technician_id,
            &ticket,
            "Ticket asignado",
            "Se te asignó un ticket de soporte.",
        )
        .await;
        self.audit
            .record(
                ctx,
                "ticket.assign",
                "ticket",
                Some(ticket.id),
                Some(json!({ "technician_id": technician_id })),
            )
            .await;
        Ok(ticket)
    }

    /// Moves the ticket to a new status.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        next: TicketStatus,
    ) -> Result<Ticket, AppError> {
        let mut ticket = self.find(id).await?;
        let is_worker = self.rbac.has_permission(&ctx.role, Permission::TicketWork);
        rules::check_status_change(&ticket, ctx.user_id, is_worker, next)?;

        let before = ticket.status;
        rules::apply_status(&mut ticket, next, ctx.request_time);
        let ticket = self.ticket_repo.update_status(&ticket).await?;

        info!(ticket_id = %ticket.id, from = %before, to = %ticket.status, "Ticket status changed");

        let message = format!("El ticket pasó a {}.", ticket.status);
        for user_id in self.counterparts(ctx, &ticket) {
            self.notify(user_id, &ticket, "Ticket actualizado", &message)
                .await;
        }
        self.audit
            .record(
                ctx,
                "ticket.status",
                "ticket",
                Some(ticket.id),
                Some(json!({ "from": before, "to": ticket.status })),
            )
            .await;
        Ok(ticket)
    }

    /// Chat history of a ticket.
    pub async fn list_messages(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<TicketMessage>, AppError> {
        let ticket = self.find(id).await?;
        self.require_participant(ctx, &ticket)?;
        self.ticket_repo.list_messages(id).await
    }

    /// Posts a chat message.
    pub async fn post_message(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        body: String,
    ) -> Result<TicketMessage, AppError> {
        let ticket = self.find(id).await?;
        self.require_participant(ctx, &ticket)?;

        if body.trim().is_empty() {
            return Err(AppError::validation("Message cannot be empty"));
        }
        if matches!(ticket.status, TicketStatus::Cerrado | TicketStatus::Cancelado) {
            return Err(AppError::validation(format!(
                "Cannot post messages on a ticket in status {}",
                ticket.status
            )));
        }

        let message = self
            .ticket_repo
            .add_message(&CreateTicketMessage {
                ticket_id: id,
                author_id: ctx.user_id,
                body,
            })
            .await?;

        for user_id in self.counterparts(ctx, &ticket) {
            self.notify(
                user_id,
                &ticket,
                "Nuevo mensaje",
                "Hay un nuevo mensaje en tu ticket.",
            )
            .await;
        }
        Ok(message)
    }

    async fn find(&self, id: Uuid) -> Result<Ticket, AppError> {
        self.ticket_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))
    }

    fn require_participant(&self, ctx: &RequestContext, ticket: &Ticket) -> Result<(), AppError> {
        if ticket.is_participant(ctx.user_id)
            || self.rbac.has_permission(&ctx.role, Permission::TicketViewAll)
        {
            Ok(())
        } else {
            Err(AppError::authorization("You cannot access this ticket"))
        }
    }

    /// Requester and assigned technician, minus the actor.
    fn counterparts(&self, ctx: &RequestContext, ticket: &Ticket) -> Vec<Uuid> {
        [Some(ticket.requester_id), ticket.assigned_to]
            .into_iter()
            .flatten()
            .filter(|id| *id != ctx.user_id)
            .collect()
    }

    async fn notify(&self, user_id: Uuid, ticket: &Ticket, title: &str, message: &str) {
        self.notifications
            .notify(CreateNotification::about(
                user_id,
                NotificationCategory::Ticket,
                title,
                message,
                "ticket",
                ticket.id,
            ))
            .await;
    }
}
