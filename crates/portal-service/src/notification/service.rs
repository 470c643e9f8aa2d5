//! Notification inbox and fan-out.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use portal_core::error::AppError;
use portal_core::types::pagination::{PageRequest, PageResponse};
use portal_database::repositories::{NotificationRepository, UserRepository};
use portal_entity::notification::{CreateNotification, Notification, NotificationCategory};
use portal_entity::user::UserRole;

use crate::context::RequestContext;

/// Manages user notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notif_repo: Arc<NotificationRepository>,
    user_repo: Arc<UserRepository>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notif_repo: Arc<NotificationRepository>, user_repo: Arc<UserRepository>) -> Self {
        Self {
            notif_repo,
            user_repo,
        }
    }

    /// Lists notifications for the current user.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> Result<PageResponse<Notification>, AppError> {
        self.notif_repo.find_by_user(ctx.user_id, &page).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.count_unread(ctx.user_id).await
    }

    /// Marks one of the current user's notifications as read.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: Uuid,
    ) -> Result<(), AppError> {
        if self.notif_repo.mark_read(notification_id, ctx.user_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("Notification not found"))
        }
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.notif_repo.mark_all_read(ctx.user_id).await
    }

    /// Delivers a notification. Failures are logged, never returned.
    pub async fn notify(&self, notification: CreateNotification) {
        match self.notif_repo.create(&notification).await {
            Ok(created) => debug!(
                notification_id = %created.id,
                user_id = %created.user_id,
                category = %notification.category,
                "Notification created"
            ),
            Err(e) => warn!(
                user_id = %notification.user_id,
                category = %notification.category,
                error = %e,
                "Failed to create notification"
            ),
        }
    }

    /// Delivers the same notification to every active user with one of
    /// `roles`, skipping the actor.
    #[allow(clippy::too_many_arguments)]
    pub async fn notify_roles(
        &self,
        ctx: &RequestContext,
        roles: &[UserRole],
        category: NotificationCategory,
        title: &str,
        message: &str,
        resource_type: &str,
        resource_id: Uuid,
    ) {
        let recipients = match self.user_repo.find_active_ids_by_roles(roles).await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "Failed to resolve notification recipients");
                return;
            }
        };

        for user_id in recipients.into_iter().filter(|id| *id != ctx.user_id) {
            self.notify(CreateNotification::about(
                user_id,
                category,
                title,
                message,
                resource_type,
                resource_id,
            ))
            .await;
        }
    }
}
