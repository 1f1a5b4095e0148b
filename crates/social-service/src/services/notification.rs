//! Notification service
//!
//! Creates notifications as a side effect of follows, likes, comments,
//! reposts and quotes, and serves the recipient's inbox.

use social_core::entities::{Notification, NotificationType};
use social_core::{PageRequest, Snowflake};
use tracing::{debug, instrument, warn};

use crate::dto::{
    DeletedCountResponse, NotificationListResponse, NotificationResponse, PageMeta,
    UnreadCountResponse, UpdatedCountResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // === Event hooks ===
    //
    // These never fail the action that triggered them.

    pub async fn notify_follow(&self, actor_id: Snowflake, target_id: Snowflake) {
        self.emit(target_id, actor_id, NotificationType::Follow, None)
            .await;
    }

    pub async fn notify_like(&self, actor_id: Snowflake, author_id: Snowflake, post_id: Snowflake) {
        self.emit(author_id, actor_id, NotificationType::Like, Some(post_id))
            .await;
    }

    pub async fn notify_comment(
        &self,
        actor_id: Snowflake,
        author_id: Snowflake,
        post_id: Snowflake,
    ) {
        self.emit(author_id, actor_id, NotificationType::Comment, Some(post_id))
            .await;
    }

    pub async fn notify_repost(
        &self,
        actor_id: Snowflake,
        author_id: Snowflake,
        post_id: Snowflake,
    ) {
        self.emit(author_id, actor_id, NotificationType::Repost, Some(post_id))
            .await;
    }

    pub async fn notify_quote(&self, actor_id: Snowflake, author_id: Snowflake, post_id: Snowflake) {
        self.emit(author_id, actor_id, NotificationType::Quote, Some(post_id))
            .await;
    }

    async fn emit(
        &self,
        recipient_id: Snowflake,
        actor_id: Snowflake,
        notification_type: NotificationType,
        post_id: Option<Snowflake>,
    ) {
        let Some(notification) = Notification::for_event(
            self.ctx.generate_id(),
            recipient_id,
            actor_id,
            notification_type,
            post_id,
        ) else {
            return;
        };

        let repo = self.ctx.notification_repo();
        let result = if notification_type.is_deduplicated() {
            repo.create_unique(&notification).await
        } else {
            repo.create(&notification).await.map(|()| true)
        };

        match result {
            Ok(true) => {}
            Ok(false) => debug!(
                recipient_id = %recipient_id,
                actor_id = %actor_id,
                kind = %notification_type,
                "Notification already outstanding"
            ),
            Err(e) => warn!(
                recipient_id = %recipient_id,
                actor_id = %actor_id,
                kind = %notification_type,
                error = %e,
                "Failed to create notification"
            ),
        }
    }

    // === Inbox ===

    /// Newest first, with actor and post summary
    #[instrument(skip(self))]
    pub async fn get_notifications(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<NotificationListResponse> {
        let result = self.ctx.notification_repo().find_by_user(user_id, page).await?;
        let unread_count = self.ctx.notification_repo().count_unread(user_id).await?;
        let meta = PageMeta::new(page, &result);

        Ok(NotificationListResponse {
            notifications: result
                .items
                .into_iter()
                .map(NotificationResponse::from)
                .collect(),
            page: meta,
            unread_count,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_unread_count(&self, user_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        let unread_count = self.ctx.notification_repo().count_unread(user_id).await?;
        Ok(UnreadCountResponse { unread_count })
    }

    #[instrument(skip(self))]
    pub async fn mark_as_read(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<()> {
        self.ctx.notification_repo().mark_read(id, user_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn mark_all_as_read(&self, user_id: Snowflake) -> ServiceResult<UpdatedCountResponse> {
        let updated = self.ctx.notification_repo().mark_all_read(user_id).await?;
        debug!(user_id = %user_id, updated, "Marked notifications read");
        Ok(UpdatedCountResponse { updated })
    }

    #[instrument(skip(self))]
    pub async fn delete_notification(&self, user_id: Snowflake, id: Snowflake) -> ServiceResult<()> {
        self.ctx.notification_repo().delete(id, user_id).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_all_notifications(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<DeletedCountResponse> {
        let deleted = self.ctx.notification_repo().delete_all(user_id).await?;
        Ok(DeletedCountResponse { deleted })
    }
}
