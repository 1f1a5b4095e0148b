//! PostgreSQL implementation of NotificationRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Notification, NotificationDetail, Post, User};
use social_core::error::DomainError;
use social_core::traits::{NotificationRepository, RepoResult};
use social_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::{NotificationModel, PostModel, UserModel};

use super::error::map_db_error;
use super::sql::{NOTIFICATION_COLUMNS, POST_COLUMNS, USER_COLUMNS};

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_actors(&self, ids: Vec<i64>) -> RepoResult<HashMap<Snowflake, User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = ANY($1)");
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let user = User::from(row);
                (user.id, user)
            })
            .collect())
    }

    async fn load_posts(&self, ids: Vec<i64>) -> RepoResult<HashMap<Snowflake, Post>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts p WHERE p.id = ANY($1) AND p.deleted_at IS NULL"
        );
        let rows = sqlx::query_as::<_, PostModel>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        rows.into_iter()
            .map(|row| Post::try_from(row).map(|post| (post.id, post)))
            .collect()
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(user_id = %notification.user_id, kind = %notification.notification_type))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, actor_id, notification_type, post_id,
                                       message, is_read, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(notification.actor_id.into_inner())
        .bind(notification.notification_type.as_str())
        .bind(notification.post_id.map(Snowflake::into_inner))
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, notification), fields(user_id = %notification.user_id, kind = %notification.notification_type))]
    async fn create_unique(&self, notification: &Notification) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            INSERT INTO notifications (id, user_id, actor_id, notification_type, post_id,
                                       message, is_read, created_at, updated_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8, $8
            WHERE NOT EXISTS (
                SELECT 1 FROM notifications
                WHERE user_id = $2 AND actor_id = $3 AND notification_type = $4
                  AND post_id IS NOT DISTINCT FROM $5 AND deleted_at IS NULL
            )
            ",
        )
        .bind(notification.id.into_inner())
        .bind(notification.user_id.into_inner())
        .bind(notification.actor_id.into_inner())
        .bind(notification.notification_type.as_str())
        .bind(notification.post_id.map(Snowflake::into_inner))
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<NotificationDetail>> {
        let sql = format!(
            "SELECT {NOTIFICATION_COLUMNS} FROM notifications \
             WHERE user_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, NotificationModel>(&sql)
            .bind(user_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        if rows.is_empty() {
            return Ok(Page::new(Vec::new(), total));
        }

        let notifications = rows
            .into_iter()
            .map(Notification::try_from)
            .collect::<Result<Vec<_>, DomainError>>()?;

        let actor_ids = notifications.iter().map(|n| n.actor_id.into_inner()).collect();
        let post_ids = notifications
            .iter()
            .filter_map(|n| n.post_id.map(Snowflake::into_inner))
            .collect();

        let actors = self.load_actors(actor_ids).await?;
        let posts = self.load_posts(post_ids).await?;

        let items = notifications
            .into_iter()
            .filter_map(|notification| {
                let actor = actors.get(&notification.actor_id)?.clone();
                let post = notification.post_id.and_then(|id| posts.get(&id).cloned());
                Some(NotificationDetail {
                    notification,
                    actor,
                    post,
                })
            })
            .collect();

        Ok(Page::new(items, total))
    }

    #[instrument(skip(self))]
    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM notifications
            WHERE user_id = $1 AND is_read = FALSE AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET is_read = TRUE, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET is_read = TRUE, updated_at = NOW()
            WHERE user_id = $1 AND is_read = FALSE AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotificationNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self, user_id: Snowflake) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications SET deleted_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgNotificationRepository>();
    }
}
