//! PostgreSQL implementation of LikeRepository

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{AuthoredPost, Like, User};
use social_core::error::DomainError;
use social_core::traits::{LikeRepository, RepoResult};
use social_core::value_objects::{Page, PageRequest, Snowflake};

use crate::mappers::authored_posts;
use crate::models::{AuthoredPostModel, UserModel};

use super::error::{map_db_error, map_foreign_key_violation};
use super::sql::{id_array, AUTHORED_POST_SELECT, USER_COLUMNS};

/// PostgreSQL implementation of LikeRepository
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self, like), fields(user_id = %like.user_id, post_id = %like.post_id))]
    async fn create(&self, like: &Like) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO likes (id, user_id, post_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id, post_id) WHERE deleted_at IS NULL DO NOTHING
            ",
        )
        .bind(like.id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.post_id.into_inner())
        .bind(like.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_foreign_key_violation(e, |_| DomainError::PostNotFound(like.post_id)))?;

        if inserted.rows_affected() == 0 {
            return Err(DomainError::AlreadyLiked);
        }

        let updated = sqlx::query(
            r"
            UPDATE posts SET likes_count = likes_count + 1
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(like.post_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(like.post_id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, user_id: Snowflake, post_id: Snowflake) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(
            r"
            UPDATE likes SET deleted_at = NOW(), updated_at = NOW()
            WHERE user_id = $1 AND post_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .bind(post_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if removed.rows_affected() == 0 {
            return Err(DomainError::LikeNotFound);
        }

        sqlx::query(
            r"
            UPDATE posts SET likes_count = GREATEST(likes_count - 1, 0)
            WHERE id = $1
            ",
        )
        .bind(post_id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, user_id: Snowflake, post_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM likes
                WHERE user_id = $1 AND post_id = $2 AND deleted_at IS NULL
            )
            ",
        )
        .bind(user_id.into_inner())
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    async fn liked_post_ids(
        &self,
        user_id: Snowflake,
        post_ids: &[Snowflake],
    ) -> RepoResult<HashSet<Snowflake>> {
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT post_id FROM likes
            WHERE user_id = $1 AND post_id = ANY($2) AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .bind(id_array(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }

    #[instrument(skip(self))]
    async fn find_likers(&self, post_id: Snowflake, page: PageRequest) -> RepoResult<Page<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM likes l JOIN users u ON u.id = l.user_id \
             WHERE l.post_id = $1 AND l.deleted_at IS NULL AND u.deleted_at IS NULL \
             ORDER BY l.created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(post_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM likes WHERE post_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(post_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(User::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn find_liked_posts(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} JOIN likes l ON l.post_id = p.id \
             WHERE l.user_id = $1 AND l.deleted_at IS NULL AND p.deleted_at IS NULL \
             ORDER BY l.created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(user_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM likes l JOIN posts p ON p.id = l.post_id
            WHERE l.user_id = $1 AND l.deleted_at IS NULL AND p.deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgLikeRepository>();
    }
}
