//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{Follow, FollowCounts, User};
use social_core::error::DomainError;
use social_core::traits::{FollowRepository, RepoResult};
use social_core::value_objects::{Page, PageRequest, Snowflake};

use crate::models::UserModel;

use super::error::{map_db_error, map_foreign_key_violation};
use super::sql::USER_COLUMNS;

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Users on one side of the follow edge, newest edge first.
    /// `anchor` is the column matched against `user_id`, `other` the column joined to users.
    async fn find_edge_users(
        &self,
        anchor: &str,
        other: &str,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM follows f JOIN users u ON u.id = f.{other} \
             WHERE f.{anchor} = $1 AND f.deleted_at IS NULL AND u.deleted_at IS NULL \
             ORDER BY f.created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(user_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM follows f JOIN users u ON u.id = f.{other} \
             WHERE f.{anchor} = $1 AND f.deleted_at IS NULL AND u.deleted_at IS NULL"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(User::from).collect(), total))
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self, follow), fields(follower_id = %follow.follower_id, following_id = %follow.following_id))]
    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            INSERT INTO follows (id, follower_id, following_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (follower_id, following_id) WHERE deleted_at IS NULL DO NOTHING
            ",
        )
        .bind(follow.id.into_inner())
        .bind(follow.follower_id.into_inner())
        .bind(follow.following_id.into_inner())
        .bind(follow.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, |_| DomainError::UserNotFound(follow.following_id))
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::AlreadyFollowing);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE follows SET deleted_at = NOW(), updated_at = NOW()
            WHERE follower_id = $1 AND following_id = $2 AND deleted_at IS NULL
            ",
        )
        .bind(follower_id.into_inner())
        .bind(following_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::FollowNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND following_id = $2 AND deleted_at IS NULL
            )
            ",
        )
        .bind(follower_id.into_inner())
        .bind(following_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn counts(&self, user_id: Snowflake) -> RepoResult<FollowCounts> {
        let (followers_count, following_count) = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE following_id = $1 AND deleted_at IS NULL),
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND deleted_at IS NULL)
            ",
        )
        .bind(user_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(FollowCounts {
            followers_count,
            following_count,
        })
    }

    #[instrument(skip(self))]
    async fn find_followers(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<User>> {
        self.find_edge_users("following_id", "follower_id", user_id, page)
            .await
    }

    #[instrument(skip(self))]
    async fn find_following(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<User>> {
        self.find_edge_users("follower_id", "following_id", user_id, page)
            .await
    }

    #[instrument(skip(self))]
    async fn find_suggested(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u \
             WHERE u.id <> $1 AND u.is_active = TRUE AND u.deleted_at IS NULL \
               AND NOT EXISTS ( \
                   SELECT 1 FROM follows f \
                   WHERE f.follower_id = $1 AND f.following_id = u.id AND f.deleted_at IS NULL \
               ) \
             ORDER BY u.created_at DESC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(user_id.into_inner())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
