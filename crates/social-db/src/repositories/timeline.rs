//! PostgreSQL implementation of TimelineRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::AuthoredPost;
use social_core::traits::{RepoResult, TimelineRepository};
use social_core::value_objects::{Page, PageRequest, Snowflake};

use crate::mappers::authored_posts;
use crate::models::AuthoredPostModel;

use super::error::map_db_error;
use super::sql::{AUTHORED_POST_SELECT, LISTED_POST};

const HOME_FILTER: &str = "(p.author_id = $1 OR p.author_id IN ( \
        SELECT following_id FROM follows WHERE follower_id = $1 AND deleted_at IS NULL))";

/// PostgreSQL implementation of TimelineRepository
#[derive(Clone)]
pub struct PgTimelineRepository {
    pool: PgPool,
}

impl PgTimelineRepository {
    /// Create a new PgTimelineRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineRepository for PgTimelineRepository {
    #[instrument(skip(self))]
    async fn home(&self, user_id: Snowflake, page: PageRequest) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} WHERE {LISTED_POST} AND {HOME_FILTER} \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(user_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql =
            format!("SELECT COUNT(*) FROM posts p WHERE {LISTED_POST} AND {HOME_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(user_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }

    #[instrument(skip(self))]
    async fn explore(&self, page: PageRequest) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} WHERE {LISTED_POST} \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM posts p WHERE {LISTED_POST}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }

    #[instrument(skip(self))]
    async fn trending(
        &self,
        since: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} WHERE {LISTED_POST} AND p.created_at >= $1 \
             ORDER BY (p.likes_count + p.reposts_count + p.comments_count) DESC, \
                      p.created_at DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(since)
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql =
            format!("SELECT COUNT(*) FROM posts p WHERE {LISTED_POST} AND p.created_at >= $1");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(since)
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }

    #[instrument(skip(self))]
    async fn replies(
        &self,
        parent_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} \
             WHERE {LISTED_POST} AND p.post_type = 'reply' AND p.parent_post_id = $1 \
             ORDER BY p.created_at ASC, p.id ASC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(parent_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM posts p \
             WHERE {LISTED_POST} AND p.post_type = 'reply' AND p.parent_post_id = $1"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(parent_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }
}
