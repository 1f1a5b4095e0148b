//! PostgreSQL implementation of SearchRepository
//!
//! Matching is `LOWER(column) LIKE '%query%'` with metacharacters escaped.
//! Users and hashtags rank an exact match first, then a prefix match.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{AuthoredPost, Hashtag, HashtagCount, User};
use social_core::traits::{RepoResult, SearchRepository};
use social_core::value_objects::{Page, PageRequest, Snowflake};

use crate::mappers::authored_posts;
use crate::models::{AuthoredPostModel, HashtagCountModel, HashtagModel, UserModel};

use super::error::map_db_error;
use super::sql::{
    contains_pattern, prefix_pattern, AUTHORED_POST_SELECT, LISTED_POST, USER_COLUMNS,
};

const USER_MATCH: &str = "u.is_active = TRUE AND u.deleted_at IS NULL \
    AND (LOWER(u.username) LIKE $1 OR LOWER(u.display_name) LIKE $1)";

/// PostgreSQL implementation of SearchRepository
#[derive(Clone)]
pub struct PgSearchRepository {
    pool: PgPool,
}

impl PgSearchRepository {
    /// Create a new PgSearchRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchRepository for PgSearchRepository {
    #[instrument(skip(self))]
    async fn search_users(&self, query: &str, page: PageRequest) -> RepoResult<Page<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u WHERE {USER_MATCH} \
             ORDER BY CASE \
                 WHEN LOWER(u.username) = $2 THEN 0 \
                 WHEN LOWER(u.username) LIKE $3 THEN 1 \
                 ELSE 2 END, \
             u.created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, UserModel>(&sql)
            .bind(contains_pattern(query))
            .bind(query)
            .bind(prefix_pattern(query))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!("SELECT COUNT(*) FROM users u WHERE {USER_MATCH}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(contains_pattern(query))
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(User::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn search_posts(
        &self,
        query: &str,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} WHERE {LISTED_POST} AND LOWER(p.content) LIKE $1 \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(contains_pattern(query))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM posts p WHERE {LISTED_POST} AND LOWER(p.content) LIKE $1"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(contains_pattern(query))
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }

    #[instrument(skip(self))]
    async fn search_hashtags(
        &self,
        query: &str,
        page: PageRequest,
    ) -> RepoResult<Page<HashtagCount>> {
        let sql = format!(
            "SELECT h.id, h.name, h.created_at, COUNT(p.id) AS posts_count \
             FROM hashtags h \
             LEFT JOIN post_hashtags ph ON ph.hashtag_id = h.id \
             LEFT JOIN posts p ON p.id = ph.post_id AND {LISTED_POST} \
             WHERE h.name LIKE $1 \
             GROUP BY h.id, h.name, h.created_at \
             ORDER BY CASE WHEN h.name = $2 THEN 0 WHEN h.name LIKE $3 THEN 1 ELSE 2 END, \
                      h.created_at DESC \
             LIMIT $4 OFFSET $5"
        );
        let rows = sqlx::query_as::<_, HashtagCountModel>(&sql)
            .bind(contains_pattern(query))
            .bind(query)
            .bind(prefix_pattern(query))
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM hashtags WHERE name LIKE $1
            ",
        )
        .bind(contains_pattern(query))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(rows.into_iter().map(HashtagCount::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn find_hashtag(&self, name: &str) -> RepoResult<Option<Hashtag>> {
        let result = sqlx::query_as::<_, HashtagModel>(
            r"
            SELECT id, name, created_at FROM hashtags WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Hashtag::from))
    }

    #[instrument(skip(self))]
    async fn hashtag_posts(
        &self,
        hashtag_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} JOIN post_hashtags ph ON ph.post_id = p.id \
             WHERE ph.hashtag_id = $1 AND {LISTED_POST} \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(hashtag_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let count_sql = format!(
            "SELECT COUNT(*) FROM posts p JOIN post_hashtags ph ON ph.post_id = p.id \
             WHERE ph.hashtag_id = $1 AND {LISTED_POST}"
        );
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(hashtag_id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }

    #[instrument(skip(self))]
    async fn trending_hashtags(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<HashtagCount>> {
        let sql = format!(
            "SELECT h.id, h.name, h.created_at, COUNT(p.id) AS posts_count \
             FROM hashtags h \
             JOIN post_hashtags ph ON ph.hashtag_id = h.id \
             JOIN posts p ON p.id = ph.post_id \
             WHERE {LISTED_POST} AND p.created_at >= $1 \
             GROUP BY h.id, h.name, h.created_at \
             ORDER BY posts_count DESC, h.name ASC \
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, HashtagCountModel>(&sql)
            .bind(since)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(HashtagCount::from).collect())
    }
}
