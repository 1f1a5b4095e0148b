//! PostgreSQL implementation of PostRepository

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use social_core::entities::{AuthoredPost, Post, PostKind};
use social_core::error::DomainError;
use social_core::traits::{PostRepository, RepoResult};
use social_core::value_objects::{Page, PageRequest, Snowflake};

use crate::mappers::authored_posts;
use crate::models::{AuthoredPostModel, PostModel};

use super::error::map_db_error;
use super::sql::{id_array, AUTHORED_POST_SELECT, POST_COLUMNS};

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Find-or-create each hashtag and link it to the post
async fn link_hashtags(
    conn: &mut PgConnection,
    post_id: Snowflake,
    hashtags: &[String],
) -> RepoResult<()> {
    for name in hashtags {
        let hashtag_id = sqlx::query_scalar::<_, i64>(
            r"
            INSERT INTO hashtags (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET updated_at = NOW()
            RETURNING id
            ",
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO post_hashtags (post_id, hashtag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(post_id.into_inner())
        .bind(hashtag_id)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;
    }

    Ok(())
}

/// Add `delta` to the counter the post's kind contributes to, clamped at zero
async fn adjust_reference_counter(
    conn: &mut PgConnection,
    kind: &PostKind,
    delta: i32,
) -> RepoResult<()> {
    let (sql, target) = match kind {
        PostKind::Reply { parent_id } => (
            r"
            UPDATE posts SET comments_count = GREATEST(comments_count + $2, 0)
            WHERE id = $1
            ",
            *parent_id,
        ),
        PostKind::Repost { original_id } => (
            r"
            UPDATE posts SET reposts_count = GREATEST(reposts_count + $2, 0)
            WHERE id = $1
            ",
            *original_id,
        ),
        PostKind::Original | PostKind::Quote { .. } => return Ok(()),
    };

    sqlx::query(sql)
        .bind(target.into_inner())
        .bind(delta)
        .execute(&mut *conn)
        .await
        .map_err(map_db_error)?;

    Ok(())
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self, post, hashtags, media_ids), fields(post_id = %post.id))]
    async fn create(
        &self,
        post: &Post,
        hashtags: &[String],
        media_ids: &[Snowflake],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, content, post_type, is_public, is_draft,
                               original_post_id, parent_post_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .bind(post.kind.post_type().as_str())
        .bind(post.is_public)
        .bind(post.is_draft)
        .bind(post.kind.original_id().map(Snowflake::into_inner))
        .bind(post.kind.parent_id().map(Snowflake::into_inner))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        link_hashtags(&mut *tx, post.id, hashtags).await?;

        for (order, media_id) in media_ids.iter().enumerate() {
            sqlx::query(
                r"
                UPDATE media
                SET post_id = $1, sort_order = $2, updated_at = NOW()
                WHERE id = $3 AND uploader_id = $4 AND post_id IS NULL AND deleted_at IS NULL
                ",
            )
            .bind(post.id.into_inner())
            .bind(i32::try_from(order).unwrap_or(i32::MAX))
            .bind(media_id.into_inner())
            .bind(post.author_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        adjust_reference_counter(&mut *tx, &post.kind, 1).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let sql =
            format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = $1 AND p.deleted_at IS NULL");
        let result = sqlx::query_as::<_, PostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Post::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_with_author(&self, id: Snowflake) -> RepoResult<Option<AuthoredPost>> {
        let sql = format!("{AUTHORED_POST_SELECT} WHERE p.id = $1 AND p.deleted_at IS NULL");
        let result = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(AuthoredPost::try_from).transpose()
    }

    #[instrument(skip(self, post, hashtags), fields(post_id = %post.id))]
    async fn update_content(&self, post: &Post, hashtags: &[String]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE posts SET content = $2, updated_at = $3
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.content)
        .bind(post.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        sqlx::query("DELETE FROM post_hashtags WHERE post_id = $1")
            .bind(post.id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        link_hashtags(&mut *tx, post.id, hashtags).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn soft_delete(&self, post: &Post) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result = sqlx::query(
            r"
            UPDATE posts SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(post.id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound(post.id));
        }

        adjust_reference_counter(&mut *tx, &post.kind, -1).await?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>> {
        let sql = format!(
            "{AUTHORED_POST_SELECT} \
             WHERE p.author_id = $1 AND p.deleted_at IS NULL AND p.is_draft = FALSE \
             ORDER BY p.created_at DESC, p.id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, AuthoredPostModel>(&sql)
            .bind(author_id.into_inner())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM posts
            WHERE author_id = $1 AND deleted_at IS NULL AND is_draft = FALSE
            ",
        )
        .bind(author_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Page::new(authored_posts(rows)?, total))
    }

    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    async fn reposted_post_ids(
        &self,
        user_id: Snowflake,
        post_ids: &[Snowflake],
    ) -> RepoResult<HashSet<Snowflake>> {
        if post_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids = sqlx::query_scalar::<_, i64>(
            r"
            SELECT DISTINCT original_post_id FROM posts
            WHERE author_id = $1 AND post_type = 'repost'
              AND original_post_id = ANY($2) AND deleted_at IS NULL
            ",
        )
        .bind(user_id.into_inner())
        .bind(id_array(post_ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(Snowflake::new).collect())
    }
}
