//! PostgreSQL implementation of MediaRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::Media;
use social_core::error::DomainError;
use social_core::traits::{MediaRepository, RepoResult};
use social_core::value_objects::Snowflake;

use crate::mappers::media_list;
use crate::models::MediaModel;

use super::error::map_db_error;
use super::sql::{id_array, MEDIA_COLUMNS};

/// PostgreSQL implementation of MediaRepository
#[derive(Clone)]
pub struct PgMediaRepository {
    pool: PgPool,
}

impl PgMediaRepository {
    /// Create a new PgMediaRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MediaRepository for PgMediaRepository {
    #[instrument(skip(self, media), fields(media_id = %media.id))]
    async fn create(&self, media: &Media) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO media (id, uploader_id, post_id, media_type, url, thumbnail_url,
                               file_name, file_size, width, height, duration, sort_order,
                               created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            ",
        )
        .bind(media.id.into_inner())
        .bind(media.uploader_id.into_inner())
        .bind(media.post_id.map(Snowflake::into_inner))
        .bind(media.media_type.as_str())
        .bind(&media.url)
        .bind(&media.thumbnail_url)
        .bind(&media.file_name)
        .bind(media.file_size)
        .bind(media.width)
        .bind(media.height)
        .bind(media.duration)
        .bind(media.sort_order)
        .bind(media.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Media>> {
        let sql =
            format!("SELECT {MEDIA_COLUMNS} FROM media WHERE id = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, MediaModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(Media::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Media>> {
        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media \
             WHERE post_id = $1 AND deleted_at IS NULL \
             ORDER BY sort_order, created_at"
        );
        let rows = sqlx::query_as::<_, MediaModel>(&sql)
            .bind(post_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        media_list(rows)
    }

    #[instrument(skip(self, post_ids), fields(count = post_ids.len()))]
    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Media>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {MEDIA_COLUMNS} FROM media \
             WHERE post_id = ANY($1) AND deleted_at IS NULL \
             ORDER BY post_id, sort_order, created_at"
        );
        let rows = sqlx::query_as::<_, MediaModel>(&sql)
            .bind(id_array(post_ids))
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        media_list(rows)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE media SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MediaNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_orphans(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Media>> {
        let sql = format!(
            "UPDATE media SET deleted_at = NOW(), updated_at = NOW() \
             WHERE post_id IS NULL AND deleted_at IS NULL AND created_at < $1 \
             RETURNING {MEDIA_COLUMNS}"
        );
        let rows = sqlx::query_as::<_, MediaModel>(&sql)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        media_list(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMediaRepository>();
    }
}
