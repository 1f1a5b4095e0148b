//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use social_core::entities::{User, UserStats};
use social_core::error::DomainError;
use social_core::traits::{RepoResult, UserRepository};
use social_core::value_objects::Snowflake;

use crate::models::{UserModel, UserStatsModel};

use super::error::{map_db_error, map_unique_violation, user_conflict};

const SELECT_USER: &str = r"
    SELECT id, username, email, display_name, bio, profile_image_url, cover_image_url,
           location, website, is_verified, is_active, created_at, updated_at
    FROM users
";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE id = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE username = $1 AND deleted_at IS NULL");
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>> {
        let sql = format!(
            "{SELECT_USER} WHERE (username = $1 OR email = LOWER($1)) AND deleted_at IS NULL \
             ORDER BY (username = $1) DESC LIMIT 1"
        );
        let result = sqlx::query_as::<_, UserModel>(&sql)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            ",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, username, email, password_hash, display_name, bio,
                               profile_image_url, cover_image_url, location, website,
                               is_verified, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.username)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.display_name)
        .bind(&user.bio)
        .bind(&user.profile_image_url)
        .bind(&user.cover_image_url)
        .bind(&user.location)
        .bind(&user.website)
        .bind(user.is_verified)
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, user_conflict))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET display_name = $2, bio = $3, profile_image_url = $4, cover_image_url = $5,
                location = $6, website = $7, updated_at = $8
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(user.id.into_inner())
        .bind(&user.display_name)
        .bind(&user.bio)
        .bind(&user.profile_image_url)
        .bind(&user.cover_image_url)
        .bind(&user.location)
        .bind(&user.website)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn get_stats(&self, id: Snowflake) -> RepoResult<UserStats> {
        let stats = sqlx::query_as::<_, UserStatsModel>(
            r"
            SELECT
                (SELECT COUNT(*) FROM follows
                 WHERE following_id = $1 AND deleted_at IS NULL) AS followers_count,
                (SELECT COUNT(*) FROM follows
                 WHERE follower_id = $1 AND deleted_at IS NULL) AS following_count,
                (SELECT COUNT(*) FROM posts
                 WHERE author_id = $1 AND deleted_at IS NULL AND is_draft = FALSE) AS posts_count
            ",
        )
        .bind(id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stats.into())
    }
}
