//! User service
//!
//! Public profiles and profile updates.

use social_core::entities::{ProfileUpdate, User};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{UpdateProfileRequest, UserPublic};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile with follower, following and post counts
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserPublic> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        self.with_stats(&user).await
    }

    #[instrument(skip(self))]
    pub async fn get_user_by_username(&self, username: &str) -> ServiceResult<UserPublic> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UsernameNotFound(username.to_string()))?;
        self.with_stats(&user).await
    }

    /// Apply the present fields of `request`; at least one is required
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Snowflake,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserPublic> {
        let update = ProfileUpdate::from(request);
        if update.is_empty() {
            return Err(DomainError::NothingToUpdate.into());
        }

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        user.apply_profile(&update);
        self.ctx.user_repo().update_profile(&user).await?;

        info!(user_id = %user_id, "Profile updated");
        self.with_stats(&user).await
    }

    pub(crate) async fn with_stats(&self, user: &User) -> ServiceResult<UserPublic> {
        let stats = self.ctx.user_repo().get_stats(user.id).await?;
        Ok(UserPublic::new(user, stats))
    }
}
