//! Follow service
//!
//! Directed follow edges between users, their counts and follow suggestions.

use social_core::entities::Follow;
use social_core::{DomainError, PageRequest, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    FollowCountsResponse, FollowStatusResponse, FollowersResponse, FollowingResponse, PageMeta,
    SuggestedUsersResponse, UserSummary,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, follower_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        let follow = Follow::new(self.ctx.generate_id(), follower_id, target_id)?;

        self.ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or(DomainError::UserNotFound(target_id))?;

        self.ctx.follow_repo().create(&follow).await?;

        info!(follower_id = %follower_id, following_id = %target_id, "User followed");

        NotificationService::new(self.ctx)
            .notify_follow(follower_id, target_id)
            .await;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        if follower_id == target_id {
            return Err(DomainError::CannotUnfollowSelf.into());
        }

        self.ctx.follow_repo().delete(follower_id, target_id).await?;

        info!(follower_id = %follower_id, following_id = %target_id, "User unfollowed");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_followers(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<FollowersResponse> {
        let users = self.ctx.follow_repo().find_followers(user_id, page).await?;
        let meta = PageMeta::new(page, &users);

        Ok(FollowersResponse {
            followers: users.items.into_iter().map(UserSummary::from).collect(),
            page: meta,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_following(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<FollowingResponse> {
        let users = self.ctx.follow_repo().find_following(user_id, page).await?;
        let meta = PageMeta::new(page, &users);

        Ok(FollowingResponse {
            following: users.items.into_iter().map(UserSummary::from).collect(),
            page: meta,
        })
    }

    #[instrument(skip(self))]
    pub async fn is_following(
        &self,
        follower_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<FollowStatusResponse> {
        let is_following = self.ctx.follow_repo().exists(follower_id, target_id).await?;
        Ok(FollowStatusResponse { is_following })
    }

    #[instrument(skip(self))]
    pub async fn get_follow_counts(&self, user_id: Snowflake) -> ServiceResult<FollowCountsResponse> {
        let counts = self.ctx.follow_repo().counts(user_id).await?;
        Ok(FollowCountsResponse {
            followers_count: counts.followers_count,
            following_count: counts.following_count,
        })
    }

    /// Active users the caller does not follow yet, newest accounts first
    #[instrument(skip(self))]
    pub async fn get_suggested_users(
        &self,
        user_id: Snowflake,
        limit: i64,
    ) -> ServiceResult<SuggestedUsersResponse> {
        let users = self.ctx.follow_repo().find_suggested(user_id, limit).await?;
        Ok(SuggestedUsersResponse {
            users: users.into_iter().map(UserSummary::from).collect(),
            limit,
        })
    }
}
