//! Like service
//!
//! Like and unlike are single repository calls that keep the post's
//! `likes_count` in step with the like rows.

use social_core::entities::{Like, Post};
use social_core::{DomainError, PageRequest, Snowflake};
use tracing::{info, instrument};

use crate::dto::{LikeStatusResponse, PageMeta, PostListResponse, UserListResponse, UserSummary};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::notification::NotificationService;
use super::viewer::ViewerAnnotator;

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn like_post(&self, user_id: Snowflake, post_id: Snowflake) -> ServiceResult<()> {
        let post = self.find_post(post_id).await?;

        let like = Like::new(self.ctx.generate_id(), user_id, post_id);
        self.ctx.like_repo().create(&like).await?;

        info!(user_id = %user_id, post_id = %post_id, "Post liked");

        NotificationService::new(self.ctx)
            .notify_like(user_id, post.author_id, post_id)
            .await;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn unlike_post(&self, user_id: Snowflake, post_id: Snowflake) -> ServiceResult<()> {
        self.find_post(post_id).await?;

        self.ctx.like_repo().delete(user_id, post_id).await?;

        info!(user_id = %user_id, post_id = %post_id, "Post unliked");
        Ok(())
    }

    /// Users who liked a post, newest like first
    #[instrument(skip(self))]
    pub async fn get_post_likes(
        &self,
        post_id: Snowflake,
        page: PageRequest,
    ) -> ServiceResult<UserListResponse> {
        let likers = self.ctx.like_repo().find_likers(post_id, page).await?;
        let meta = PageMeta::new(page, &likers);

        Ok(UserListResponse {
            users: likers.items.into_iter().map(UserSummary::from).collect(),
            page: meta,
        })
    }

    /// Posts a user liked, newest like first, annotated for the viewer
    #[instrument(skip(self))]
    pub async fn get_user_likes(
        &self,
        user_id: Snowflake,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<PostListResponse> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let posts = self.ctx.like_repo().find_liked_posts(user_id, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }

    #[instrument(skip(self))]
    pub async fn is_liked(
        &self,
        user_id: Snowflake,
        post_id: Snowflake,
    ) -> ServiceResult<LikeStatusResponse> {
        let is_liked = self.ctx.like_repo().exists(user_id, post_id).await?;
        Ok(LikeStatusResponse { is_liked })
    }

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        Ok(post)
    }
}
