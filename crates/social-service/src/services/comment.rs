//! Comment service
//!
//! Comments are reply posts. A top-level comment's parent is the post it
//! comments on; a nested reply's parent is another comment.

use social_core::entities::Post;
use social_core::{DomainError, PageRequest, Snowflake};
use tracing::instrument;

use crate::dto::{
    CommentListResponse, CommentResponse, CreateCommentRequest, CreatePostRequest, PageMeta,
    PostResponse, ReplyListResponse, UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;
use super::viewer::ViewerAnnotator;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post
    #[instrument(skip(self, request))]
    pub async fn create_comment(
        &self,
        author_id: Snowflake,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        let created = PostService::new(self.ctx)
            .create_post(
                author_id,
                CreatePostRequest::reply(request.content, post_id.to_string()),
            )
            .await?;

        Ok(CommentResponse::from_post(created, post_id, None))
    }

    /// Reply to an existing comment
    #[instrument(skip(self, request))]
    pub async fn create_reply(
        &self,
        author_id: Snowflake,
        comment_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let comment = self.find_comment(comment_id).await?;
        let thread_post = comment.kind.parent_id().unwrap_or(comment_id);

        let created = PostService::new(self.ctx)
            .create_post(
                author_id,
                CreatePostRequest::reply(request.content, comment_id.to_string()),
            )
            .await?;

        Ok(CommentResponse::from_post(
            created,
            thread_post,
            Some(comment_id),
        ))
    }

    /// Comments on a post, oldest first
    #[instrument(skip(self))]
    pub async fn get_comments(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<CommentListResponse> {
        let replies = self.ctx.timeline_repo().replies(post_id, page).await?;
        let meta = PageMeta::new(page, &replies);
        let posts = ViewerAnnotator::new(self.ctx)
            .annotate(replies.items, viewer)
            .await?;

        Ok(CommentListResponse {
            comments: posts
                .into_iter()
                .map(|p| CommentResponse::from_post(p, post_id, None))
                .collect(),
            page: meta,
        })
    }

    /// Replies to a comment, oldest first
    #[instrument(skip(self))]
    pub async fn get_replies(
        &self,
        comment_id: Snowflake,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<ReplyListResponse> {
        let comment = self.find_comment(comment_id).await?;
        let thread_post = comment.kind.parent_id().unwrap_or(comment_id);

        let replies = self.ctx.timeline_repo().replies(comment_id, page).await?;
        let meta = PageMeta::new(page, &replies);
        let posts = ViewerAnnotator::new(self.ctx)
            .annotate(replies.items, viewer)
            .await?;

        Ok(ReplyListResponse {
            replies: posts
                .into_iter()
                .map(|p| CommentResponse::from_post(p, thread_post, Some(comment_id)))
                .collect(),
            page: meta,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let comment = self.find_comment(comment_id).await?;

        let updated = PostService::new(self.ctx)
            .update_post(
                comment_id,
                author_id,
                UpdatePostRequest {
                    content: request.content,
                },
            )
            .await?;

        let parent = comment.kind.parent_id().unwrap_or(comment_id);
        self.present(updated, parent).await
    }

    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        comment_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<()> {
        self.find_comment(comment_id).await?;
        PostService::new(self.ctx)
            .delete_post(comment_id, author_id)
            .await
    }

    /// A live reply post, or `CommentNotFound`
    async fn find_comment(&self, comment_id: Snowflake) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(comment_id)
            .await?
            .filter(|p| p.kind.is_reply())
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        Ok(post)
    }

    /// Shape a reply as a comment, resolving whether its parent is itself a comment
    async fn present(
        &self,
        post: PostResponse,
        parent_id: Snowflake,
    ) -> ServiceResult<CommentResponse> {
        let parent = self.ctx.post_repo().find_by_id(parent_id).await?;
        Ok(match parent.and_then(|p| p.kind.parent_id()) {
            Some(thread_post) => CommentResponse::from_post(post, thread_post, Some(parent_id)),
            None => CommentResponse::from_post(post, parent_id, None),
        })
    }
}
