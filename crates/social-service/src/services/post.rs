//! Post service
//!
//! Creates, reads, edits and deletes posts of every kind. Counter and
//! hashtag maintenance happens inside the repository transaction; the
//! notifications for replies, reposts and quotes are sent after commit.

use social_core::entities::{extract_hashtags, validate_content, Post, PostKind, PostType};
use social_core::{DomainError, PageRequest, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::viewer::ViewerAnnotator;

/// Parse a decimal id taken from a request body.
pub(crate) fn parse_id(raw: &str, field: &str) -> ServiceResult<Snowflake> {
    raw.trim()
        .parse::<Snowflake>()
        .map_err(|_| ServiceError::validation(format!("invalid {field}")))
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post of any kind
    #[instrument(skip(self, request), fields(post_type = %request.post_type))]
    pub async fn create_post(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        validate_content(&request.content)?;

        let post_type = request.post_type.parse::<PostType>()?;
        let original_id = request
            .original_post_id
            .as_deref()
            .map(|raw| parse_id(raw, "original post id"))
            .transpose()?;
        let parent_id = request
            .parent_post_id
            .as_deref()
            .map(|raw| parse_id(raw, "parent post id"))
            .transpose()?;
        let kind = PostKind::from_parts(post_type, original_id, parent_id)?;

        let media_ids = request
            .media_ids
            .iter()
            .map(|raw| parse_id(raw, "media id"))
            .collect::<ServiceResult<Vec<_>>>()?;

        // Author of the referenced post, for the notification sent after commit
        let referenced_author = match kind {
            PostKind::Original => None,
            PostKind::Reply { parent_id } => Some(
                self.ctx
                    .post_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(DomainError::ParentPostNotFound)?
                    .author_id,
            ),
            PostKind::Repost { original_id } | PostKind::Quote { original_id } => Some(
                self.ctx
                    .post_repo()
                    .find_by_id(original_id)
                    .await?
                    .ok_or(DomainError::OriginalPostNotFound)?
                    .author_id,
            ),
        };

        let hashtags = extract_hashtags(&request.content);
        let post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.content,
            kind,
            request.is_draft,
        );

        self.ctx
            .post_repo()
            .create(&post, &hashtags, &media_ids)
            .await?;

        info!(
            post_id = %post.id,
            author_id = %author_id,
            kind = %post.kind.post_type(),
            hashtags = hashtags.len(),
            "Post created"
        );

        if let Some(recipient) = referenced_author {
            let notifications = NotificationService::new(self.ctx);
            match post.kind {
                PostKind::Reply { parent_id } => {
                    notifications
                        .notify_comment(author_id, recipient, parent_id)
                        .await;
                }
                PostKind::Repost { original_id } => {
                    notifications
                        .notify_repost(author_id, recipient, original_id)
                        .await;
                }
                PostKind::Quote { original_id } => {
                    notifications
                        .notify_quote(author_id, recipient, original_id)
                        .await;
                }
                PostKind::Original => {}
            }
        }

        self.get_post(post.id, Some(author_id)).await
    }

    /// Get a post with author, media and viewer flags.
    ///
    /// Drafts are visible to their author only.
    #[instrument(skip(self))]
    pub async fn get_post(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostResponse> {
        let authored = self
            .ctx
            .post_repo()
            .find_with_author(post_id)
            .await?
            .filter(|a| !a.post.is_draft || viewer == Some(a.post.author_id))
            .ok_or(DomainError::PostNotFound(post_id))?;

        ViewerAnnotator::new(self.ctx)
            .annotate_one(authored, viewer)
            .await
    }

    /// A user's non-draft posts, newest first
    #[instrument(skip(self))]
    pub async fn get_user_posts(
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

        let posts = self.ctx.post_repo().find_by_author(user_id, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }

    /// Replace the content of a post; hashtags are re-derived
    #[instrument(skip(self, request))]
    pub async fn update_post(
        &self,
        post_id: Snowflake,
        author_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find_owned(post_id, author_id).await?;

        validate_content(&request.content)?;
        let hashtags = extract_hashtags(&request.content);
        post.set_content(request.content);

        self.ctx.post_repo().update_content(&post, &hashtags).await?;

        info!(post_id = %post_id, "Post updated");

        self.get_post(post_id, Some(author_id)).await
    }

    /// Soft-delete a post and release its counter on the referenced post
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: Snowflake, author_id: Snowflake) -> ServiceResult<()> {
        let post = self.find_owned(post_id, author_id).await?;

        self.ctx.post_repo().soft_delete(&post).await?;

        info!(post_id = %post_id, kind = %post.kind.post_type(), "Post deleted");
        Ok(())
    }

    /// Load a live post and check that `author_id` wrote it
    pub(crate) async fn find_owned(
        &self,
        post_id: Snowflake,
        author_id: Snowflake,
    ) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;

        if !post.is_authored_by(author_id) {
            return Err(DomainError::NotPostAuthor.into());
        }

        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id(" 42 ", "post id").unwrap(), Snowflake::new(42));

        let err = parse_id("abc", "parent post id").unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "invalid parent post id");
    }
}
