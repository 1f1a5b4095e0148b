//! Viewer annotation for post lists
//!
//! A page of posts is decorated with its media and with the caller's
//! `is_liked` / `is_reposted` flags using one batched query per concern.

use std::collections::{HashMap, HashSet};

use social_core::entities::AuthoredPost;
use social_core::{Page, PageRequest, Snowflake};
use tracing::instrument;

use crate::dto::{MediaResponse, PageMeta, PostListResponse, PostResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub(crate) struct ViewerAnnotator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewerAnnotator<'a> {
    pub(crate) fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, posts), fields(count = posts.len()))]
    pub(crate) async fn annotate(
        &self,
        posts: Vec<AuthoredPost>,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<Vec<PostResponse>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Snowflake> = posts.iter().map(|p| p.post.id).collect();

        let (liked, reposted) = match viewer {
            Some(user_id) => (
                self.ctx.like_repo().liked_post_ids(user_id, &ids).await?,
                self.ctx.post_repo().reposted_post_ids(user_id, &ids).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        let mut media: HashMap<Snowflake, Vec<MediaResponse>> = HashMap::new();
        for item in self.ctx.media_repo().find_by_posts(&ids).await? {
            if let Some(post_id) = item.post_id {
                media.entry(post_id).or_default().push(MediaResponse::from(item));
            }
        }

        Ok(posts
            .into_iter()
            .map(|authored| {
                let id = authored.post.id;
                PostResponse::new(
                    authored,
                    media.remove(&id).unwrap_or_default(),
                    liked.contains(&id),
                    reposted.contains(&id),
                )
            })
            .collect())
    }

    pub(crate) async fn annotate_one(
        &self,
        post: AuthoredPost,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostResponse> {
        let mut annotated = self.annotate(vec![post], viewer).await?;
        annotated
            .pop()
            .ok_or_else(|| ServiceError::internal("annotation dropped the post"))
    }

    pub(crate) async fn annotate_page(
        &self,
        page: Page<AuthoredPost>,
        request: PageRequest,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<PostListResponse> {
        let meta = PageMeta::new(request, &page);
        let posts = self.annotate(page.items, viewer).await?;
        Ok(PostListResponse { posts, page: meta })
    }
}
