//! Timeline service

use chrono::{Duration, Utc};
use social_core::{PageRequest, Snowflake};
use tracing::instrument;

use crate::dto::TimelineResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::viewer::ViewerAnnotator;

/// Window for trending posts and hashtags
pub const TRENDING_WINDOW_DAYS: i64 = 7;

/// Timeline service
pub struct TimelineService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimelineService<'a> {
    /// Create a new TimelineService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Posts by the caller and the users they follow, newest first
    #[instrument(skip(self))]
    pub async fn home(&self, user_id: Snowflake, page: PageRequest) -> ServiceResult<TimelineResponse> {
        let posts = self.ctx.timeline_repo().home(user_id, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, Some(user_id))
            .await
    }

    /// Every listed post, newest first
    #[instrument(skip(self))]
    pub async fn explore(
        &self,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<TimelineResponse> {
        let posts = self.ctx.timeline_repo().explore(page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }

    /// Recent posts ranked by likes, reposts and comments combined
    #[instrument(skip(self))]
    pub async fn trending(
        &self,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<TimelineResponse> {
        let since = Utc::now() - Duration::days(TRENDING_WINDOW_DAYS);
        let posts = self.ctx.timeline_repo().trending(since, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }

    /// Direct replies to a post, oldest first
    #[instrument(skip(self))]
    pub async fn post_replies(
        &self,
        post_id: Snowflake,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<TimelineResponse> {
        let posts = self.ctx.timeline_repo().replies(post_id, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }
}
