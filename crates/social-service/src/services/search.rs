//! Search service
//!
//! Case-insensitive substring search over users, posts and hashtags.

use chrono::{Duration, Utc};
use social_core::entities::normalize_hashtag;
use social_core::{PageRequest, Snowflake};
use tracing::instrument;

use crate::dto::{
    HashtagListResponse, HashtagResponse, PageMeta, PostListResponse, SearchResponse,
    TrendingHashtagsResponse, UserListResponse, UserSummary,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::timeline::TRENDING_WINDOW_DAYS;
use super::viewer::ViewerAnnotator;

/// Smallest per-category page in a combined search
const MIN_CATEGORY_LIMIT: i64 = 3;

/// Trimmed, lowercased query; empty queries are rejected
fn normalize_query(query: &str) -> ServiceResult<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(ServiceError::validation("search query is required"));
    }
    Ok(query)
}

/// Per-category limit for `search_all`
fn category_limit(limit: i64) -> i64 {
    (limit / 3).max(MIN_CATEGORY_LIMIT)
}

/// Search service
pub struct SearchService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SearchService<'a> {
    /// Create a new SearchService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn search_users(
        &self,
        query: &str,
        page: PageRequest,
    ) -> ServiceResult<UserListResponse> {
        let query = normalize_query(query)?;
        let users = self.ctx.search_repo().search_users(&query, page).await?;
        let meta = PageMeta::new(page, &users);

        Ok(UserListResponse {
            users: users.items.into_iter().map(UserSummary::from).collect(),
            page: meta,
        })
    }

    #[instrument(skip(self))]
    pub async fn search_posts(
        &self,
        query: &str,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<PostListResponse> {
        let query = normalize_query(query)?;
        let posts = self.ctx.search_repo().search_posts(&query, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }

    #[instrument(skip(self))]
    pub async fn search_hashtags(
        &self,
        query: &str,
        page: PageRequest,
    ) -> ServiceResult<HashtagListResponse> {
        let query = normalize_query(&normalize_hashtag(query))?;
        let hashtags = self.ctx.search_repo().search_hashtags(&query, page).await?;
        let meta = PageMeta::new(page, &hashtags);

        Ok(HashtagListResponse {
            hashtags: hashtags.items.into_iter().map(HashtagResponse::from).collect(),
            page: meta,
        })
    }

    /// Users, posts and hashtags at once; `total` is the number of items returned
    #[instrument(skip(self))]
    pub async fn search_all(
        &self,
        query: &str,
        viewer: Option<Snowflake>,
        limit: i64,
    ) -> ServiceResult<SearchResponse> {
        if query.trim().is_empty() {
            return Ok(SearchResponse::default());
        }

        let page = PageRequest {
            limit: category_limit(limit),
            offset: 0,
        };

        let users = self.search_users(query, page).await?;
        let posts = self.search_posts(query, viewer, page).await?;
        let hashtags = match self.search_hashtags(query, page).await {
            Ok(found) => found,
            // A bare "#" is a valid query for users and posts but names no hashtag
            Err(ServiceError::Validation(_)) => HashtagListResponse {
                hashtags: Vec::new(),
                page: PageMeta {
                    limit: page.limit,
                    offset: 0,
                    total: 0,
                },
            },
            Err(e) => return Err(e),
        };

        Ok(SearchResponse::new(users.users, posts.posts, hashtags.hashtags))
    }

    /// Listed posts carrying a hashtag; an unknown tag yields an empty page
    #[instrument(skip(self))]
    pub async fn get_hashtag_posts(
        &self,
        tag: &str,
        viewer: Option<Snowflake>,
        page: PageRequest,
    ) -> ServiceResult<PostListResponse> {
        let name = normalize_hashtag(tag);
        let Some(hashtag) = self.ctx.search_repo().find_hashtag(&name).await? else {
            return Ok(PostListResponse {
                posts: Vec::new(),
                page: PageMeta {
                    limit: page.limit,
                    offset: page.offset,
                    total: 0,
                },
            });
        };

        let posts = self.ctx.search_repo().hashtag_posts(hashtag.id, page).await?;
        ViewerAnnotator::new(self.ctx)
            .annotate_page(posts, page, viewer)
            .await
    }

    /// Hashtags ranked by use in the trailing week
    #[instrument(skip(self))]
    pub async fn get_trending_hashtags(&self, limit: i64) -> ServiceResult<TrendingHashtagsResponse> {
        let since = Utc::now() - Duration::days(TRENDING_WINDOW_DAYS);
        let hashtags = self.ctx.search_repo().trending_hashtags(since, limit).await?;

        Ok(TrendingHashtagsResponse {
            hashtags: hashtags.into_iter().map(HashtagResponse::from).collect(),
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_limit() {
        assert_eq!(category_limit(30), 10);
        assert_eq!(category_limit(100), 33);
        assert_eq!(category_limit(5), 3);
        assert_eq!(category_limit(1), 3);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Alice ").unwrap(), "alice");
        assert!(normalize_query("   ").is_err());
        assert_eq!(
            normalize_query(&normalize_hashtag("#RustLang")).unwrap(),
            "rustlang"
        );
    }
}
