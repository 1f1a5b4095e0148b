//! Search handlers
//!
//! Every search endpoint accepts an optional bearer token; `q` is required
//! except for trending hashtags.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path, Query, State},
    http::request::Parts,
    Json,
};
use serde::Deserialize;
use social_service::dto::{
    HashtagListResponse, PostListResponse, SearchResponse, TrendingHashtagsResponse,
    UserListResponse,
};
use social_service::SearchService;

use crate::extractors::{OptionalAuthUser, Pagination};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Default per-request limit of a combined search
const SEARCH_ALL_DEFAULT_LIMIT: i64 = 30;
const SEARCH_ALL_MAX_LIMIT: i64 = 100;

const TRENDING_HASHTAGS_DEFAULT_LIMIT: i64 = 20;
const TRENDING_HASHTAGS_MAX_LIMIT: i64 = 50;

/// Search query string
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

impl SearchQuery {
    fn required(self) -> ApiResult<String> {
        match self.q {
            Some(q) if !q.is_empty() => Ok(q),
            _ => Err(ApiError::invalid_query("search query is required")),
        }
    }
}

/// Required, non-empty `q` query parameter
#[derive(Debug, Clone)]
pub struct SearchTerm(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for SearchTerm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<SearchQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        query.required().map(SearchTerm)
    }
}

/// Users, posts and hashtags in one response
///
/// GET /search
pub async fn search_all(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SearchTerm(q): SearchTerm,
    pagination: Pagination,
) -> ApiResult<Json<SearchResponse>> {
    let limit = pagination.limit_with(SEARCH_ALL_DEFAULT_LIMIT, SEARCH_ALL_MAX_LIMIT);

    let service = SearchService::new(state.service_context());
    let response = service.search_all(&q, viewer.user_id(), limit).await?;
    Ok(Json(response))
}

/// GET /search/users
pub async fn search_users(
    State(state): State<AppState>,
    SearchTerm(q): SearchTerm,
    pagination: Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.search_users(&q, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /search/posts
pub async fn search_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SearchTerm(q): SearchTerm,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service
        .search_posts(&q, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}

/// GET /search/hashtags
pub async fn search_hashtags(
    State(state): State<AppState>,
    SearchTerm(q): SearchTerm,
    pagination: Pagination,
) -> ApiResult<Json<HashtagListResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service.search_hashtags(&q, pagination.page()).await?;
    Ok(Json(response))
}

/// Posts tagged with a hashtag, newest first
///
/// GET /search/hashtags/{hashtag}/posts
pub async fn get_hashtag_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    Path(hashtag): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let service = SearchService::new(state.service_context());
    let response = service
        .get_hashtag_posts(&hashtag, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}

/// GET /search/trending-hashtags
pub async fn get_trending_hashtags(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<TrendingHashtagsResponse>> {
    let limit = pagination.limit_with(TRENDING_HASHTAGS_DEFAULT_LIMIT, TRENDING_HASHTAGS_MAX_LIMIT);
    let service = SearchService::new(state.service_context());
    let response = service.get_trending_hashtags(limit).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_required() {
        let query = SearchQuery {
            q: Some("rust".to_string()),
        };
        assert_eq!(query.required().unwrap(), "rust");

        let err = SearchQuery { q: None }.required().unwrap_err();
        assert_eq!(err.to_string(), "search query is required");

        assert!(SearchQuery {
            q: Some(String::new())
        }
        .required()
        .is_err());
    }
}
