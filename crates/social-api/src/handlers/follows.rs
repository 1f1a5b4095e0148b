//! Follow handlers
//!
//! Endpoints for the follow graph between users.

use axum::{extract::State, Json};
use social_service::dto::{
    FollowCountsResponse, FollowStatusResponse, FollowersResponse, FollowingResponse,
    MessageResponse, SuggestedUsersResponse,
};
use social_service::FollowService;

use crate::extractors::{AuthUser, IdPath, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Default number of suggested users
const SUGGESTED_DEFAULT_LIMIT: i64 = 10;
/// Maximum number of suggested users
const SUGGESTED_MAX_LIMIT: i64 = 50;

/// Follow a user
///
/// POST /users/{user_id}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = FollowService::new(state.service_context());
    service.follow(auth.user_id, user_id).await?;
    Ok(Json(MessageResponse::new("user followed successfully")))
}

/// Unfollow a user
///
/// DELETE /users/{user_id}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = FollowService::new(state.service_context());
    service.unfollow(auth.user_id, user_id).await?;
    Ok(Json(MessageResponse::new("user unfollowed successfully")))
}

/// GET /users/{user_id}/followers
pub async fn get_followers(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<FollowersResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.get_followers(user_id, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /users/{user_id}/following
pub async fn get_following(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<FollowingResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.get_following(user_id, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /users/{user_id}/follow-counts
pub async fn get_follow_counts(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<FollowCountsResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.get_follow_counts(user_id).await?;
    Ok(Json(response))
}

/// Whether the caller follows a user
///
/// GET /users/{user_id}/follow-status
pub async fn get_follow_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.is_following(auth.user_id, user_id).await?;
    Ok(Json(response))
}

/// Accounts the caller might follow
///
/// GET /users/suggested
pub async fn get_suggested_users(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<SuggestedUsersResponse>> {
    let limit = pagination.limit_with(SUGGESTED_DEFAULT_LIMIT, SUGGESTED_MAX_LIMIT);
    let service = FollowService::new(state.service_context());
    let response = service.get_suggested_users(auth.user_id, limit).await?;
    Ok(Json(response))
}
