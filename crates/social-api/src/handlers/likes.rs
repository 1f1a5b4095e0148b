//! Like handlers

use axum::{extract::State, Json};
use social_service::dto::{LikeStatusResponse, MessageResponse, UserListResponse};
use social_service::LikeService;

use crate::extractors::{AuthUser, IdPath, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /posts/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = LikeService::new(state.service_context());
    service.like_post(auth.user_id, post_id).await?;
    Ok(Json(MessageResponse::new("post liked successfully")))
}

/// DELETE /posts/{post_id}/like
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = LikeService::new(state.service_context());
    service.unlike_post(auth.user_id, post_id).await?;
    Ok(Json(MessageResponse::new("post unliked successfully")))
}

/// Users who liked a post, newest like first
///
/// GET /posts/{post_id}/likes
pub async fn get_post_likes(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let service = LikeService::new(state.service_context());
    let response = service.get_post_likes(post_id, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /posts/{post_id}/like-status
pub async fn get_like_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = LikeService::new(state.service_context());
    let response = service.is_liked(auth.user_id, post_id).await?;
    Ok(Json(response))
}
