//! User handlers
//!
//! Endpoints for profiles and a user's posts and likes.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{PostListResponse, UpdateProfileRequest, UserPublic};
use social_service::{LikeService, PostService, UserService};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get user by ID (public profile)
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserPublic>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// Get user by username
///
/// GET /users/username/{username}
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<UserPublic>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user_by_username(&username).await?;
    Ok(Json(response))
}

/// Update the caller's profile
///
/// PUT /users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserPublic>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// A user's posts, newest first
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let service = PostService::new(state.service_context());
    let response = service
        .get_user_posts(user_id, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}

/// Posts a user has liked, newest like first
///
/// GET /users/{user_id}/likes
pub async fn get_user_likes(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(user_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let service = LikeService::new(state.service_context());
    let response = service
        .get_user_likes(user_id, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}
