//! Post handlers
//!
//! Endpoints for creating, reading, editing and deleting posts of every kind.

use axum::{extract::State, Json};
use social_service::dto::{
    CreatePostRequest, MessageResponse, PostResponse, TimelineResponse, UpdatePostRequest,
};
use social_service::{PostService, TimelineService};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Create a post (original, reply, repost or quote)
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create_post(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get post by ID
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.get_post(post_id, viewer.user_id()).await?;
    Ok(Json(response))
}

/// Edit a post's content
///
/// PUT /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.update_post(post_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    service.delete_post(post_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("post deleted successfully")))
}

/// Direct replies, oldest first
///
/// GET /posts/{post_id}/replies
pub async fn get_post_replies(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<TimelineResponse>> {
    let service = TimelineService::new(state.service_context());
    let response = service
        .post_replies(post_id, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}
