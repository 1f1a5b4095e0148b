//! Comment handlers
//!
//! Comments are reply posts; these endpoints present them in comment form.

use axum::{extract::State, Json};
use social_service::dto::{
    CommentListResponse, CommentResponse, CreateCommentRequest, MessageResponse,
    ReplyListResponse,
};
use social_service::CommentService;

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Comment on a post
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.create_comment(auth.user_id, post_id, request).await?;
    Ok(Created(Json(response)))
}

/// Comments on a post, oldest first
///
/// GET /posts/{post_id}/comments
pub async fn get_comments(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(post_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<CommentListResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .get_comments(post_id, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}

/// PUT /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(comment_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id, auth.user_id).await?;
    Ok(Json(MessageResponse::new("comment deleted successfully")))
}

/// Reply to a comment
///
/// POST /comments/{comment_id}/replies
pub async fn create_reply(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let response = service.create_reply(auth.user_id, comment_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /comments/{comment_id}/replies
pub async fn get_replies(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(comment_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<ReplyListResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service
        .get_replies(comment_id, viewer.user_id(), pagination.page())
        .await?;
    Ok(Json(response))
}
