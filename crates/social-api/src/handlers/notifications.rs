//! Notification handlers
//!
//! The caller's inbox. Every endpoint requires authentication.

use axum::{extract::State, Json};
use social_service::dto::{
    DeletedCountResponse, MessageResponse, NotificationListResponse, UnreadCountResponse,
    UpdatedCountResponse,
};
use social_service::NotificationService;

use crate::extractors::{AuthUser, IdPath, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Newest first, with the unread count
///
/// GET /notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service
        .get_notifications(auth.user_id, pagination.page())
        .await?;
    Ok(Json(response))
}

/// GET /notifications/unread-count
pub async fn get_unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.get_unread_count(auth.user_id).await?;
    Ok(Json(response))
}

/// PUT /notifications/{notification_id}/read
pub async fn mark_as_read(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = NotificationService::new(state.service_context());
    service.mark_as_read(auth.user_id, notification_id).await?;
    Ok(Json(MessageResponse::new("notification marked as read")))
}

/// PUT /notifications/read-all
pub async fn mark_all_as_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UpdatedCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.mark_all_as_read(auth.user_id).await?;
    Ok(Json(response))
}

/// DELETE /notifications/{notification_id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = NotificationService::new(state.service_context());
    service
        .delete_notification(auth.user_id, notification_id)
        .await?;
    Ok(Json(MessageResponse::new("notification deleted")))
}

/// DELETE /notifications/all
pub async fn delete_all_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DeletedCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.delete_all_notifications(auth.user_id).await?;
    Ok(Json(response))
}
