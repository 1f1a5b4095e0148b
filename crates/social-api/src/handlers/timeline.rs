//! Timeline handlers

use axum::{extract::State, Json};
use social_service::dto::TimelineResponse;
use social_service::TimelineService;

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// Posts from followed users and the caller
///
/// GET /timeline/home
pub async fn home(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<TimelineResponse>> {
    let service = TimelineService::new(state.service_context());
    let response = service.home(auth.user_id, pagination.page()).await?;
    Ok(Json(response))
}

/// GET /timeline/explore
pub async fn explore(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<TimelineResponse>> {
    let service = TimelineService::new(state.service_context());
    let response = service.explore(viewer.user_id(), pagination.page()).await?;
    Ok(Json(response))
}

/// Most engaged posts of the week
///
/// GET /timeline/trending
pub async fn trending(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<TimelineResponse>> {
    let service = TimelineService::new(state.service_context());
    let response = service.trending(viewer.user_id(), pagination.page()).await?;
    Ok(Json(response))
}
