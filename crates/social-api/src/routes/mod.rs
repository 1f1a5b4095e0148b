//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{
    auth, comments, follows, health, likes, media, notifications, posts, search, timeline, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Uploaded files served from `upload_dir`
pub fn upload_routes(upload_dir: &str) -> Router<AppState> {
    Router::new().nest_service("/uploads", ServeDir::new(upload_dir))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(timeline_routes())
        .merge(search_routes())
        .merge(notification_routes())
        .merge(media_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// User and follow routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/suggested", get(follows::get_suggested_users))
        .route("/users/profile", put(users::update_profile))
        .route("/users/username/:username", get(users::get_user_by_username))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/posts", get(users::get_user_posts))
        .route("/users/:user_id/likes", get(users::get_user_likes))
        .route(
            "/users/:user_id/follow",
            post(follows::follow_user).delete(follows::unfollow_user),
        )
        .route("/users/:user_id/followers", get(follows::get_followers))
        .route("/users/:user_id/following", get(follows::get_following))
        .route("/users/:user_id/follow-counts", get(follows::get_follow_counts))
        .route("/users/:user_id/follow-status", get(follows::get_follow_status))
}

/// Post, like and comment-on-post routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:post_id/replies", get(posts::get_post_replies))
        .route(
            "/posts/:post_id/like",
            post(likes::like_post).delete(likes::unlike_post),
        )
        .route("/posts/:post_id/likes", get(likes::get_post_likes))
        .route("/posts/:post_id/like-status", get(likes::get_like_status))
        .route(
            "/posts/:post_id/comments",
            post(comments::create_comment).get(comments::get_comments),
        )
}

/// Comment routes
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:comment_id",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route(
            "/comments/:comment_id/replies",
            post(comments::create_reply).get(comments::get_replies),
        )
}

/// Timeline routes
fn timeline_routes() -> Router<AppState> {
    Router::new()
        .route("/timeline/home", get(timeline::home))
        .route("/timeline/explore", get(timeline::explore))
        .route("/timeline/trending", get(timeline::trending))
}

/// Search routes
fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search_all))
        .route("/search/users", get(search::search_users))
        .route("/search/posts", get(search::search_posts))
        .route("/search/hashtags", get(search::search_hashtags))
        .route("/search/hashtags/:hashtag/posts", get(search::get_hashtag_posts))
        .route("/search/trending-hashtags", get(search::get_trending_hashtags))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::get_notifications))
        .route("/notifications/unread-count", get(notifications::get_unread_count))
        .route("/notifications/read-all", put(notifications::mark_all_as_read))
        .route(
            "/notifications/all",
            delete(notifications::delete_all_notifications),
        )
        .route("/notifications/:notification_id/read", put(notifications::mark_as_read))
        .route(
            "/notifications/:notification_id",
            delete(notifications::delete_notification),
        )
}

/// Media routes
fn media_routes() -> Router<AppState> {
    Router::new()
        .route("/media/upload", post(media::upload))
        .route("/media/upload-multiple", post(media::upload_multiple))
        .route("/media/post/:post_id", get(media::get_post_media))
        .route(
            "/media/:media_id",
            get(media::get_media).delete(media::delete_media),
        )
}
