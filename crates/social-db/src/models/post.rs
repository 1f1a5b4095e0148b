//! Post and hashtag database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub post_type: String,
    pub is_public: bool,
    pub is_draft: bool,
    pub original_post_id: Option<i64>,
    pub parent_post_id: Option<i64>,
    pub likes_count: i32,
    pub reposts_count: i32,
    pub comments_count: i32,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post row joined with its author's columns (prefixed `author_`)
#[derive(Debug, Clone, FromRow)]
pub struct AuthoredPostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub post_type: String,
    pub is_public: bool,
    pub is_draft: bool,
    pub original_post_id: Option<i64>,
    pub parent_post_id: Option<i64>,
    pub likes_count: i32,
    pub reposts_count: i32,
    pub comments_count: i32,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_username: String,
    pub author_email: String,
    pub author_display_name: String,
    pub author_bio: Option<String>,
    pub author_profile_image_url: Option<String>,
    pub author_cover_image_url: Option<String>,
    pub author_location: Option<String>,
    pub author_website: Option<String>,
    pub author_is_verified: bool,
    pub author_is_active: bool,
    pub author_created_at: DateTime<Utc>,
    pub author_updated_at: DateTime<Utc>,
}

/// Row of the hashtags table
#[derive(Debug, Clone, FromRow)]
pub struct HashtagModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Hashtag with an aggregated post count
#[derive(Debug, Clone, FromRow)]
pub struct HashtagCountModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub posts_count: i64,
}
