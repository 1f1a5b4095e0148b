//! Notification and media database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub user_id: i64,
    pub actor_id: i64,
    pub notification_type: String,
    pub post_id: Option<i64>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Row of the media table
#[derive(Debug, Clone, FromRow)]
pub struct MediaModel {
    pub id: i64,
    pub uploader_id: i64,
    pub post_id: Option<i64>,
    pub media_type: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<i32>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}
