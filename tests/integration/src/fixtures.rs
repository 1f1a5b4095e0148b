//! Test fixtures and data generators
//!
//! Provides reusable request bodies and response shapes for integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
///
/// Mixes in the process start time so reruns against the same database do
/// not collide.
pub fn unique_suffix() -> String {
    let run = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() % 1_000_000_000)
        .unwrap_or_default();
    format!("{run}{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user{suffix}"),
            email: format!("user{suffix}@example.com"),
            password: "password1".to_string(),
            display_name: None,
        }
    }
}

/// Login request; `login` is a username or an email
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

impl LoginRequest {
    pub fn by_username(reg: &RegisterRequest) -> Self {
        Self {
            login: reg.username.clone(),
            password: reg.password.clone(),
        }
    }

    pub fn by_email(reg: &RegisterRequest) -> Self {
        Self {
            login: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Refresh request
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserPublic,
}

/// Public profile
#[derive(Debug, Deserialize)]
pub struct UserPublic {
    pub id: String,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub followers_count: i64,
    pub following_count: i64,
    pub posts_count: i64,
}

/// Compact user entry in lists
#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct FollowersResponse {
    pub followers: Vec<UserSummary>,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct FollowCountsResponse {
    pub followers_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct FollowStatusResponse {
    pub is_following: bool,
}

/// Profile update
#[derive(Debug, Default, Serialize)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

// ============================================================================
// Posts
// ============================================================================

/// Create post request
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media_ids: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_draft: bool,
}

impl CreatePostRequest {
    pub fn original(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            post_type: "original".to_string(),
            original_post_id: None,
            parent_post_id: None,
            media_ids: Vec::new(),
            is_draft: false,
        }
    }

    pub fn reply(content: impl Into<String>, parent_id: &str) -> Self {
        Self {
            post_type: "reply".to_string(),
            parent_post_id: Some(parent_id.to_string()),
            ..Self::original(content)
        }
    }

    pub fn repost(original_id: &str) -> Self {
        Self {
            post_type: "repost".to_string(),
            original_post_id: Some(original_id.to_string()),
            ..Self::original("")
        }
    }

    pub fn quote(content: impl Into<String>, original_id: &str) -> Self {
        Self {
            post_type: "quote".to_string(),
            original_post_id: Some(original_id.to_string()),
            ..Self::original(content)
        }
    }

    pub fn with_media(mut self, media_ids: Vec<String>) -> Self {
        self.media_ids = media_ids;
        self
    }

    pub fn draft(mut self) -> Self {
        self.is_draft = true;
        self
    }
}

/// Content-only body shared by post edits and comments
#[derive(Debug, Serialize)]
pub struct ContentRequest {
    pub content: String,
}

impl ContentRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

/// Post with author and viewer flags
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub original_post_id: Option<String>,
    pub parent_post_id: Option<String>,
    pub likes_count: i64,
    pub reposts_count: i64,
    pub comments_count: i64,
    pub author: UserSummary,
    pub media: Vec<MediaResponse>,
    pub is_liked: bool,
    pub is_reposted: bool,
}

/// Paginated post listing, used by every timeline
#[derive(Debug, Deserialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

impl PostListResponse {
    pub fn contains(&self, post_id: &str) -> bool {
        self.posts.iter().any(|p| p.id == post_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct LikeStatusResponse {
    pub is_liked: bool,
}

// ============================================================================
// Comments
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub user_id: String,
    pub post_id: String,
    pub content: String,
    pub parent_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub total: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReplyListResponse {
    pub replies: Vec<CommentResponse>,
    pub total: i64,
}

// ============================================================================
// Notifications
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub is_read: bool,
    pub actor: UserSummary,
}

#[derive(Debug, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    pub total: i64,
    pub unread_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct HashtagResponse {
    pub name: String,
    pub posts_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub users: Vec<UserSummary>,
    pub posts: Vec<PostResponse>,
    pub hashtags: Vec<HashtagResponse>,
    pub total: i64,
}

// ============================================================================
// Media
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub id: String,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub file_name: String,
    pub file_size: i64,
}

/// Smallest valid PNG: 1x1 transparent pixel
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];
