//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;
use social_core::Snowflake;

// ============================================================================
// Common Response Types
// ============================================================================

/// Offset pagination metadata, flattened into list responses
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PageMeta {
    pub limit: i64,
    pub offset: i64,
    pub total: i64,
}

/// Plain confirmation message
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserPublic,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserPublic,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// Public profile with follower, following and post counts
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: Snowflake,
    pub username: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub followers_count: i64,
    pub following_count: i64,
    pub posts_count: i64,
}

/// Compact user embedded in posts, lists and notifications
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Snowflake,
    pub username: String,
    pub display_name: String,
    pub profile_image_url: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
    #[serde(flatten)]
    pub page: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct FollowersResponse {
    pub followers: Vec<UserSummary>,
    #[serde(flatten)]
    pub page: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct FollowingResponse {
    pub following: Vec<UserSummary>,
    #[serde(flatten)]
    pub page: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct SuggestedUsersResponse {
    pub users: Vec<UserSummary>,
    pub limit: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FollowCountsResponse {
    pub followers_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FollowStatusResponse {
    pub is_following: bool,
}

// ============================================================================
// Post Responses
// ============================================================================

/// Post with author, media and the viewer's like/repost flags
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub is_public: bool,
    pub is_draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_post_id: Option<Snowflake>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_post_id: Option<Snowflake>,
    pub likes_count: i32,
    pub reposts_count: i32,
    pub comments_count: i32,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author: UserSummary,
    pub media: Vec<MediaResponse>,
    pub is_liked: bool,
    pub is_reposted: bool,
}

/// Post without author or viewer flags, embedded in notifications
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_at: DateTime<Utc>,
}

/// Paginated posts; used by timelines, search and profile feeds
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
}

pub type TimelineResponse = PostListResponse;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeStatusResponse {
    pub is_liked: bool,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// A reply post presented as a comment
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Snowflake,
    pub user_id: Snowflake,
    /// The post this comment ultimately belongs to
    pub post_id: Snowflake,
    pub content: String,
    /// The comment this one answers, for nested replies
    pub parent_id: Option<Snowflake>,
    pub likes_count: i32,
    pub replies_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: UserSummary,
    pub is_liked: bool,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct ReplyListResponse {
    pub replies: Vec<CommentResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub notification_type: String,
    pub message: String,
    pub is_read: bool,
    pub actor: UserSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<PostSummary>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<NotificationResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
    pub unread_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct UpdatedCountResponse {
    pub updated: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeletedCountResponse {
    pub deleted: u64,
}

// ============================================================================
// Media Responses
// ============================================================================

/// Stored media row
#[derive(Debug, Clone, Serialize)]
pub struct MediaResponse {
    pub id: Snowflake,
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    pub post_id: Option<Snowflake>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Result of a single upload
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub id: Snowflake,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "type")]
    pub media_type: String,
    pub file_name: String,
    pub file_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct MultiUploadResponse {
    pub uploaded_files: Vec<UploadResponse>,
    pub total_uploaded: usize,
    pub total_files: usize,
}

#[derive(Debug, Serialize)]
pub struct PostMediaResponse {
    pub media: Vec<MediaResponse>,
}

// ============================================================================
// Search Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HashtagResponse {
    pub id: Snowflake,
    pub name: String,
    pub posts_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HashtagListResponse {
    pub hashtags: Vec<HashtagResponse>,
    #[serde(flatten)]
    pub page: PageMeta,
}

#[derive(Debug, Serialize)]
pub struct TrendingHashtagsResponse {
    pub hashtags: Vec<HashtagResponse>,
    pub limit: i64,
}

/// Combined search across users, posts and hashtags
#[derive(Debug, Default, Serialize)]
pub struct SearchResponse {
    pub users: Vec<UserSummary>,
    pub posts: Vec<PostResponse>,
    pub hashtags: Vec<HashtagResponse>,
    pub total: i64,
}

impl SearchResponse {
    /// `total` counts the items actually returned
    pub fn new(
        users: Vec<UserSummary>,
        posts: Vec<PostResponse>,
        hashtags: Vec<HashtagResponse>,
    ) -> Self {
        let total = (users.len() + posts.len() + hashtags.len()) as i64;
        Self {
            users,
            posts,
            hashtags,
            total,
        }
    }
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_token_type() {
        let user = UserPublic {
            id: Snowflake::new(7),
            username: "alice".to_string(),
            display_name: "alice".to_string(),
            bio: None,
            profile_image_url: None,
            cover_image_url: None,
            location: None,
            website: None,
            is_verified: false,
            created_at: Utc::now(),
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
        };
        let resp = AuthResponse::new("a".into(), "r".into(), 86400, user);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["user"]["id"], "7");
    }

    #[test]
    fn test_list_flattens_page_meta() {
        let resp = UserListResponse {
            users: Vec::new(),
            page: PageMeta {
                limit: 20,
                offset: 40,
                total: 3,
            },
        };
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["limit"], 20);
        assert_eq!(json["offset"], 40);
        assert_eq!(json["total"], 3);
        assert!(json["users"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_search_total_counts_returned_items() {
        let tag = |id: i64, name: &str| HashtagResponse {
            id: Snowflake::new(id),
            name: name.to_string(),
            posts_count: 40,
            created_at: Utc::now(),
        };
        let user = UserSummary {
            id: Snowflake::new(1),
            username: "rustacean".to_string(),
            display_name: "rustacean".to_string(),
            profile_image_url: None,
            is_verified: false,
        };

        let resp = SearchResponse::new(
            vec![user],
            Vec::new(),
            vec![tag(2, "rust"), tag(3, "rustlang")],
        );
        assert_eq!(resp.total, 3);
        assert_eq!(SearchResponse::default().total, 0);
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.database, "healthy");

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
