//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.
//! Conversions that need data beyond the entity (counts, viewer flags)
//! are constructor functions instead.

use social_core::entities::{
    AuthoredPost, HashtagCount, Media, NotificationDetail, Post, User, UserStats,
};
use social_core::{Page, PageRequest, Snowflake};

use super::responses::{
    CommentResponse, HashtagResponse, MediaResponse, NotificationResponse, PageMeta,
    PostResponse, PostSummary, UploadResponse, UserPublic, UserSummary,
};

// ============================================================================
// Pagination
// ============================================================================

impl PageMeta {
    pub fn new<T>(request: PageRequest, page: &Page<T>) -> Self {
        Self {
            limit: request.limit,
            offset: request.offset,
            total: page.total,
        }
    }
}

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            profile_image_url: user.profile_image_url.clone(),
            is_verified: user.is_verified,
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl UserPublic {
    pub fn new(user: &User, stats: UserStats) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            profile_image_url: user.profile_image_url.clone(),
            cover_image_url: user.cover_image_url.clone(),
            location: user.location.clone(),
            website: user.website.clone(),
            is_verified: user.is_verified,
            created_at: user.created_at,
            followers_count: stats.followers_count,
            following_count: stats.following_count,
            posts_count: stats.posts_count,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl PostResponse {
    /// Assemble a post with its media and the viewer's flags
    pub fn new(
        authored: AuthoredPost,
        media: Vec<MediaResponse>,
        is_liked: bool,
        is_reposted: bool,
    ) -> Self {
        let AuthoredPost { post, author } = authored;
        Self {
            id: post.id,
            author_id: post.author_id,
            post_type: post.kind.post_type().as_str().to_string(),
            original_post_id: post.kind.original_id(),
            parent_post_id: post.kind.parent_id(),
            content: post.content,
            is_public: post.is_public,
            is_draft: post.is_draft,
            likes_count: post.likes_count,
            reposts_count: post.reposts_count,
            comments_count: post.comments_count,
            views_count: post.views_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            author: UserSummary::from(author),
            media,
            is_liked,
            is_reposted,
        }
    }
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            content: post.content.clone(),
            post_type: post.kind.post_type().as_str().to_string(),
            created_at: post.created_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl CommentResponse {
    /// Present an annotated reply post as a comment.
    ///
    /// `post_id` is the post the thread hangs off; `parent_id` is set only
    /// when the reply answers another comment.
    pub fn from_post(
        post: PostResponse,
        post_id: Snowflake,
        parent_id: Option<Snowflake>,
    ) -> Self {
        Self {
            id: post.id,
            user_id: post.author_id,
            post_id,
            content: post.content,
            parent_id,
            likes_count: post.likes_count,
            replies_count: post.comments_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
            user: post.author,
            is_liked: post.is_liked,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<NotificationDetail> for NotificationResponse {
    fn from(detail: NotificationDetail) -> Self {
        let NotificationDetail {
            notification,
            actor,
            post,
        } = detail;
        Self {
            id: notification.id,
            notification_type: notification.notification_type.as_str().to_string(),
            message: notification.message,
            is_read: notification.is_read,
            actor: UserSummary::from(actor),
            post: post.as_ref().map(PostSummary::from),
            created_at: notification.created_at,
        }
    }
}

// ============================================================================
// Media Mappers
// ============================================================================

impl From<&Media> for MediaResponse {
    fn from(media: &Media) -> Self {
        Self {
            id: media.id,
            media_type: media.media_type.as_str().to_string(),
            url: media.url.clone(),
            thumbnail_url: media.thumbnail_url.clone(),
            file_name: media.file_name.clone(),
            file_size: media.file_size,
            width: media.width,
            height: media.height,
            duration: media.duration,
            post_id: media.post_id,
            sort_order: media.sort_order,
            created_at: media.created_at,
        }
    }
}

impl From<Media> for MediaResponse {
    fn from(media: Media) -> Self {
        Self::from(&media)
    }
}

impl From<&Media> for UploadResponse {
    fn from(media: &Media) -> Self {
        Self {
            id: media.id,
            url: media.url.clone(),
            thumbnail_url: media.thumbnail_url.clone(),
            media_type: media.media_type.as_str().to_string(),
            file_name: media.file_name.clone(),
            file_size: media.file_size,
            width: media.width,
            height: media.height,
            duration: media.duration,
        }
    }
}

// ============================================================================
// Hashtag Mappers
// ============================================================================

impl From<HashtagCount> for HashtagResponse {
    fn from(count: HashtagCount) -> Self {
        Self {
            id: count.hashtag.id,
            name: count.hashtag.name,
            posts_count: count.posts_count,
            created_at: count.hashtag.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use social_core::{MediaType, PostKind};

    fn user() -> User {
        User::new(
            Snowflake::new(1),
            "alice".to_string(),
            "alice@x.com".to_string(),
            None,
        )
    }

    #[test]
    fn test_post_response_carries_kind() {
        let post = Post::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "nice".to_string(),
            PostKind::Quote {
                original_id: Snowflake::new(5),
            },
            false,
        );
        let resp = PostResponse::new(
            AuthoredPost {
                post,
                author: user(),
            },
            Vec::new(),
            true,
            false,
        );

        assert_eq!(resp.post_type, "quote");
        assert_eq!(resp.original_post_id, Some(Snowflake::new(5)));
        assert_eq!(resp.parent_post_id, None);
        assert!(resp.is_liked);
        assert_eq!(resp.author.display_name, "alice");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "quote");
        assert!(json.get("parent_post_id").is_none());
    }

    #[test]
    fn test_comment_from_reply() {
        let post = Post::new(
            Snowflake::new(11),
            Snowflake::new(1),
            "reply".to_string(),
            PostKind::Reply {
                parent_id: Snowflake::new(10),
            },
            false,
        );
        let annotated = PostResponse::new(
            AuthoredPost {
                post,
                author: user(),
            },
            Vec::new(),
            false,
            false,
        );
        let comment =
            CommentResponse::from_post(annotated, Snowflake::new(3), Some(Snowflake::new(10)));

        assert_eq!(comment.post_id, Snowflake::new(3));
        assert_eq!(comment.parent_id, Some(Snowflake::new(10)));
        assert_eq!(comment.user_id, Snowflake::new(1));
    }

    #[test]
    fn test_upload_response() {
        let media = Media::new(
            Snowflake::new(2),
            Snowflake::new(1),
            MediaType::Gif,
            "http://localhost:8080/uploads/images/a.gif".to_string(),
            "cat.gif".to_string(),
            1024,
        );
        let resp = UploadResponse::from(&media);
        assert_eq!(resp.media_type, "gif");
        assert_eq!(resp.file_name, "cat.gif");

        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("width").is_none());
    }
}
