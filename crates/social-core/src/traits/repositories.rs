//! Repository traits - persistence ports implemented by the database layer
//!
//! Every mutation that must keep a denormalized counter in step with detail
//! rows (likes, reposts, replies) is a single repository call so that the
//! implementation can run it inside one transaction.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AuthoredPost, Follow, FollowCounts, Hashtag, HashtagCount, Like, Media, Notification,
    NotificationDetail, Post, User, UserStats,
};
use crate::error::DomainError;
use crate::value_objects::{Page, PageRequest, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Find user by username or email, whichever matches
    async fn find_by_login(&self, login: &str) -> RepoResult<Option<User>>;

    /// Check whether a username is taken
    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Check whether an email is taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a user; duplicate username or email map to conflict errors
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Persist profile fields
    async fn update_profile(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Follower, following and post totals
    async fn get_stats(&self, id: Snowflake) -> RepoResult<UserStats>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post, link its hashtags, attach unattached media in order and
    /// bump the parent's comment counter or the original's repost counter.
    async fn create(
        &self,
        post: &Post,
        hashtags: &[String],
        media_ids: &[Snowflake],
    ) -> RepoResult<()>;

    /// Find a live post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Find a live post with its author
    async fn find_with_author(&self, id: Snowflake) -> RepoResult<Option<AuthoredPost>>;

    /// Replace content and hashtag links
    async fn update_content(&self, post: &Post, hashtags: &[String]) -> RepoResult<()>;

    /// Soft-delete and undo the counters this post contributed to
    async fn soft_delete(&self, post: &Post) -> RepoResult<()>;

    /// Non-draft posts of one author, newest first
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>>;

    /// Which of `post_ids` the user has reposted
    async fn reposted_post_ids(
        &self,
        user_id: Snowflake,
        post_ids: &[Snowflake],
    ) -> RepoResult<HashSet<Snowflake>>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Insert the like and increment the post counter; `AlreadyLiked` when a
    /// live like exists
    async fn create(&self, like: &Like) -> RepoResult<()>;

    /// Remove the live like and decrement the counter; `LikeNotFound` otherwise
    async fn delete(&self, user_id: Snowflake, post_id: Snowflake) -> RepoResult<()>;

    /// Check for a live like
    async fn exists(&self, user_id: Snowflake, post_id: Snowflake) -> RepoResult<bool>;

    /// Which of `post_ids` the user has liked
    async fn liked_post_ids(
        &self,
        user_id: Snowflake,
        post_ids: &[Snowflake],
    ) -> RepoResult<HashSet<Snowflake>>;

    /// Users who liked a post, newest like first
    async fn find_likers(&self, post_id: Snowflake, page: PageRequest) -> RepoResult<Page<User>>;

    /// Posts liked by a user, newest like first
    async fn find_liked_posts(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Insert the edge; `AlreadyFollowing` when a live edge exists
    async fn create(&self, follow: &Follow) -> RepoResult<()>;

    /// Remove the live edge; `FollowNotFound` otherwise
    async fn delete(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<()>;

    /// Check for a live edge
    async fn exists(&self, follower_id: Snowflake, following_id: Snowflake) -> RepoResult<bool>;

    /// Follower and following totals
    async fn counts(&self, user_id: Snowflake) -> RepoResult<FollowCounts>;

    /// Users following `user_id`, newest edge first
    async fn find_followers(&self, user_id: Snowflake, page: PageRequest)
        -> RepoResult<Page<User>>;

    /// Users `user_id` follows, newest edge first
    async fn find_following(&self, user_id: Snowflake, page: PageRequest)
        -> RepoResult<Page<User>>;

    /// Active users that are neither `user_id` nor followed by them, newest first
    async fn find_suggested(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Insert unconditionally
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Insert unless a live notification with the same recipient, actor, type
    /// and post already exists. Returns whether a row was written.
    async fn create_unique(&self, notification: &Notification) -> RepoResult<bool>;

    /// Newest first, with actor and post
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<NotificationDetail>>;

    async fn count_unread(&self, user_id: Snowflake) -> RepoResult<i64>;

    /// `NotificationNotFound` when absent or owned by someone else
    async fn mark_read(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    async fn mark_all_read(&self, user_id: Snowflake) -> RepoResult<u64>;

    /// `NotificationNotFound` when absent or owned by someone else
    async fn delete(&self, id: Snowflake, user_id: Snowflake) -> RepoResult<()>;

    async fn delete_all(&self, user_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Media Repository
// ============================================================================

#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn create(&self, media: &Media) -> RepoResult<()>;

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Media>>;

    /// Media attached to a post, in display order
    async fn find_by_post(&self, post_id: Snowflake) -> RepoResult<Vec<Media>>;

    /// Media attached to any of the posts, grouped by post then display order
    async fn find_by_posts(&self, post_ids: &[Snowflake]) -> RepoResult<Vec<Media>>;

    /// Soft-delete one record; `MediaNotFound` otherwise
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Soft-delete unattached media created before `cutoff`, returning the rows
    async fn delete_orphans(&self, cutoff: DateTime<Utc>) -> RepoResult<Vec<Media>>;
}

// ============================================================================
// Timeline Repository
// ============================================================================

/// Feed queries. All return non-draft public posts only.
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    /// Posts by the user and everyone they follow, newest first
    async fn home(&self, user_id: Snowflake, page: PageRequest) -> RepoResult<Page<AuthoredPost>>;

    /// All posts, newest first
    async fn explore(&self, page: PageRequest) -> RepoResult<Page<AuthoredPost>>;

    /// Posts created after `since`, by engagement then recency
    async fn trending(
        &self,
        since: DateTime<Utc>,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>>;

    /// Direct replies to a post, oldest first
    async fn replies(&self, parent_id: Snowflake, page: PageRequest)
        -> RepoResult<Page<AuthoredPost>>;
}

// ============================================================================
// Search Repository
// ============================================================================

/// Case-insensitive substring search. `query` is already lowercased.
#[async_trait]
pub trait SearchRepository: Send + Sync {
    /// Active users by username or display name; exact, then prefix, then newest
    async fn search_users(&self, query: &str, page: PageRequest) -> RepoResult<Page<User>>;

    /// Listed posts by content, newest first
    async fn search_posts(&self, query: &str, page: PageRequest)
        -> RepoResult<Page<AuthoredPost>>;

    /// Hashtags by name; exact, then prefix, then newest
    async fn search_hashtags(&self, query: &str, page: PageRequest)
        -> RepoResult<Page<HashtagCount>>;

    /// Exact hashtag lookup
    async fn find_hashtag(&self, name: &str) -> RepoResult<Option<Hashtag>>;

    /// Listed posts carrying a hashtag, newest first
    async fn hashtag_posts(
        &self,
        hashtag_id: Snowflake,
        page: PageRequest,
    ) -> RepoResult<Page<AuthoredPost>>;

    /// Hashtags ranked by number of listed posts created after `since`
    async fn trending_hashtags(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> RepoResult<Vec<HashtagCount>>;
}
