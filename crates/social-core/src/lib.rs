//! # social-core
//!
//! Domain layer containing entities, value objects, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    extract_hashtags, normalize_hashtag, normalize_username, validate_content, AuthoredPost,
    Follow, FollowCounts, Hashtag, HashtagCount, Like, Media, MediaType, Notification,
    NotificationDetail, NotificationType, Post, PostKind, PostType, ProfileUpdate, User,
    UserStats, BIO_MAX_LEN, MAX_CONTENT_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
pub use error::DomainError;
pub use traits::{
    FollowRepository, LikeRepository, MediaRepository, NotificationRepository, PostRepository,
    RepoResult, SearchRepository, TimelineRepository, UserRepository,
};
pub use value_objects::{Page, PageRequest, Snowflake, SnowflakeGenerator, SnowflakeParseError};
