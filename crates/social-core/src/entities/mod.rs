//! Domain entities - core business objects

mod follow;
mod hashtag;
mod media;
mod notification;
mod post;
mod user;

pub use follow::{Follow, FollowCounts, Like};
pub use hashtag::{extract_hashtags, normalize_hashtag, Hashtag, HashtagCount};
pub use media::{Media, MediaType};
pub use notification::{Notification, NotificationDetail, NotificationType};
pub use post::{validate_content, AuthoredPost, Post, PostKind, PostType, MAX_CONTENT_LEN};
pub use user::{
    normalize_username, ProfileUpdate, User, UserStats, BIO_MAX_LEN, USERNAME_MAX_LEN,
    USERNAME_MIN_LEN,
};
