//! Notification entity - one row per actor-triggered event

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::entities::{Post, User};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Event that produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    Follow,
    Like,
    Comment,
    Repost,
    Quote,
    Mention,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Repost => "repost",
            Self::Quote => "quote",
            Self::Mention => "mention",
        }
    }

    /// Text shown to the recipient
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Follow => "started following you",
            Self::Like => "liked your post",
            Self::Comment => "commented on your post",
            Self::Repost => "reposted your post",
            Self::Quote => "quoted your post",
            Self::Mention => "mentioned you",
        }
    }

    /// Follow and like keep at most one live notification per actor
    /// (and per post for likes). Other events always insert.
    #[inline]
    pub fn is_deduplicated(self) -> bool {
        matches!(self, Self::Follow | Self::Like)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow" => Ok(Self::Follow),
            "like" => Ok(Self::Like),
            "comment" => Ok(Self::Comment),
            "repost" => Ok(Self::Repost),
            "quote" => Ok(Self::Quote),
            "mention" => Ok(Self::Mention),
            other => Err(DomainError::ValidationError(format!(
                "invalid notification type: {other}"
            ))),
        }
    }
}

/// Notification delivered to `user_id`, caused by `actor_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub actor_id: Snowflake,
    pub notification_type: NotificationType,
    pub post_id: Option<Snowflake>,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create an unread notification with the type's default message.
    ///
    /// Returns `None` when the actor is the recipient.
    pub fn for_event(
        id: Snowflake,
        user_id: Snowflake,
        actor_id: Snowflake,
        notification_type: NotificationType,
        post_id: Option<Snowflake>,
    ) -> Option<Self> {
        if user_id == actor_id {
            return None;
        }
        Some(Self {
            id,
            user_id,
            actor_id,
            notification_type,
            post_id,
            message: notification_type.default_message().to_string(),
            is_read: false,
            created_at: Utc::now(),
        })
    }
}

/// Notification with the actor and, when present, the related post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDetail {
    pub notification: Notification,
    pub actor: User,
    pub post: Option<Post>,
}
