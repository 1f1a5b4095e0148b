//! Post entity - the universal content unit
//!
//! Originals, replies (comments), reposts, and quotes share one row shape.
//! The kind and its reference are carried together in [`PostKind`] so a
//! reply can never exist without a parent, nor a repost without an original.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::entities::User;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Maximum post content length, counted in characters
pub const MAX_CONTENT_LEN: usize = 280;

/// Storage discriminant of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostType {
    Original,
    Reply,
    Repost,
    Quote,
}

impl PostType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Reply => "reply",
            Self::Repost => "repost",
            Self::Quote => "quote",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Self::Original),
            "reply" => Ok(Self::Reply),
            "repost" => Ok(Self::Repost),
            "quote" => Ok(Self::Quote),
            other => Err(DomainError::InvalidPostType(other.to_string())),
        }
    }
}

/// Kind of post together with the post it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Original,
    Reply { parent_id: Snowflake },
    Repost { original_id: Snowflake },
    Quote { original_id: Snowflake },
}

impl PostKind {
    /// Build a kind from its discriminant and the optional references.
    ///
    /// Repost and quote need `original_id`, reply needs `parent_id`.
    /// Extra references that the kind does not use are ignored.
    pub fn from_parts(
        post_type: PostType,
        original_id: Option<Snowflake>,
        parent_id: Option<Snowflake>,
    ) -> Result<Self, DomainError> {
        match post_type {
            PostType::Original => Ok(Self::Original),
            PostType::Reply => parent_id
                .map(|parent_id| Self::Reply { parent_id })
                .ok_or(DomainError::MissingPostReference("parent_post_id")),
            PostType::Repost => original_id
                .map(|original_id| Self::Repost { original_id })
                .ok_or(DomainError::MissingPostReference("original_post_id")),
            PostType::Quote => original_id
                .map(|original_id| Self::Quote { original_id })
                .ok_or(DomainError::MissingPostReference("original_post_id")),
        }
    }

    pub fn post_type(&self) -> PostType {
        match self {
            Self::Original => PostType::Original,
            Self::Reply { .. } => PostType::Reply,
            Self::Repost { .. } => PostType::Repost,
            Self::Quote { .. } => PostType::Quote,
        }
    }

    /// Referenced original for reposts and quotes
    pub fn original_id(&self) -> Option<Snowflake> {
        match self {
            Self::Repost { original_id } | Self::Quote { original_id } => Some(*original_id),
            _ => None,
        }
    }

    /// Referenced parent for replies
    pub fn parent_id(&self) -> Option<Snowflake> {
        match self {
            Self::Reply { parent_id } => Some(*parent_id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        matches!(self, Self::Reply { .. })
    }

    #[inline]
    pub fn is_repost(&self) -> bool {
        matches!(self, Self::Repost { .. })
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub kind: PostKind,
    pub is_public: bool,
    pub is_draft: bool,
    pub likes_count: i32,
    pub reposts_count: i32,
    pub comments_count: i32,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new public post with zeroed counters
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        kind: PostKind,
        is_draft: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            content,
            kind,
            is_public: true,
            is_draft,
            likes_count: 0,
            reposts_count: 0,
            comments_count: 0,
            views_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Visible in feeds and search
    #[inline]
    pub fn is_listed(&self) -> bool {
        self.is_public && !self.is_draft
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Replace the content, touching `updated_at`
    pub fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// Post joined with its author, the shape every listing returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoredPost {
    pub post: Post,
    pub author: User,
}

/// Reject content longer than [`MAX_CONTENT_LEN`] characters
pub fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.chars().count() > MAX_CONTENT_LEN {
        return Err(DomainError::ContentTooLong {
            max: MAX_CONTENT_LEN,
        });
    }
    Ok(())
}
