//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("user not found: {0}")]
    UserNotFound(Snowflake),

    #[error("user not found: {0}")]
    UsernameNotFound(String),

    #[error("post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("original post not found")]
    OriginalPostNotFound,

    #[error("parent post not found")]
    ParentPostNotFound,

    #[error("comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("like not found")]
    LikeNotFound,

    #[error("follow relationship not found")]
    FollowNotFound,

    #[error("notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("media not found: {0}")]
    MediaNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("content exceeds {max} characters")]
    ContentTooLong { max: usize },

    #[error("invalid post type: {0}")]
    InvalidPostType(String),

    #[error("{0} is required for this post type")]
    MissingPostReference(&'static str),

    #[error("cannot follow yourself")]
    CannotFollowSelf,

    #[error("cannot unfollow yourself")]
    CannotUnfollowSelf,

    #[error("unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("file size exceeds limit of {max} bytes")]
    FileTooLarge { max: u64 },

    #[error("no valid fields to update")]
    NothingToUpdate,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("not the author of this post")]
    NotPostAuthor,

    #[error("unauthorized to delete this media")]
    NotMediaOwner,

    #[error("account is deactivated")]
    AccountDeactivated,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("username already exists")]
    UsernameAlreadyExists,

    #[error("email already exists")]
    EmailAlreadyExists,

    #[error("post already liked")]
    AlreadyLiked,

    #[error("already following this user")]
    AlreadyFollowing,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) | Self::UsernameNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::OriginalPostNotFound => "UNKNOWN_ORIGINAL_POST",
            Self::ParentPostNotFound => "UNKNOWN_PARENT_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::LikeNotFound => "UNKNOWN_LIKE",
            Self::FollowNotFound => "UNKNOWN_FOLLOW",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::MediaNotFound(_) => "UNKNOWN_MEDIA",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidPostType(_) => "INVALID_POST_TYPE",
            Self::MissingPostReference(_) => "MISSING_POST_REFERENCE",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::CannotUnfollowSelf => "CANNOT_UNFOLLOW_SELF",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::NothingToUpdate => "NOTHING_TO_UPDATE",

            // Authorization
            Self::NotPostAuthor => "NOT_POST_AUTHOR",
            Self::NotMediaOwner => "NOT_MEDIA_OWNER",
            Self::AccountDeactivated => "ACCOUNT_DEACTIVATED",

            // Conflict
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::UsernameNotFound(_)
                | Self::PostNotFound(_)
                | Self::OriginalPostNotFound
                | Self::ParentPostNotFound
                | Self::CommentNotFound(_)
                | Self::LikeNotFound
                | Self::FollowNotFound
                | Self::NotificationNotFound(_)
                | Self::MediaNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ContentTooLong { .. }
                | Self::InvalidPostType(_)
                | Self::MissingPostReference(_)
                | Self::CannotFollowSelf
                | Self::CannotUnfollowSelf
                | Self::UnsupportedMediaType(_)
                | Self::FileTooLarge { .. }
                | Self::NothingToUpdate
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotPostAuthor | Self::NotMediaOwner | Self::AccountDeactivated
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::UsernameAlreadyExists
                | Self::EmailAlreadyExists
                | Self::AlreadyLiked
                | Self::AlreadyFollowing
        )
    }
}
