//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; the ones with bounded fields also
//! implement `Validate`. Ids arrive as strings and are parsed by the services.

use serde::Deserialize;
use social_core::ProfileUpdate;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters long"))]
    pub password: String,

    #[validate(length(max = 100, message = "display name must be at most 100 characters"))]
    pub display_name: Option<String>,
}

/// Login with a username or an email address
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username", alias = "email")]
    #[validate(length(min = 1, message = "username or email is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "display name must be 1-100 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 280, message = "bio must be at most 280 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 100, message = "location must be at most 100 characters"))]
    pub location: Option<String>,

    #[validate(length(max = 255, message = "website must be at most 255 characters"))]
    pub website: Option<String>,

    #[validate(length(max = 500, message = "profile image url must be at most 500 characters"))]
    pub profile_image_url: Option<String>,

    #[validate(length(max = 500, message = "cover image url must be at most 500 characters"))]
    pub cover_image_url: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            display_name: req.display_name,
            bio: req.bio,
            location: req.location,
            website: req.website,
            profile_image_url: req.profile_image_url,
            cover_image_url: req.cover_image_url,
        }
    }
}

// ============================================================================
// Post Requests
// ============================================================================

fn default_post_type() -> String {
    "original".to_string()
}

/// Create post request
///
/// Content length is checked by the post service so that the error carries
/// the `CONTENT_TOO_LONG` code.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: String,

    /// One of `original`, `reply`, `repost`, `quote`
    #[serde(rename = "type", default = "default_post_type")]
    pub post_type: String,

    pub original_post_id: Option<String>,

    pub parent_post_id: Option<String>,

    /// Previously uploaded media, attached in list order
    #[serde(default)]
    pub media_ids: Vec<String>,

    #[serde(default)]
    pub is_draft: bool,
}

impl CreatePostRequest {
    /// An original post with the given content
    pub fn original(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            post_type: default_post_type(),
            original_post_id: None,
            parent_post_id: None,
            media_ids: Vec::new(),
            is_draft: false,
        }
    }

    /// A reply whose parent is `parent_id`
    pub fn reply(content: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self {
            post_type: "reply".to_string(),
            parent_post_id: Some(parent_id.into()),
            ..Self::original(content)
        }
    }
}

/// Update post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment or nested reply request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_validation() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@x.com".to_string(),
            password: "password1".to_string(),
            display_name: None,
        };
        assert!(req.validate().is_ok());

        let short = RegisterRequest {
            password: "short".to_string(),
            ..req.clone()
        };
        assert!(short.validate().is_err());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..req
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_login_accepts_username_alias() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"username":"alice","password":"password1"}"#).unwrap();
        assert_eq!(req.login, "alice");

        let req: LoginRequest =
            serde_json::from_str(r#"{"login":"alice@x.com","password":"password1"}"#).unwrap();
        assert_eq!(req.login, "alice@x.com");
    }

    #[test]
    fn test_create_post_defaults() {
        let req: CreatePostRequest = serde_json::from_str(r#"{"content":"hello"}"#).unwrap();
        assert_eq!(req.post_type, "original");
        assert!(req.media_ids.is_empty());
        assert!(!req.is_draft);

        let req: CreatePostRequest =
            serde_json::from_str(r#"{"content":"yo","type":"reply","parent_post_id":"42"}"#)
                .unwrap();
        assert_eq!(req.post_type, "reply");
        assert_eq!(req.parent_post_id.as_deref(), Some("42"));
    }

    #[test]
    fn test_profile_update_conversion() {
        let req = UpdateProfileRequest {
            bio: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
        let update = ProfileUpdate::from(req);
        assert_eq!(update.bio.as_deref(), Some("hi"));
        assert!(!update.is_empty());

        assert!(ProfileUpdate::from(UpdateProfileRequest::default()).is_empty());
    }
}
