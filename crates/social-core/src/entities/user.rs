//! User entity - represents an account on the network

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Minimum username length accepted at registration
pub const USERNAME_MIN_LEN: usize = 3;
/// Maximum username length accepted at registration
pub const USERNAME_MAX_LEN: usize = 50;
/// Maximum bio length
pub const BIO_MAX_LEN: usize = 280;

/// Trim a requested username and check its length in characters
pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
    let username = raw.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(DomainError::ValidationError(format!(
            "username must be {USERNAME_MIN_LEN}-{USERNAME_MAX_LEN} characters"
        )));
    }
    Ok(username.to_string())
}

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, unverified user.
    ///
    /// An empty or missing display name falls back to the username.
    pub fn new(
        id: Snowflake,
        username: String,
        email: String,
        display_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        let display_name = display_name
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| username.clone());

        Self {
            id,
            username,
            email,
            display_name,
            bio: None,
            profile_image_url: None,
            cover_image_url: None,
            location: None,
            website: None,
            is_verified: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account can sign in and appear in listings
    #[inline]
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Apply a profile change, touching `updated_at` only when something changed
    pub fn apply_profile(&mut self, update: &ProfileUpdate) -> bool {
        if update.is_empty() {
            return false;
        }

        if let Some(display_name) = &update.display_name {
            self.display_name.clone_from(display_name);
        }
        if let Some(bio) = &update.bio {
            self.bio = Some(bio.clone());
        }
        if let Some(location) = &update.location {
            self.location = Some(location.clone());
        }
        if let Some(website) = &update.website {
            self.website = Some(website.clone());
        }
        if let Some(url) = &update.profile_image_url {
            self.profile_image_url = Some(url.clone());
        }
        if let Some(url) = &update.cover_image_url {
            self.cover_image_url = Some(url.clone());
        }
        self.updated_at = Utc::now();
        true
    }
}

/// Partial profile update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image_url: Option<String>,
    pub cover_image_url: Option<String>,
}

impl ProfileUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.bio.is_none()
            && self.location.is_none()
            && self.website.is_none()
            && self.profile_image_url.is_none()
            && self.cover_image_url.is_none()
    }
}

/// Aggregated social counters shown on a profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub followers_count: i64,
    pub following_count: i64,
    pub posts_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            Snowflake::new(1),
            "alice".to_string(),
            "alice@x.com".to_string(),
            None,
        );

        assert_eq!(user.display_name, "alice");
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert!(user.can_login());
    }

    #[test]
    fn test_blank_display_name_falls_back() {
        let user = User::new(
            Snowflake::new(1),
            "bob".to_string(),
            "bob@x.com".to_string(),
            Some("   ".to_string()),
        );
        assert_eq!(user.display_name, "bob");
    }

    #[test]
    fn test_normalize_username_checks_trimmed_length() {
        assert_eq!(normalize_username("  alice ").unwrap(), "alice");
        assert!(matches!(
            normalize_username("  ab  "),
            Err(DomainError::ValidationError(_))
        ));
        assert!(normalize_username(&"x".repeat(USERNAME_MAX_LEN)).is_ok());
        assert!(normalize_username(&"x".repeat(USERNAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_apply_profile() {
        let mut user = User::new(
            Snowflake::new(1),
            "carol".to_string(),
            "carol@x.com".to_string(),
            Some("Carol".to_string()),
        );

        assert!(!user.apply_profile(&ProfileUpdate::default()));

        let update = ProfileUpdate {
            bio: Some("hello".to_string()),
            ..Default::default()
        };
        assert!(user.apply_profile(&update));
        assert_eq!(user.bio.as_deref(), Some("hello"));
        assert_eq!(user.display_name, "Carol");
    }
}
