//! Follow and like entities - the social graph and engagement edges

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Directed follow edge: `follower_id` follows `following_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub id: Snowflake,
    pub follower_id: Snowflake,
    pub following_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Follow {
    /// Create a follow edge, rejecting self-follows
    pub fn new(
        id: Snowflake,
        follower_id: Snowflake,
        following_id: Snowflake,
    ) -> Result<Self, DomainError> {
        if follower_id == following_id {
            return Err(DomainError::CannotFollowSelf);
        }
        Ok(Self {
            id,
            follower_id,
            following_id,
            created_at: Utc::now(),
        })
    }
}

/// Follower/following totals for one user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowCounts {
    pub followers_count: i64,
    pub following_count: i64,
}

/// A user's like on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub post_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(id: Snowflake, user_id: Snowflake, post_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_follow_rejected() {
        let result = Follow::new(Snowflake::new(1), Snowflake::new(5), Snowflake::new(5));
        assert!(matches!(result, Err(DomainError::CannotFollowSelf)));
    }

    #[test]
    fn test_follow_edge() {
        let follow = Follow::new(Snowflake::new(1), Snowflake::new(5), Snowflake::new(6)).unwrap();
        assert_eq!(follow.follower_id, Snowflake::new(5));
        assert_eq!(follow.following_id, Snowflake::new(6));
    }
}
