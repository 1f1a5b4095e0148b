//! User database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the users table (password hash excluded)
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
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

/// Profile counters computed by subqueries
#[derive(Debug, Clone, Copy, FromRow)]
pub struct UserStatsModel {
    pub followers_count: i64,
    pub following_count: i64,
    pub posts_count: i64,
}
