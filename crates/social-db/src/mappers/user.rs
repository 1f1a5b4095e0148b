//! User model -> entity mapper

use social_core::entities::{User, UserStats};
use social_core::value_objects::Snowflake;

use crate::models::{UserModel, UserStatsModel};

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            display_name: model.display_name,
            bio: model.bio,
            profile_image_url: model.profile_image_url,
            cover_image_url: model.cover_image_url,
            location: model.location,
            website: model.website,
            is_verified: model.is_verified,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<UserStatsModel> for UserStats {
    fn from(model: UserStatsModel) -> Self {
        UserStats {
            followers_count: model.followers_count,
            following_count: model.following_count,
            posts_count: model.posts_count,
        }
    }
}
