//! Post and hashtag model -> entity mappers
//!
//! Posts are fallible to map: the `post_type` column and the reference
//! columns must agree on a [`PostKind`].

use social_core::entities::{
    AuthoredPost, Hashtag, HashtagCount, Post, PostKind, PostType, User,
};
use social_core::error::DomainError;
use social_core::value_objects::Snowflake;

use crate::models::{AuthoredPostModel, HashtagCountModel, HashtagModel, PostModel};

fn post_kind(
    post_type: &str,
    original_post_id: Option<i64>,
    parent_post_id: Option<i64>,
) -> Result<PostKind, DomainError> {
    let post_type: PostType = post_type.parse()?;
    PostKind::from_parts(
        post_type,
        original_post_id.map(Snowflake::new),
        parent_post_id.map(Snowflake::new),
    )
    .map_err(|e| DomainError::DatabaseError(format!("inconsistent post row: {e}")))
}

impl TryFrom<PostModel> for Post {
    type Error = DomainError;

    fn try_from(model: PostModel) -> Result<Self, Self::Error> {
        Ok(Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            kind: post_kind(&model.post_type, model.original_post_id, model.parent_post_id)?,
            content: model.content,
            is_public: model.is_public,
            is_draft: model.is_draft,
            likes_count: model.likes_count,
            reposts_count: model.reposts_count,
            comments_count: model.comments_count,
            views_count: model.views_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<AuthoredPostModel> for AuthoredPost {
    type Error = DomainError;

    fn try_from(m: AuthoredPostModel) -> Result<Self, Self::Error> {
        let author = User {
            id: Snowflake::new(m.author_id),
            username: m.author_username,
            email: m.author_email,
            display_name: m.author_display_name,
            bio: m.author_bio,
            profile_image_url: m.author_profile_image_url,
            cover_image_url: m.author_cover_image_url,
            location: m.author_location,
            website: m.author_website,
            is_verified: m.author_is_verified,
            is_active: m.author_is_active,
            created_at: m.author_created_at,
            updated_at: m.author_updated_at,
        };
        let post = Post {
            id: Snowflake::new(m.id),
            author_id: author.id,
            kind: post_kind(&m.post_type, m.original_post_id, m.parent_post_id)?,
            content: m.content,
            is_public: m.is_public,
            is_draft: m.is_draft,
            likes_count: m.likes_count,
            reposts_count: m.reposts_count,
            comments_count: m.comments_count,
            views_count: m.views_count,
            created_at: m.created_at,
            updated_at: m.updated_at,
        };
        Ok(AuthoredPost { post, author })
    }
}

/// Map a batch of joined rows, failing on the first inconsistent one
pub fn authored_posts(rows: Vec<AuthoredPostModel>) -> Result<Vec<AuthoredPost>, DomainError> {
    rows.into_iter().map(AuthoredPost::try_from).collect()
}

impl From<HashtagModel> for Hashtag {
    fn from(model: HashtagModel) -> Self {
        Hashtag {
            id: Snowflake::new(model.id),
            name: model.name,
            created_at: model.created_at,
        }
    }
}

impl From<HashtagCountModel> for HashtagCount {
    fn from(model: HashtagCountModel) -> Self {
        HashtagCount {
            hashtag: Hashtag {
                id: Snowflake::new(model.id),
                name: model.name,
                created_at: model.created_at,
            },
            posts_count: model.posts_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn model(post_type: &str, original: Option<i64>, parent: Option<i64>) -> PostModel {
        PostModel {
            id: 10,
            author_id: 1,
            content: "hi".to_string(),
            post_type: post_type.to_string(),
            is_public: true,
            is_draft: false,
            original_post_id: original,
            parent_post_id: parent,
            likes_count: 0,
            reposts_count: 0,
            comments_count: 0,
            views_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_reply_row_maps_to_kind() {
        let post = Post::try_from(model("reply", None, Some(4))).unwrap();
        assert_eq!(post.kind, PostKind::Reply { parent_id: Snowflake::new(4) });
    }

    #[test]
    fn test_inconsistent_row_rejected() {
        let err = Post::try_from(model("repost", None, None)).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));

        let err = Post::try_from(model("story", None, None)).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPostType(_)));
    }
}
