//! Shared SQL fragments

/// User columns matching [`crate::models::UserModel`], for table alias `u`
pub const USER_COLUMNS: &str = "u.id, u.username, u.email, u.display_name, u.bio, \
    u.profile_image_url, u.cover_image_url, u.location, u.website, u.is_verified, \
    u.is_active, u.created_at, u.updated_at";

/// Post columns matching [`crate::models::PostModel`], for table alias `p`
pub const POST_COLUMNS: &str = "p.id, p.author_id, p.content, p.post_type, p.is_public, \
    p.is_draft, p.original_post_id, p.parent_post_id, p.likes_count, p.reposts_count, \
    p.comments_count, p.views_count, p.created_at, p.updated_at";

/// Select head producing [`crate::models::AuthoredPostModel`] rows
pub const AUTHORED_POST_SELECT: &str = "SELECT p.id, p.author_id, p.content, p.post_type, \
    p.is_public, p.is_draft, p.original_post_id, p.parent_post_id, p.likes_count, \
    p.reposts_count, p.comments_count, p.views_count, p.created_at, p.updated_at, \
    u.username AS author_username, u.email AS author_email, \
    u.display_name AS author_display_name, u.bio AS author_bio, \
    u.profile_image_url AS author_profile_image_url, \
    u.cover_image_url AS author_cover_image_url, u.location AS author_location, \
    u.website AS author_website, u.is_verified AS author_is_verified, \
    u.is_active AS author_is_active, u.created_at AS author_created_at, \
    u.updated_at AS author_updated_at \
    FROM posts p JOIN users u ON u.id = p.author_id";

/// Media columns matching [`crate::models::MediaModel`]
pub const MEDIA_COLUMNS: &str = "id, uploader_id, post_id, media_type, url, thumbnail_url, \
    file_name, file_size, width, height, duration, sort_order, created_at";

/// Notification columns matching [`crate::models::NotificationModel`]
pub const NOTIFICATION_COLUMNS: &str =
    "id, user_id, actor_id, notification_type, post_id, message, is_read, created_at";

/// Condition for posts visible in feeds and search
pub const LISTED_POST: &str =
    "p.deleted_at IS NULL AND p.is_draft = FALSE AND p.is_public = TRUE";

/// `%query%` with LIKE metacharacters escaped (default escape `\`)
pub fn contains_pattern(query: &str) -> String {
    format!("%{}%", escape_like(query))
}

/// `query%` with LIKE metacharacters escaped
pub fn prefix_pattern(query: &str) -> String {
    format!("{}%", escape_like(query))
}

fn escape_like(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Convert ids to the array bound to `= ANY($n)`
pub fn id_array(ids: &[social_core::Snowflake]) -> Vec<i64> {
    ids.iter().map(|id| id.into_inner()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_patterns_escape() {
        assert_eq!(contains_pattern("rust"), "%rust%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(prefix_pattern("a\\b"), "a\\\\b%");
    }
}
