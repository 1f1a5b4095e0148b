//! Notification and media model -> entity mappers

use social_core::entities::{Media, Notification};
use social_core::error::DomainError;
use social_core::value_objects::Snowflake;

use crate::models::{MediaModel, NotificationModel};

impl TryFrom<NotificationModel> for Notification {
    type Error = DomainError;

    fn try_from(model: NotificationModel) -> Result<Self, Self::Error> {
        Ok(Notification {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            actor_id: Snowflake::new(model.actor_id),
            notification_type: model.notification_type.parse()?,
            post_id: model.post_id.map(Snowflake::new),
            message: model.message,
            is_read: model.is_read,
            created_at: model.created_at,
        })
    }
}

impl TryFrom<MediaModel> for Media {
    type Error = DomainError;

    fn try_from(model: MediaModel) -> Result<Self, Self::Error> {
        Ok(Media {
            id: Snowflake::new(model.id),
            uploader_id: Snowflake::new(model.uploader_id),
            post_id: model.post_id.map(Snowflake::new),
            media_type: model.media_type.parse()?,
            url: model.url,
            thumbnail_url: model.thumbnail_url,
            file_name: model.file_name,
            file_size: model.file_size,
            width: model.width,
            height: model.height,
            duration: model.duration,
            sort_order: model.sort_order,
            created_at: model.created_at,
        })
    }
}

/// Map a batch of media rows
pub fn media_list(rows: Vec<MediaModel>) -> Result<Vec<Media>, DomainError> {
    rows.into_iter().map(Media::try_from).collect()
}
