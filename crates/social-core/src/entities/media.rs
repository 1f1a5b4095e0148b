//! Media entity - uploaded images, gifs and videos

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Kind of uploaded media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Image,
    Video,
    Gif,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Gif => "gif",
        }
    }

    /// Classify by file extension (case-insensitive, with or without the dot)
    pub fn from_extension(ext: &str) -> Result<Self, DomainError> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "webp" => Ok(Self::Image),
            "gif" => Ok(Self::Gif),
            "mp4" | "mov" | "avi" | "mkv" | "webm" => Ok(Self::Video),
            _ => Err(DomainError::UnsupportedMediaType(format!(".{ext}"))),
        }
    }

    /// Storage subdirectory under the upload root
    pub fn subdir(self) -> &'static str {
        match self {
            Self::Image | Self::Gif => "images",
            Self::Video => "videos",
        }
    }

    #[inline]
    pub fn is_video(self) -> bool {
        matches!(self, Self::Video)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "gif" => Ok(Self::Gif),
            other => Err(DomainError::UnsupportedMediaType(other.to_string())),
        }
    }
}

/// Uploaded media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub id: Snowflake,
    pub uploader_id: Snowflake,
    pub post_id: Option<Snowflake>,
    pub media_type: MediaType,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub file_name: String,
    pub file_size: i64,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub duration: Option<i32>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Media {
    /// Create an unattached media record
    pub fn new(
        id: Snowflake,
        uploader_id: Snowflake,
        media_type: MediaType,
        url: String,
        file_name: String,
        file_size: i64,
    ) -> Self {
        Self {
            id,
            uploader_id,
            post_id: None,
            media_type,
            url,
            thumbnail_url: None,
            file_name,
            file_size,
            width: None,
            height: None,
            duration: None,
            sort_order: 0,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.post_id.is_some()
    }
}
