//! Media service
//!
//! Validates uploads, stores them under `{upload_dir}/{images|videos}` and
//! records a Media row. Rows never attached to a post are swept after a
//! grace period.

use std::path::{Path, PathBuf};

use chrono::{Duration, Utc};
use social_common::config::StorageConfig;
use social_core::entities::{Media, MediaType};
use social_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{MediaResponse, MultiUploadResponse, PostMediaResponse, UploadResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Most files accepted by one multi-file upload
pub const MAX_FILES_PER_UPLOAD: usize = 4;

/// Age after which unattached media is considered orphaned
pub const ORPHAN_GRACE_HOURS: i64 = 24;

/// Longest original file name kept on a Media row, in characters
pub const MAX_FILE_NAME_LEN: usize = 255;

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            data,
        }
    }

    /// Extension including the dot, as given by the client
    fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default()
    }

    /// Client file name cut to [`MAX_FILE_NAME_LEN`], keeping the extension
    fn display_name(&self) -> String {
        if self.file_name.chars().count() <= MAX_FILE_NAME_LEN {
            return self.file_name.clone();
        }
        let ext = self.extension();
        let ext_len = ext.chars().count();
        if ext_len >= MAX_FILE_NAME_LEN {
            return self.file_name.chars().take(MAX_FILE_NAME_LEN).collect();
        }
        let stem: String = self
            .file_name
            .chars()
            .take(MAX_FILE_NAME_LEN - ext_len)
            .collect();
        format!("{stem}{ext}")
    }
}

/// A file written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub path: PathBuf,
    pub url: String,
}

/// Local file-system storage for uploads
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    base_url: String,
    max_file_size: u64,
    max_video_size: u64,
}

impl MediaStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.upload_dir),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_file_size: config.max_file_size,
            max_video_size: config.max_video_size,
        }
    }

    /// Create the per-type upload directories
    ///
    /// # Errors
    /// Returns an I/O error if a directory cannot be created
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for ty in [MediaType::Image, MediaType::Video] {
            tokio::fs::create_dir_all(self.root.join(ty.subdir())).await?;
        }
        Ok(())
    }

    /// Size limit for a media type
    pub fn limit_for(&self, media_type: MediaType) -> u64 {
        if media_type.is_video() {
            self.max_video_size
        } else {
            self.max_file_size
        }
    }

    /// Determine the media type and enforce its size limit
    ///
    /// # Errors
    /// `UnsupportedMediaType` for unknown extensions, `FileTooLarge` over the
    /// limit, `ValidationError` for empty files
    pub fn classify(&self, file: &UploadedFile) -> Result<MediaType, DomainError> {
        let media_type = MediaType::from_extension(&file.extension())?;

        if file.data.is_empty() {
            return Err(DomainError::ValidationError("file is empty".to_string()));
        }

        let max = self.limit_for(media_type);
        if file.data.len() as u64 > max {
            return Err(DomainError::FileTooLarge { max });
        }

        Ok(media_type)
    }

    /// Write the bytes under a fresh `{uuid}{ext}` name
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be written
    pub async fn write(
        &self,
        media_type: MediaType,
        file: &UploadedFile,
    ) -> std::io::Result<StoredFile> {
        let name = format!("{}{}", Uuid::new_v4(), file.extension().to_ascii_lowercase());
        let subdir = media_type.subdir();
        let path = self.root.join(subdir).join(&name);

        tokio::fs::create_dir_all(self.root.join(subdir)).await?;
        tokio::fs::write(&path, &file.data).await?;

        Ok(StoredFile {
            path,
            url: format!("{}/uploads/{subdir}/{name}", self.base_url),
        })
    }

    /// Map a public media URL back to its file under the upload root
    pub fn path_for_url(&self, url: &str) -> Option<PathBuf> {
        let (_, relative) = url.split_once("/uploads/")?;
        let relative = Path::new(relative);

        // Only plain `{subdir}/{file}` paths are ours
        let mut components = relative.components();
        let ok = matches!(
            (components.next(), components.next(), components.next()),
            (
                Some(std::path::Component::Normal(_)),
                Some(std::path::Component::Normal(_)),
                None
            )
        );
        ok.then(|| self.root.join(relative))
    }

    /// Remove the file behind a media URL
    ///
    /// # Errors
    /// Returns an I/O error if the URL is foreign or the file cannot be removed
    pub async fn remove(&self, url: &str) -> std::io::Result<()> {
        let path = self.path_for_url(url).ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "not an upload url")
        })?;
        tokio::fs::remove_file(path).await
    }
}

/// Media service
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
    store: MediaStore,
}

impl<'a> MediaService<'a> {
    /// Create a new MediaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            store: MediaStore::new(ctx.storage()),
        }
    }

    /// Store one file and record it as unattached media
    #[instrument(skip(self, file), fields(file_name = %file.file_name, size = file.data.len()))]
    pub async fn upload(
        &self,
        uploader_id: Snowflake,
        file: UploadedFile,
    ) -> ServiceResult<UploadResponse> {
        let media_type = self.store.classify(&file)?;
        let stored = self.store.write(media_type, &file).await?;

        let media = Media::new(
            self.ctx.generate_id(),
            uploader_id,
            media_type,
            stored.url,
            file.display_name(),
            i64::try_from(file.data.len()).unwrap_or(i64::MAX),
        );

        if let Err(e) = self.ctx.media_repo().create(&media).await {
            if let Err(io) = tokio::fs::remove_file(&stored.path).await {
                warn!(path = %stored.path.display(), error = %io, "Failed to remove stored upload");
            }
            return Err(e.into());
        }

        info!(media_id = %media.id, uploader_id = %uploader_id, kind = %media_type, "Media uploaded");
        Ok(UploadResponse::from(&media))
    }

    /// Store up to four files; individual failures are logged and skipped
    #[instrument(skip(self, files), fields(count = files.len()))]
    pub async fn upload_multiple(
        &self,
        uploader_id: Snowflake,
        files: Vec<UploadedFile>,
    ) -> ServiceResult<MultiUploadResponse> {
        if files.is_empty() {
            return Err(ServiceError::validation("no files provided"));
        }
        if files.len() > MAX_FILES_PER_UPLOAD {
            return Err(ServiceError::validation(format!(
                "maximum {MAX_FILES_PER_UPLOAD} files allowed"
            )));
        }

        let total_files = files.len();
        let mut uploaded_files = Vec::with_capacity(total_files);
        for file in files {
            let name = file.file_name.clone();
            match self.upload(uploader_id, file).await {
                Ok(resp) => uploaded_files.push(resp),
                Err(e) => warn!(file_name = %name, error = %e, "Upload failed, skipping file"),
            }
        }

        if uploaded_files.is_empty() {
            return Err(ServiceError::validation("all file uploads failed"));
        }

        Ok(MultiUploadResponse {
            total_uploaded: uploaded_files.len(),
            total_files,
            uploaded_files,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_media(&self, media_id: Snowflake) -> ServiceResult<MediaResponse> {
        let media = self
            .ctx
            .media_repo()
            .find_by_id(media_id)
            .await?
            .ok_or(DomainError::MediaNotFound(media_id))?;
        Ok(MediaResponse::from(media))
    }

    /// Post author deletes attached media; uploader deletes unattached media
    #[instrument(skip(self))]
    pub async fn delete_media(&self, user_id: Snowflake, media_id: Snowflake) -> ServiceResult<()> {
        let media = self
            .ctx
            .media_repo()
            .find_by_id(media_id)
            .await?
            .ok_or(DomainError::MediaNotFound(media_id))?;

        let owner = match media.post_id {
            Some(post_id) => self
                .ctx
                .post_repo()
                .find_by_id(post_id)
                .await?
                .map_or(media.uploader_id, |post| post.author_id),
            None => media.uploader_id,
        };
        if owner != user_id {
            return Err(DomainError::NotMediaOwner.into());
        }

        self.ctx.media_repo().delete(media_id).await?;

        if let Err(e) = self.store.remove(&media.url).await {
            warn!(media_id = %media_id, url = %media.url, error = %e, "Failed to remove media file");
        }

        info!(media_id = %media_id, "Media deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_post_media(&self, post_id: Snowflake) -> ServiceResult<PostMediaResponse> {
        let media = self.ctx.media_repo().find_by_post(post_id).await?;
        Ok(PostMediaResponse {
            media: media.into_iter().map(MediaResponse::from).collect(),
        })
    }

    /// Delete unattached media older than `older_than`, rows and files
    #[instrument(skip(self))]
    pub async fn cleanup_orphaned_media(&self, older_than: Duration) -> ServiceResult<usize> {
        let cutoff = Utc::now() - older_than;
        let removed = self.ctx.media_repo().delete_orphans(cutoff).await?;

        for media in &removed {
            if let Err(e) = self.store.remove(&media.url).await {
                warn!(media_id = %media.id, error = %e, "Failed to remove orphaned media file");
            }
        }

        if !removed.is_empty() {
            info!(count = removed.len(), "Orphaned media removed");
        }
        Ok(removed.len())
    }
}
