//! Media handlers
//!
//! Multipart uploads and media lookups. Uploaded bytes are buffered in memory
//! up to the configured body limit before they reach the media service.

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use social_service::dto::{
    MediaResponse, MessageResponse, MultiUploadResponse, PostMediaResponse, UploadResponse,
};
use social_service::{MediaService, UploadedFile};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Multipart field of a single upload
const FILE_FIELD: &str = "file";
/// Multipart field of a multi-file upload
const FILES_FIELD: &str = "files";

async fn read_file(field: Field<'_>) -> ApiResult<UploadedFile> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.body_text()))?;
    Ok(UploadedFile::new(file_name, data.to_vec()))
}

/// Collect every part named `name`
async fn collect_files(multipart: &mut Multipart, name: &str) -> ApiResult<Vec<UploadedFile>> {
    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::invalid_multipart(e.body_text()))?
    {
        if field.name() == Some(name) {
            files.push(read_file(field).await?);
        }
    }
    Ok(files)
}

/// Upload one file
///
/// POST /media/upload
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<UploadResponse>>> {
    let file = collect_files(&mut multipart, FILE_FIELD)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::invalid_multipart("file is required"))?;

    let service = MediaService::new(state.service_context());
    let response = service.upload(auth.user_id, file).await?;
    Ok(Created(Json(response)))
}

/// Upload up to four files
///
/// POST /media/upload-multiple
pub async fn upload_multiple(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Created<Json<MultiUploadResponse>>> {
    let files = collect_files(&mut multipart, FILES_FIELD).await?;

    let service = MediaService::new(state.service_context());
    let response = service.upload_multiple(auth.user_id, files).await?;
    Ok(Created(Json(response)))
}

/// GET /media/{media_id}
pub async fn get_media(
    State(state): State<AppState>,
    IdPath(media_id): IdPath,
) -> ApiResult<Json<MediaResponse>> {
    let service = MediaService::new(state.service_context());
    let response = service.get_media(media_id).await?;
    Ok(Json(response))
}

/// DELETE /media/{media_id}
pub async fn delete_media(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(media_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = MediaService::new(state.service_context());
    service.delete_media(auth.user_id, media_id).await?;
    Ok(Json(MessageResponse::new("media deleted successfully")))
}

/// Media attached to a post, in display order
///
/// GET /media/post/{post_id}
pub async fn get_post_media(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<PostMediaResponse>> {
    let service = MediaService::new(state.service_context());
    let response = service.get_post_media(post_id).await?;
    Ok(Json(response))
}
