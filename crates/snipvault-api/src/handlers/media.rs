//! Media file and folder handlers. Every route here sits behind the PIN
//! gate: the handler first asserts a live media session for the principal.

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::Engine as _;
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use snipvault_core::error::AppError;
use snipvault_entity::media::{MediaFile, MediaFolder};
use snipvault_service::media::{
    CreateMediaFolderRequest, UpdateMediaFileRequest, UploadMediaRequest as SvcUpload,
};

use crate::dto::request::{FavoriteRequest, UploadMediaRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::Principal;
use crate::state::AppState;

/// Optional folder scope for media file listings.
#[derive(Debug, Deserialize)]
pub struct MediaListQuery {
    /// Folder to list; absent lists root files.
    pub folder_id: Option<Uuid>,
    /// List every file regardless of folder.
    #[serde(default)]
    pub all: bool,
}

/// Optional parent scope for media folder listings.
#[derive(Debug, Deserialize)]
pub struct MediaFolderQuery {
    /// Parent folder; absent lists roots.
    pub parent_id: Option<Uuid>,
}

/// Partial update for a media folder.
#[derive(Debug, Deserialize)]
pub struct UpdateMediaFolderRequest {
    /// New display name.
    pub name: Option<String>,
    /// New display color.
    pub color: Option<String>,
    /// New display icon.
    pub icon: Option<String>,
}

// ---- files ----

/// GET /api/media/files
pub async fn list_files(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<MediaListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<MediaFile>>>> {
    state.pin_service.require_media_session(&principal).await?;
    let files = if query.all {
        state.media_service.list_all_files(&principal).await?
    } else {
        state
            .media_service
            .list_files(&principal, query.folder_id)
            .await?
    };
    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/media/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MediaFile>>> {
    state.pin_service.require_media_session(&principal).await?;
    let file = state.media_service.get_file(&principal, id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/media/files
pub async fn upload_file(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<UploadMediaRequest>,
) -> ApiResult<Json<ApiResponse<MediaFile>>> {
    state.pin_service.require_media_session(&principal).await?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let data = base64::engine::general_purpose::STANDARD
        .decode(req.data.as_bytes())
        .map_err(|_| AppError::validation("File content is not valid base64"))?;

    let file = state
        .media_service
        .upload(
            &principal,
            SvcUpload {
                file_name: req.file_name,
                file_type: req.file_type,
                media_folder_id: req.media_folder_id,
                tags: req.tags,
                duration: req.duration,
            },
            Bytes::from(data),
        )
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/media/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMediaFileRequest>,
) -> ApiResult<Json<ApiResponse<MediaFile>>> {
    state.pin_service.require_media_session(&principal).await?;
    let file = state.media_service.update_file(&principal, id, req).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/media/files/{id}/favorite
pub async fn set_file_favorite(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<FavoriteRequest>,
) -> ApiResult<Json<ApiResponse<MediaFile>>> {
    state.pin_service.require_media_session(&principal).await?;
    let file = state
        .media_service
        .set_file_favorite(&principal, id, req.is_favorite)
        .await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/media/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.pin_service.require_media_session(&principal).await?;
    state.media_service.soft_delete_file(&principal, id).await?;
    Ok(Json(ApiResponse::ok(())))
}

/// GET /api/media/objects/{key}
///
/// Serves the blob bytes behind a recorded file URL. Under the default
/// local provider `public_base_url` points back at this route.
pub async fn download_object(
    State(state): State<AppState>,
    principal: Principal,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    state.pin_service.require_media_session(&principal).await?;
    let data = state.storage.read_object(&key).await?;
    let headers = [(header::CONTENT_TYPE, content_type_for(&key))];
    Ok((headers, data).into_response())
}

/// Content type from the object key's extension. Keys are derived from
/// uploaded image and video names, so unknown extensions fall back to
/// octet-stream.
fn content_type_for(key: &str) -> &'static str {
    let ext = key.rsplit('.').next().unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        _ => "application/octet-stream",
    }
}

// ---- folders ----

/// GET /api/media/folders
pub async fn list_folders(
    State(state): State<AppState>,
    principal: Principal,
    Query(query): Query<MediaFolderQuery>,
) -> ApiResult<Json<ApiResponse<Vec<MediaFolder>>>> {
    state.pin_service.require_media_session(&principal).await?;
    let folders = state
        .media_service
        .list_folders(&principal, query.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/media/folders
pub async fn create_folder(
    State(state): State<AppState>,
    principal: Principal,
    Json(req): Json<CreateMediaFolderRequest>,
) -> ApiResult<Json<ApiResponse<MediaFolder>>> {
    state.pin_service.require_media_session(&principal).await?;
    let folder = state.media_service.create_folder(&principal, req).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// PUT /api/media/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMediaFolderRequest>,
) -> ApiResult<Json<ApiResponse<MediaFolder>>> {
    state.pin_service.require_media_session(&principal).await?;
    let folder = state
        .media_service
        .update_folder(&principal, id, req.name, req.color, req.icon)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/media/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.pin_service.require_media_session(&principal).await?;
    state
        .media_service
        .soft_delete_folder(&principal, id)
        .await?;
    Ok(Json(ApiResponse::ok(())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_key_extension() {
        assert_eq!(content_type_for("abc_cat.PNG"), "image/png");
        assert_eq!(content_type_for("abc_clip.mp4"), "video/mp4");
        assert_eq!(content_type_for("abc_noext"), "application/octet-stream");
    }
}
