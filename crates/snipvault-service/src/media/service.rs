//! Media area: uploads, folder tree, cascade lifecycle, blob cleanup.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult};
use snipvault_database::repositories::{MediaFileRepository, MediaFolderRepository};
use snipvault_entity::media::{
    CreateMediaFile, CreateMediaFolder, MediaFile, MediaFolder, MediaKind,
};
use snipvault_storage::MediaStorage;

use crate::context::RequestContext;

/// Manages media files and the media folder tree.
#[derive(Debug, Clone)]
pub struct MediaService {
    file_repo: Arc<MediaFileRepository>,
    folder_repo: Arc<MediaFolderRepository>,
    storage: Arc<MediaStorage>,
}

/// Request to upload a new media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadMediaRequest {
    /// Original file name (including extension).
    pub file_name: String,
    /// Image or video.
    pub file_type: MediaKind,
    /// Destination media folder.
    pub media_folder_id: Option<Uuid>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Playback duration in seconds (videos only).
    pub duration: Option<f64>,
}

/// Partial update for a media file. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMediaFileRequest {
    /// New display name.
    pub file_name: Option<String>,
    /// New folder assignment (`Some(None)` moves the file to the root).
    pub media_folder_id: Option<Option<Uuid>>,
    /// New tags (`Some(None)` clears them).
    pub tags: Option<Option<Vec<String>>>,
}

/// Request to create a media folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMediaFolderRequest {
    /// Folder display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Display icon name.
    pub icon: String,
    /// Parent folder (None for a root folder).
    pub parent_id: Option<Uuid>,
}

impl MediaService {
    /// Creates a new media service.
    pub fn new(
        file_repo: Arc<MediaFileRepository>,
        folder_repo: Arc<MediaFolderRepository>,
        storage: Arc<MediaStorage>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            storage,
        }
    }

    // ---- files ----

    /// Lists live media files, scoped to one folder (None = media root).
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<MediaFile>> {
        let owner_id = ctx.require_user()?;
        if let Some(folder_id) = folder_id {
            self.get_live_folder(owner_id, folder_id).await?;
        }
        self.file_repo.list(owner_id, folder_id).await
    }

    /// Lists every live media file for the owner.
    pub async fn list_all_files(&self, ctx: &RequestContext) -> AppResult<Vec<MediaFile>> {
        let owner_id = ctx.require_user()?;
        self.file_repo.list_all(owner_id).await
    }

    /// Gets a live media file by id.
    pub async fn get_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<MediaFile> {
        let owner_id = ctx.require_user()?;
        self.file_repo
            .find_by_id(id, owner_id)
            .await?
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found("Media file not found"))
    }

    /// Stores the blob and registers the media file row.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadMediaRequest,
        data: Bytes,
    ) -> AppResult<MediaFile> {
        let owner_id = ctx.require_user()?;
        if req.file_name.trim().is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        if let Some(folder_id) = req.media_folder_id {
            self.get_live_folder(owner_id, folder_id).await?;
        }

        let file_size = data.len() as i64;
        let (key, file_url) = self.storage.store_object(&req.file_name, data).await?;

        let created = self
            .file_repo
            .create(&CreateMediaFile {
                owner_id,
                file_name: req.file_name,
                file_type: req.file_type,
                file_url,
                file_size,
                media_folder_id: req.media_folder_id,
                tags: req.tags,
                duration: req.duration,
            })
            .await;

        match created {
            Ok(file) => {
                info!(
                    user_id = %owner_id,
                    media_file_id = %file.id,
                    bytes = file_size,
                    "Media file uploaded"
                );
                Ok(file)
            }
            Err(e) => {
                // Do not leave an orphaned blob behind a failed insert.
                if let Err(cleanup) = self.storage.delete_object(&key).await {
                    warn!(key, error = %cleanup, "Failed to clean up blob after insert error");
                }
                Err(e)
            }
        }
    }

    /// Renames, moves, or retags a media file.
    pub async fn update_file(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateMediaFileRequest,
    ) -> AppResult<MediaFile> {
        let owner_id = ctx.require_user()?;
        let mut file = self.get_file(ctx, id).await?;

        if let Some(file_name) = req.file_name {
            if file_name.trim().is_empty() {
                return Err(AppError::validation("File name cannot be empty"));
            }
            file.file_name = file_name;
        }
        if let Some(folder_id) = req.media_folder_id {
            if let Some(folder_id) = folder_id {
                self.get_live_folder(owner_id, folder_id).await?;
            }
            file.media_folder_id = folder_id;
        }
        if let Some(tags) = req.tags {
            file.tags = tags;
        }

        let updated = self.file_repo.update(&file).await?;
        info!(user_id = %owner_id, media_file_id = %id, "Media file updated");
        Ok(updated)
    }

    /// Sets the favorite flag on a media file.
    pub async fn set_file_favorite(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        favorite: bool,
    ) -> AppResult<MediaFile> {
        let owner_id = ctx.require_user()?;
        if !self.file_repo.set_favorite(id, owner_id, favorite).await? {
            return Err(AppError::not_found("Media file not found"));
        }
        self.get_file(ctx, id).await
    }

    /// Moves a media file to the recycle bin.
    pub async fn soft_delete_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.file_repo.soft_delete(id, owner_id).await? {
            return Err(AppError::not_found("Media file not found"));
        }
        info!(user_id = %owner_id, media_file_id = %id, "Media file moved to recycle bin");
        Ok(())
    }

    /// Restores a media file from the recycle bin.
    pub async fn restore_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.file_repo.restore(id, owner_id).await? {
            return Err(AppError::not_found("Media file not found in recycle bin"));
        }
        info!(user_id = %owner_id, media_file_id = %id, "Media file restored");
        Ok(())
    }

    /// Permanently deletes a media file, removing the blob first. A blob
    /// that cannot be removed is logged and does not block the row delete.
    pub async fn purge_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        let file = self
            .file_repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Media file not found"))?;
        self.purge_file_row(&file).await
    }

    /// Purge a loaded row; shared with folder purge and the retention
    /// worker.
    pub async fn purge_file_row(&self, file: &MediaFile) -> AppResult<()> {
        self.delete_blob(file).await;
        if !self.file_repo.purge(file.id, file.owner_id).await? {
            return Err(AppError::not_found("Media file not found"));
        }
        info!(
            user_id = %file.owner_id,
            media_file_id = %file.id,
            "Media file permanently deleted"
        );
        Ok(())
    }

    // ---- folders ----

    /// Lists live child folders of a parent (None = roots).
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<MediaFolder>> {
        let owner_id = ctx.require_user()?;
        self.folder_repo.list_children(owner_id, parent_id).await
    }

    /// Creates a media folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateMediaFolderRequest,
    ) -> AppResult<MediaFolder> {
        let owner_id = ctx.require_user()?;
        if req.name.trim().is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if let Some(parent_id) = req.parent_id {
            self.get_live_folder(owner_id, parent_id).await?;
        }

        let folder = self
            .folder_repo
            .create(&CreateMediaFolder {
                owner_id,
                name: req.name.trim().to_string(),
                color: req.color,
                icon: req.icon,
                parent_id: req.parent_id,
            })
            .await?;

        info!(user_id = %owner_id, media_folder_id = %folder.id, "Media folder created");
        Ok(folder)
    }

    /// Renames or restyles a media folder.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        name: Option<String>,
        color: Option<String>,
        icon: Option<String>,
    ) -> AppResult<MediaFolder> {
        let owner_id = ctx.require_user()?;
        let mut folder = self.get_live_folder(owner_id, id).await?;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Folder name cannot be empty"));
            }
            folder.name = name.trim().to_string();
        }
        if let Some(color) = color {
            folder.color = color;
        }
        if let Some(icon) = icon {
            folder.icon = icon;
        }

        let updated = self.folder_repo.update(&folder).await?;
        info!(user_id = %owner_id, media_folder_id = %id, "Media folder updated");
        Ok(updated)
    }

    /// Moves a media folder to the recycle bin, stamping the whole subtree
    /// (descendant folders and their live files) with one shared timestamp
    /// so restore can undo exactly this cascade.
    pub async fn soft_delete_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        self.get_live_folder(owner_id, id).await?;

        let subtree = self.folder_repo.subtree_ids(id, owner_id).await?;
        let stamp = Utc::now();
        let folders = self
            .folder_repo
            .cascade_soft_delete(owner_id, &subtree, stamp)
            .await?;
        let files = self
            .file_repo
            .cascade_soft_delete(owner_id, &subtree, stamp)
            .await?;

        info!(
            user_id = %owner_id,
            media_folder_id = %id,
            folders,
            files,
            "Media folder subtree moved to recycle bin"
        );
        Ok(())
    }

    /// Restores a media folder from the recycle bin, together with exactly
    /// the files and subfolders its deletion cascaded onto. Items deleted
    /// independently beforehand stay in the bin.
    pub async fn restore_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        let folder = self
            .folder_repo
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| AppError::not_found("Media folder not found"))?;
        let Some(stamp) = folder.deleted_at else {
            return Err(AppError::not_found("Media folder not found in recycle bin"));
        };

        let subtree = self.folder_repo.subtree_ids(id, owner_id).await?;
        let folders = self
            .folder_repo
            .cascade_restore(owner_id, &subtree, stamp)
            .await?;
        let files = self
            .file_repo
            .cascade_restore(owner_id, &subtree, stamp)
            .await?;

        info!(
            user_id = %owner_id,
            media_folder_id = %id,
            folders,
            files,
            "Media folder subtree restored"
        );
        Ok(())
    }

    /// Permanently deletes a media folder subtree: every descendant file
    /// row (blobs included) and folder row.
    pub async fn purge_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        self.purge_folder_for_owner(id, owner_id).await
    }

    /// Purge without a request context; shared with the retention worker.
    pub async fn purge_folder_for_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let subtree = self.folder_repo.subtree_ids(id, owner_id).await?;
        if subtree.is_empty() {
            return Err(AppError::not_found("Media folder not found"));
        }

        let removed_files = self.file_repo.purge_by_folders(owner_id, &subtree).await?;
        for file in &removed_files {
            self.delete_blob(file).await;
        }
        let removed_folders = self.folder_repo.purge_many(owner_id, &subtree).await?;

        info!(
            user_id = %owner_id,
            media_folder_id = %id,
            files = removed_files.len(),
            folders = removed_folders,
            "Media folder subtree permanently deleted"
        );
        Ok(())
    }

    async fn get_live_folder(&self, owner_id: Uuid, id: Uuid) -> AppResult<MediaFolder> {
        self.folder_repo
            .find_by_id(id, owner_id)
            .await?
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found("Media folder not found"))
    }

    /// Best-effort blob removal keyed off the stored URL.
    async fn delete_blob(&self, file: &MediaFile) {
        match file.object_key() {
            Some(key) => {
                if let Err(e) = self.storage.delete_object(key).await {
                    warn!(
                        media_file_id = %file.id,
                        key,
                        error = %e,
                        "Failed to delete media blob; row will be removed anyway"
                    );
                }
            }
            None => warn!(
                media_file_id = %file.id,
                url = %file.file_url,
                "Could not derive an object key from the stored URL"
            ),
        }
    }
}
