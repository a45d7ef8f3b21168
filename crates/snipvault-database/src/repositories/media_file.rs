//! Media file repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_entity::media::{CreateMediaFile, MediaFile};

/// Repository for media file rows. Blob content is handled by the storage
/// layer; this only tracks metadata and lifecycle state.
#[derive(Debug, Clone)]
pub struct MediaFileRepository {
    pool: PgPool,
}

impl MediaFileRepository {
    /// Create a new media file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a media file by id and owner, regardless of delete state.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<MediaFile>> {
        sqlx::query_as::<_, MediaFile>(
            "SELECT * FROM media_files WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find media file", e))
    }

    /// List non-deleted media files for an owner, optionally scoped to a
    /// folder. `folder_id = None` lists files at the media root.
    pub async fn list(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<MediaFile>> {
        sqlx::query_as::<_, MediaFile>(
            "SELECT * FROM media_files \
             WHERE owner_id = $1 AND deleted_at IS NULL \
               AND media_folder_id IS NOT DISTINCT FROM $2 \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list media files", e))
    }

    /// List every non-deleted media file for an owner, across all folders.
    pub async fn list_all(&self, owner_id: Uuid) -> AppResult<Vec<MediaFile>> {
        sqlx::query_as::<_, MediaFile>(
            "SELECT * FROM media_files WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list media files", e))
    }

    /// Register a new media file row.
    pub async fn create(&self, data: &CreateMediaFile) -> AppResult<MediaFile> {
        sqlx::query_as::<_, MediaFile>(
            "INSERT INTO media_files \
                (owner_id, file_name, file_type, file_url, file_size, media_folder_id, tags, duration) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.file_name)
        .bind(data.file_type)
        .bind(&data.file_url)
        .bind(data.file_size)
        .bind(data.media_folder_id)
        .bind(&data.tags)
        .bind(data.duration)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create media file", e))
    }

    /// Write back mutable metadata fields (owner-scoped).
    pub async fn update(&self, file: &MediaFile) -> AppResult<MediaFile> {
        sqlx::query_as::<_, MediaFile>(
            "UPDATE media_files SET file_name = $3, media_folder_id = $4, tags = $5, \
                is_favorite = $6 \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(file.id)
        .bind(file.owner_id)
        .bind(&file.file_name)
        .bind(file.media_folder_id)
        .bind(&file.tags)
        .bind(file.is_favorite)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update media file", e))?
        .ok_or_else(|| AppError::not_found(format!("Media file {} not found", file.id)))
    }

    /// Toggle the favorite flag.
    pub async fn set_favorite(
        &self,
        id: Uuid,
        owner_id: Uuid,
        favorite: bool,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE media_files SET is_favorite = $3 \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .bind(favorite)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update favorite flag", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-delete a single media file.
    pub async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE media_files SET deleted_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete media file", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted media file.
    pub async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE media_files SET deleted_at = NULL \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to restore media file", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a media file row. The blob must be deleted by the
    /// caller using [`MediaFile::object_key`].
    pub async fn purge(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM media_files WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge media file", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Soft-deleted media files for an owner, excluding cascade victims:
    /// a file whose folder was deleted with the same timestamp is
    /// represented in the bin by that folder, not listed on its own.
    pub async fn find_deleted(&self, owner_id: Uuid) -> AppResult<Vec<MediaFile>> {
        sqlx::query_as::<_, MediaFile>(
            "SELECT f.* FROM media_files f \
             LEFT JOIN media_folders d ON d.id = f.media_folder_id \
             WHERE f.owner_id = $1 AND f.deleted_at IS NOT NULL \
               AND (d.id IS NULL OR d.deleted_at IS DISTINCT FROM f.deleted_at) \
             ORDER BY f.deleted_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list deleted media files", e)
        })
    }

    /// Stamp every live file in the given folders with the supplied
    /// timestamp as part of a folder cascade delete.
    pub async fn cascade_soft_delete(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
        deleted_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE media_files SET deleted_at = $3 \
             WHERE owner_id = $1 AND media_folder_id = ANY($2) AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .bind(folder_ids)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cascade-delete files", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Undo a cascade delete: restore only files whose `deleted_at` matches
    /// the folder's own cascade timestamp. Files deleted on their own before
    /// the cascade keep their state.
    pub async fn cascade_restore(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
        deleted_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE media_files SET deleted_at = NULL \
             WHERE owner_id = $1 AND media_folder_id = ANY($2) AND deleted_at = $3",
        )
        .bind(owner_id)
        .bind(folder_ids)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cascade-restore files", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Permanently delete every row in the given folders, returning the
    /// removed rows so blob keys can be cleaned up.
    pub async fn purge_by_folders(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
    ) -> AppResult<Vec<MediaFile>> {
        sqlx::query_as::<_, MediaFile>(
            "DELETE FROM media_files WHERE owner_id = $1 AND media_folder_id = ANY($2) \
             RETURNING *",
        )
        .bind(owner_id)
        .bind(folder_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to purge files by folder", e)
        })
    }

    /// Media files soft-deleted before the cutoff, across all owners.
    /// Cascade victims are excluded; their folder's purge removes them.
    pub async fn find_deleted_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<MediaFile>> {
        sqlx::query_as::<_, MediaFile>(
            "SELECT f.* FROM media_files f \
             LEFT JOIN media_folders d ON d.id = f.media_folder_id \
             WHERE f.deleted_at < $1 \
               AND (d.id IS NULL OR d.deleted_at IS DISTINCT FROM f.deleted_at)",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expired media files", e)
        })
    }
}
