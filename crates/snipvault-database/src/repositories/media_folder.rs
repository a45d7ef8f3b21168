//! Media folder repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_entity::media::{CreateMediaFolder, MediaFolder};

/// Repository for the media folder tree.
#[derive(Debug, Clone)]
pub struct MediaFolderRepository {
    pool: PgPool,
}

impl MediaFolderRepository {
    /// Create a new media folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a media folder by id and owner, regardless of delete state.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>(
            "SELECT * FROM media_folders WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find media folder", e))
    }

    /// List live children of a parent folder (None for roots).
    pub async fn list_children(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>(
            "SELECT * FROM media_folders \
             WHERE owner_id = $1 AND deleted_at IS NULL \
               AND parent_id IS NOT DISTINCT FROM $2 \
             ORDER BY name ASC",
        )
        .bind(owner_id)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list media folders", e))
    }

    /// Create a new media folder.
    pub async fn create(&self, data: &CreateMediaFolder) -> AppResult<MediaFolder> {
        sqlx::query_as::<_, MediaFolder>(
            "INSERT INTO media_folders (owner_id, name, color, icon, parent_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.color)
        .bind(&data.icon)
        .bind(data.parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create media folder", e)
        })
    }

    /// Write back display fields and parent (owner-scoped).
    pub async fn update(&self, folder: &MediaFolder) -> AppResult<MediaFolder> {
        sqlx::query_as::<_, MediaFolder>(
            "UPDATE media_folders SET name = $3, color = $4, icon = $5, parent_id = $6 \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(folder.id)
        .bind(folder.owner_id)
        .bind(&folder.name)
        .bind(&folder.color)
        .bind(&folder.icon)
        .bind(folder.parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update media folder", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Media folder {} not found", folder.id)))
    }

    /// Collect the ids of a folder and every descendant, regardless of
    /// delete state. Cascade operations run against this set.
    pub async fn subtree_ids(&self, id: Uuid, owner_id: Uuid) -> AppResult<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "WITH RECURSIVE subtree AS ( \
                SELECT id FROM media_folders WHERE id = $1 AND owner_id = $2 \
                UNION ALL \
                SELECT f.id FROM media_folders f \
                JOIN subtree s ON f.parent_id = s.id \
             ) SELECT id FROM subtree",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to collect folder subtree", e)
        })?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Stamp every live folder in the set with the supplied cascade
    /// timestamp.
    pub async fn cascade_soft_delete(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
        deleted_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE media_folders SET deleted_at = $3 \
             WHERE owner_id = $1 AND id = ANY($2) AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .bind(folder_ids)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cascade-delete folders", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Restore folders in the set whose `deleted_at` matches the cascade
    /// timestamp. Folders deleted separately beforehand keep their state.
    pub async fn cascade_restore(
        &self,
        owner_id: Uuid,
        folder_ids: &[Uuid],
        deleted_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE media_folders SET deleted_at = NULL \
             WHERE owner_id = $1 AND id = ANY($2) AND deleted_at = $3",
        )
        .bind(owner_id)
        .bind(folder_ids)
        .bind(deleted_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to cascade-restore folders", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Permanently remove every folder in the set.
    pub async fn purge_many(&self, owner_id: Uuid, folder_ids: &[Uuid]) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM media_folders WHERE owner_id = $1 AND id = ANY($2)")
            .bind(owner_id)
            .bind(folder_ids)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge media folders", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Soft-deleted media folders for an owner whose *parent* is not also
    /// deleted with the same cascade. The recycle bin shows subtree roots
    /// only, so cascaded children are filtered out.
    pub async fn find_deleted_roots(&self, owner_id: Uuid) -> AppResult<Vec<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>(
            "SELECT f.* FROM media_folders f \
             LEFT JOIN media_folders p ON p.id = f.parent_id \
             WHERE f.owner_id = $1 AND f.deleted_at IS NOT NULL \
               AND (p.id IS NULL OR p.deleted_at IS DISTINCT FROM f.deleted_at) \
             ORDER BY f.deleted_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list deleted media folders", e)
        })
    }

    /// Deleted subtree roots older than the cutoff, across all owners.
    pub async fn find_deleted_roots_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> AppResult<Vec<MediaFolder>> {
        sqlx::query_as::<_, MediaFolder>(
            "SELECT f.* FROM media_folders f \
             LEFT JOIN media_folders p ON p.id = f.parent_id \
             WHERE f.deleted_at < $1 \
               AND (p.id IS NULL OR p.deleted_at IS DISTINCT FROM f.deleted_at)",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expired media folders", e)
        })
    }
}
