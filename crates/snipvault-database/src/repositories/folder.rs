//! Snippet folder repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_entity::folder::{CreateFolder, Folder};

use super::map_name_conflict;

const NAME_INDEX: &str = "folders_owner_name_live_idx";

/// Repository for snippet folder CRUD and lifecycle queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a folder by id and owner, regardless of delete state.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    /// Find a live folder by name, case-insensitively. Soft-deleted rows do
    /// not count toward name uniqueness.
    pub async fn find_live_by_name(&self, owner_id: Uuid, name: &str) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE owner_id = $1 AND LOWER(name) = LOWER($2) AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder by name", e))
    }

    /// List non-deleted folders for an owner.
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND deleted_at IS NULL ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    /// Create a new folder.
    pub async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (owner_id, name, description, color, icon) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.color)
        .bind(&data.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_name_conflict(
                e,
                NAME_INDEX,
                format!("A folder named '{}' already exists", data.name),
                "Failed to create folder",
            )
        })
    }

    /// Write back folder display fields (owner-scoped).
    pub async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $3, description = $4, color = $5, icon = $6, \
                updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(folder.id)
        .bind(folder.owner_id)
        .bind(&folder.name)
        .bind(&folder.description)
        .bind(&folder.color)
        .bind(&folder.icon)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_name_conflict(
                e,
                NAME_INDEX,
                format!("A folder named '{}' already exists", folder.name),
                "Failed to update folder",
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    /// Soft-delete a folder.
    pub async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE folders SET deleted_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete folder", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted folder. Conflicts when a live folder has
    /// since taken the same name.
    pub async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE folders SET deleted_at = NULL \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_name_conflict(
                e,
                NAME_INDEX,
                "A folder with the same name already exists",
                "Failed to restore folder",
            )
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a folder row. Child snippets must already be
    /// purged by the caller.
    pub async fn purge(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to purge folder", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// All soft-deleted folders for an owner.
    pub async fn find_deleted(&self, owner_id: Uuid) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND deleted_at IS NOT NULL \
             ORDER BY deleted_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list deleted folders", e)
        })
    }

    /// Folders soft-deleted before the cutoff, across all owners (retention
    /// sweep).
    pub async fn find_deleted_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE deleted_at < $1")
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find expired folders", e)
            })
    }
}
