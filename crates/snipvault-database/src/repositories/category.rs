//! Category repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_entity::category::{Category, CreateCategory};

use super::map_name_conflict;

const NAME_INDEX: &str = "categories_owner_name_live_idx";

/// Repository for snippet category CRUD and lifecycle queries.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    /// Create a new category repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a category by id and owner, regardless of delete state.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find category", e))
    }

    /// Find a live category by name, case-insensitively.
    pub async fn find_live_by_name(
        &self,
        owner_id: Uuid,
        name: &str,
    ) -> AppResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories \
             WHERE owner_id = $1 AND LOWER(name) = LOWER($2) AND deleted_at IS NULL",
        )
        .bind(owner_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find category by name", e)
        })
    }

    /// List non-deleted categories for an owner, ordered by sort position
    /// then name.
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY sort_order ASC, name ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list categories", e))
    }

    /// Create a new category at the end of the owner's sort order.
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (owner_id, name, color, icon, sort_order) \
             VALUES ($1, $2, $3, $4, \
                (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM categories c WHERE c.owner_id = $1)) \
             RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.color)
        .bind(&data.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_name_conflict(
                e,
                NAME_INDEX,
                format!("A category named '{}' already exists", data.name),
                "Failed to create category",
            )
        })
    }

    /// Write back category display fields (owner-scoped).
    pub async fn update(&self, category: &Category) -> AppResult<Category> {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $3, color = $4, icon = $5, sort_order = $6, \
                updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(category.id)
        .bind(category.owner_id)
        .bind(&category.name)
        .bind(&category.color)
        .bind(&category.icon)
        .bind(category.sort_order)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            map_name_conflict(
                e,
                NAME_INDEX,
                format!("A category named '{}' already exists", category.name),
                "Failed to update category",
            )
        })?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", category.id)))
    }

    /// Soft-delete a category.
    pub async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete category", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted category. Conflicts when a live category has
    /// since taken the same name.
    pub async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = NULL \
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
                "A category with the same name already exists",
                "Failed to restore category",
            )
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a category row. Snippets referencing it must be
    /// detached by the caller first.
    pub async fn purge(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge category", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// All soft-deleted categories for an owner.
    pub async fn find_deleted(&self, owner_id: Uuid) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categories WHERE owner_id = $1 AND deleted_at IS NOT NULL \
             ORDER BY deleted_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list deleted categories", e)
        })
    }

    /// Categories soft-deleted before the cutoff, across all owners.
    pub async fn find_deleted_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE deleted_at < $1")
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find expired categories", e)
            })
    }
}
