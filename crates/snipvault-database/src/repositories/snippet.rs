//! Snippet repository implementation.
//!
//! Every query is scoped by `owner_id`; listings exclude soft-deleted rows
//! unless the method says otherwise.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult, ErrorKind};
use snipvault_core::types::pagination::{PageRequest, PageResponse};
use snipvault_core::types::sorting::SortDirection;
use snipvault_entity::snippet::{CreateSnippet, Snippet, SnippetFilter, SnippetSortKey};

/// Repository for snippet CRUD and soft-delete lifecycle queries.
#[derive(Debug, Clone)]
pub struct SnippetRepository {
    pool: PgPool,
}

impl SnippetRepository {
    /// Create a new snippet repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a snippet by id and owner, regardless of delete state.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>("SELECT * FROM snippets WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find snippet", e))
    }

    /// Find a publicly shared snippet by id alone (no owner scope).
    pub async fn find_public(&self, id: Uuid) -> AppResult<Option<Snippet>> {
        sqlx::query_as::<_, Snippet>(
            "SELECT * FROM snippets WHERE id = $1 AND is_public AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find public snippet", e)
        })
    }

    /// All non-deleted snippets for an owner, oldest first (export order).
    pub async fn find_all(&self, owner_id: Uuid) -> AppResult<Vec<Snippet>> {
        sqlx::query_as::<_, Snippet>(
            "SELECT * FROM snippets WHERE owner_id = $1 AND deleted_at IS NULL \
             ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list snippets", e))
    }

    /// List non-deleted snippets for an owner with filters, sort, and
    /// pagination.
    pub async fn list(
        &self,
        owner_id: Uuid,
        filter: &SnippetFilter,
        sort_key: SnippetSortKey,
        direction: SortDirection,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Snippet>> {
        let mut count_qb: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM snippets");
        push_list_where(&mut count_qb, owner_id, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count snippets", e)
            })?;

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM snippets");
        push_list_where(&mut qb, owner_id, filter);
        qb.push(" ORDER BY ")
            .push(sort_key.as_column())
            .push(" ")
            .push(direction.as_sql())
            .push(" LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let snippets = qb
            .build_query_as::<Snippet>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list snippets", e)
            })?;

        Ok(PageResponse::new(
            snippets,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new snippet.
    pub async fn create(&self, data: &CreateSnippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "INSERT INTO snippets \
                (owner_id, title, description, code, language, tags, is_public, \
                 folder_id, category_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.code)
        .bind(&data.language)
        .bind(&data.tags)
        .bind(data.is_public)
        .bind(data.folder_id)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create snippet", e))
    }

    /// Write back a full snippet row (owner-scoped).
    pub async fn update(&self, snippet: &Snippet) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET \
                title = $3, description = $4, code = $5, language = $6, tags = $7, \
                is_public = $8, is_favorite = $9, folder_id = $10, category_id = $11, \
                updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(snippet.id)
        .bind(snippet.owner_id)
        .bind(&snippet.title)
        .bind(&snippet.description)
        .bind(&snippet.code)
        .bind(&snippet.language)
        .bind(&snippet.tags)
        .bind(snippet.is_public)
        .bind(snippet.is_favorite)
        .bind(snippet.folder_id)
        .bind(snippet.category_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update snippet", e))?
        .ok_or_else(|| AppError::not_found(format!("Snippet {} not found", snippet.id)))
    }

    /// Toggle the favorite flag.
    pub async fn set_favorite(
        &self,
        id: Uuid,
        owner_id: Uuid,
        is_favorite: bool,
    ) -> AppResult<Snippet> {
        sqlx::query_as::<_, Snippet>(
            "UPDATE snippets SET is_favorite = $3, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(is_favorite)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to set favorite", e))?
        .ok_or_else(|| AppError::not_found(format!("Snippet {id} not found")))
    }

    /// Soft-delete a snippet. Returns false when no live row matched.
    pub async fn soft_delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE snippets SET deleted_at = NOW() \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to soft-delete snippet", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted snippet.
    pub async fn restore(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE snippets SET deleted_at = NULL \
             WHERE id = $1 AND owner_id = $2 AND deleted_at IS NOT NULL",
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore snippet", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Permanently remove a snippet row.
    pub async fn purge(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM snippets WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge snippet", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// All soft-deleted snippets for an owner (recycle-bin view).
    pub async fn find_deleted(&self, owner_id: Uuid) -> AppResult<Vec<Snippet>> {
        sqlx::query_as::<_, Snippet>(
            "SELECT * FROM snippets WHERE owner_id = $1 AND deleted_at IS NOT NULL \
             ORDER BY deleted_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list deleted snippets", e)
        })
    }

    /// Permanently remove every snippet referencing a folder, regardless of
    /// delete state. Used by folder purge so no dangling `folder_id` can
    /// survive.
    pub async fn purge_by_folder(&self, folder_id: Uuid, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM snippets WHERE folder_id = $1 AND owner_id = $2")
            .bind(folder_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge folder snippets", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Reassign every snippet in a category to "none". Runs before the
    /// category row is removed so no snippet retains a dead reference.
    pub async fn clear_category(&self, category_id: Uuid, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE snippets SET category_id = NULL, updated_at = NOW() \
             WHERE category_id = $1 AND owner_id = $2",
        )
        .bind(category_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to clear snippet category", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Remove snippets soft-deleted before the cutoff, across all owners.
    /// Retention sweep only.
    pub async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM snippets WHERE deleted_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to purge expired snippets", e)
            })?;
        Ok(result.rows_affected())
    }
}

/// Append the shared WHERE clause for list/count queries.
fn push_list_where(qb: &mut QueryBuilder<'_, Postgres>, owner_id: Uuid, filter: &SnippetFilter) {
    qb.push(" WHERE owner_id = ")
        .push_bind(owner_id)
        .push(" AND deleted_at IS NULL");

    if let Some(folder_id) = filter.folder_id {
        qb.push(" AND folder_id = ").push_bind(folder_id);
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ").push_bind(category_id);
    }
    if let Some(language) = &filter.language {
        qb.push(" AND language = ").push_bind(language.clone());
    }
    if let Some(tag) = &filter.tag {
        qb.push(" AND tags @> ARRAY[")
            .push_bind(tag.clone())
            .push("]");
    }
    if filter.favorites_only {
        qb.push(" AND is_favorite");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", search.replace('%', "\\%").replace('_', "\\_"));
        qb.push(" AND (title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR code ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}
