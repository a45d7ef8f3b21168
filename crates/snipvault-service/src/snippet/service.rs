//! Snippet CRUD with ownership checks and lifecycle transitions.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult};
use snipvault_core::types::{PageRequest, PageResponse, SortDirection};
use snipvault_database::repositories::{CategoryRepository, FolderRepository, SnippetRepository};
use snipvault_entity::snippet::{
    CreateSnippet, Snippet, SnippetFilter, SnippetSortKey, UpdateSnippet,
};

use crate::context::RequestContext;

/// Maximum snippet title length.
const MAX_TITLE_LEN: usize = 120;

/// Manages snippet CRUD operations.
#[derive(Debug, Clone)]
pub struct SnippetService {
    snippet_repo: Arc<SnippetRepository>,
    folder_repo: Arc<FolderRepository>,
    category_repo: Arc<CategoryRepository>,
}

impl SnippetService {
    /// Creates a new snippet service.
    pub fn new(
        snippet_repo: Arc<SnippetRepository>,
        folder_repo: Arc<FolderRepository>,
        category_repo: Arc<CategoryRepository>,
    ) -> Self {
        Self {
            snippet_repo,
            folder_repo,
            category_repo,
        }
    }

    /// Lists non-deleted snippets with filters, sorting, and pagination.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &SnippetFilter,
        sort_key: SnippetSortKey,
        direction: SortDirection,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Snippet>> {
        let owner_id = ctx.require_user()?;
        self.snippet_repo
            .list(owner_id, filter, sort_key, direction, page)
            .await
    }

    /// Gets a non-deleted snippet by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Snippet> {
        let owner_id = ctx.require_user()?;
        let snippet = self
            .snippet_repo
            .find_by_id(id, owner_id)
            .await?
            .filter(|s| !s.is_deleted())
            .ok_or_else(|| AppError::not_found("Snippet not found"))?;
        Ok(snippet)
    }

    /// Serves a snippet without authentication iff it is public and live.
    pub async fn get_public(&self, id: Uuid) -> AppResult<Snippet> {
        self.snippet_repo
            .find_public(id)
            .await?
            .ok_or_else(|| AppError::not_found("Snippet not found"))
    }

    /// Creates a new snippet.
    pub async fn create(&self, ctx: &RequestContext, mut data: CreateSnippet) -> AppResult<Snippet> {
        let owner_id = ctx.require_user()?;
        data.owner_id = owner_id;
        validate_title(&data.title)?;
        if data.language.trim().is_empty() {
            return Err(AppError::validation("Language cannot be empty"));
        }
        data.tags = normalize_tags(data.tags);

        self.check_folder(owner_id, data.folder_id).await?;
        self.check_category(owner_id, data.category_id).await?;

        let snippet = self.snippet_repo.create(&data).await?;
        info!(user_id = %owner_id, snippet_id = %snippet.id, "Snippet created");
        Ok(snippet)
    }

    /// Applies a partial update to an existing snippet.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        changes: UpdateSnippet,
    ) -> AppResult<Snippet> {
        let owner_id = ctx.require_user()?;
        let mut snippet = self.get(ctx, id).await?;

        if let Some(title) = changes.title {
            validate_title(&title)?;
            snippet.title = title;
        }
        if let Some(description) = changes.description {
            snippet.description = description;
        }
        if let Some(code) = changes.code {
            snippet.code = code;
        }
        if let Some(language) = changes.language {
            if language.trim().is_empty() {
                return Err(AppError::validation("Language cannot be empty"));
            }
            snippet.language = language;
        }
        if let Some(tags) = changes.tags {
            snippet.tags = normalize_tags(tags);
        }
        if let Some(is_public) = changes.is_public {
            snippet.is_public = is_public;
        }
        if let Some(folder_id) = changes.folder_id {
            self.check_folder(owner_id, folder_id).await?;
            snippet.folder_id = folder_id;
        }
        if let Some(category_id) = changes.category_id {
            self.check_category(owner_id, category_id).await?;
            snippet.category_id = category_id;
        }
        snippet.updated_at = Utc::now();

        let updated = self.snippet_repo.update(&snippet).await?;
        info!(user_id = %owner_id, snippet_id = %id, "Snippet updated");
        Ok(updated)
    }

    /// Sets the favorite flag.
    pub async fn set_favorite(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        favorite: bool,
    ) -> AppResult<Snippet> {
        let owner_id = ctx.require_user()?;
        let snippet = self.snippet_repo.set_favorite(id, owner_id, favorite).await?;
        info!(user_id = %owner_id, snippet_id = %id, favorite, "Snippet favorite flag set");
        Ok(snippet)
    }

    /// Moves a snippet to the recycle bin.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.snippet_repo.soft_delete(id, owner_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }
        info!(user_id = %owner_id, snippet_id = %id, "Snippet moved to recycle bin");
        Ok(())
    }

    /// Restores a snippet from the recycle bin.
    pub async fn restore(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.snippet_repo.restore(id, owner_id).await? {
            return Err(AppError::not_found("Snippet not found in recycle bin"));
        }
        info!(user_id = %owner_id, snippet_id = %id, "Snippet restored");
        Ok(())
    }

    /// Permanently deletes a snippet.
    pub async fn purge(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.snippet_repo.purge(id, owner_id).await? {
            return Err(AppError::not_found("Snippet not found"));
        }
        info!(user_id = %owner_id, snippet_id = %id, "Snippet permanently deleted");
        Ok(())
    }

    /// Rejects a folder assignment unless the folder exists and is live.
    async fn check_folder(&self, owner_id: Uuid, folder_id: Option<Uuid>) -> AppResult<()> {
        if let Some(folder_id) = folder_id {
            self.folder_repo
                .find_by_id(folder_id, owner_id)
                .await?
                .filter(|f| !f.is_deleted())
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
        }
        Ok(())
    }

    /// Rejects a category assignment unless the category exists and is live.
    async fn check_category(&self, owner_id: Uuid, category_id: Option<Uuid>) -> AppResult<()> {
        if let Some(category_id) = category_id {
            self.category_repo
                .find_by_id(category_id, owner_id)
                .await?
                .filter(|c| !c.is_deleted())
                .ok_or_else(|| AppError::not_found("Category not found"))?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> AppResult<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Title cannot be empty"));
    }
    if trimmed.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::validation(format!(
            "Title cannot exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(())
}

/// Trims tags, drops empties, and collapses an empty list to `None`.
fn normalize_tags(tags: Option<Vec<String>>) -> Option<Vec<String>> {
    let tags: Vec<String> = tags?
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipvault_entity::principal::SessionPrincipal;
    use sqlx::postgres::PgPoolOptions;

    fn service_with_lazy_pool() -> SnippetService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:5432/snipvault_test")
            .unwrap();
        SnippetService::new(
            Arc::new(SnippetRepository::new(pool.clone())),
            Arc::new(FolderRepository::new(pool.clone())),
            Arc::new(CategoryRepository::new(pool)),
        )
    }

    #[tokio::test]
    async fn test_set_favorite_requires_a_user() {
        let service = service_with_lazy_pool();
        let ctx = RequestContext::new(SessionPrincipal::Anonymous);
        let err = service
            .set_favorite(&ctx, Uuid::new_v4(), true)
            .await
            .unwrap_err();
        assert_eq!(err.kind, snipvault_core::ErrorKind::Unauthorized);
    }

    #[test]
    fn test_title_validation() {
        assert!(validate_title("hello").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(121)).is_err());
        assert!(validate_title(&"x".repeat(120)).is_ok());
    }

    #[test]
    fn test_tag_normalization() {
        assert_eq!(normalize_tags(None), None);
        assert_eq!(normalize_tags(Some(vec!["  ".into(), "".into()])), None);
        assert_eq!(
            normalize_tags(Some(vec![" rust ".into(), "async".into()])),
            Some(vec!["rust".into(), "async".into()])
        );
    }
}
