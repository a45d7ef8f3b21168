//! Category CRUD with per-owner name uniqueness and reordering.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult};
use snipvault_database::repositories::{CategoryRepository, SnippetRepository};
use snipvault_entity::category::{Category, CreateCategory};

use crate::context::RequestContext;

/// Manages category CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryService {
    category_repo: Arc<CategoryRepository>,
    snippet_repo: Arc<SnippetRepository>,
}

/// Request to create a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    /// Category display name.
    pub name: String,
    /// Display color.
    pub color: String,
    /// Display icon name.
    pub icon: String,
}

/// Partial update for a category. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategoryRequest {
    /// New name.
    pub name: Option<String>,
    /// New color.
    pub color: Option<String>,
    /// New icon.
    pub icon: Option<String>,
    /// New manual ordering position.
    pub sort_order: Option<i32>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(
        category_repo: Arc<CategoryRepository>,
        snippet_repo: Arc<SnippetRepository>,
    ) -> Self {
        Self {
            category_repo,
            snippet_repo,
        }
    }

    /// Lists the owner's live categories in manual order.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Category>> {
        let owner_id = ctx.require_user()?;
        self.category_repo.list(owner_id).await
    }

    /// Gets a live category by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Category> {
        let owner_id = ctx.require_user()?;
        self.category_repo
            .find_by_id(id, owner_id)
            .await?
            .filter(|c| !c.is_deleted())
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    /// Creates a category; the name must be unique (case-insensitive) among
    /// the owner's live categories.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateCategoryRequest,
    ) -> AppResult<Category> {
        let owner_id = ctx.require_user()?;
        let name = valid_name(&req.name)?;

        if self
            .category_repo
            .find_live_by_name(owner_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A category named '{name}' already exists"
            )));
        }

        let category = self
            .category_repo
            .create(&CreateCategory {
                owner_id,
                name,
                color: req.color,
                icon: req.icon,
            })
            .await?;

        info!(user_id = %owner_id, category_id = %category.id, "Category created");
        Ok(category)
    }

    /// Renames, restyles, or reorders a category.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateCategoryRequest,
    ) -> AppResult<Category> {
        let owner_id = ctx.require_user()?;
        let mut category = self.get(ctx, id).await?;

        if let Some(name) = req.name {
            let name = valid_name(&name)?;
            let duplicate = self
                .category_repo
                .find_live_by_name(owner_id, &name)
                .await?
                .is_some_and(|existing| existing.id != id);
            if duplicate {
                return Err(AppError::conflict(format!(
                    "A category named '{name}' already exists"
                )));
            }
            category.name = name;
        }
        if let Some(color) = req.color {
            category.color = color;
        }
        if let Some(icon) = req.icon {
            category.icon = icon;
        }
        if let Some(sort_order) = req.sort_order {
            category.sort_order = sort_order;
        }

        let updated = self.category_repo.update(&category).await?;
        info!(user_id = %owner_id, category_id = %id, "Category updated");
        Ok(updated)
    }

    /// Moves a category to the recycle bin. Snippet assignments are kept
    /// until the category is purged.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.category_repo.soft_delete(id, owner_id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        info!(user_id = %owner_id, category_id = %id, "Category moved to recycle bin");
        Ok(())
    }

    /// Restores a category from the recycle bin.
    pub async fn restore(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.category_repo.restore(id, owner_id).await? {
            return Err(AppError::not_found("Category not found in recycle bin"));
        }
        info!(user_id = %owner_id, category_id = %id, "Category restored");
        Ok(())
    }

    /// Permanently deletes a category, detaching every snippet that still
    /// references it first.
    pub async fn purge(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        self.purge_for_owner(id, owner_id).await
    }

    /// Purge without a request context; shared with the retention worker.
    pub async fn purge_for_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let detached = self.snippet_repo.clear_category(id, owner_id).await?;
        if !self.category_repo.purge(id, owner_id).await? {
            return Err(AppError::not_found("Category not found"));
        }
        info!(
            user_id = %owner_id,
            category_id = %id,
            detached_snippets = detached,
            "Category permanently deleted"
        );
        Ok(())
    }
}

fn valid_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Category name cannot be empty"));
    }
    Ok(trimmed.to_string())
}
