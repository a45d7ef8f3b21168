//! Snippet folder CRUD with per-owner name uniqueness.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use snipvault_core::error::{AppError, AppResult};
use snipvault_database::repositories::{FolderRepository, SnippetRepository};
use snipvault_entity::folder::{CreateFolder, Folder};

use crate::context::RequestContext;

/// Manages snippet folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    snippet_repo: Arc<SnippetRepository>,
}

/// Request to create a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Display color.
    pub color: String,
    /// Display icon name.
    pub icon: String,
}

/// Partial update for a folder. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFolderRequest {
    /// New name.
    pub name: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// New color.
    pub color: Option<String>,
    /// New icon.
    pub icon: Option<String>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folder_repo: Arc<FolderRepository>, snippet_repo: Arc<SnippetRepository>) -> Self {
        Self {
            folder_repo,
            snippet_repo,
        }
    }

    /// Lists the owner's live folders.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Folder>> {
        let owner_id = ctx.require_user()?;
        self.folder_repo.list(owner_id).await
    }

    /// Gets a live folder by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        let owner_id = ctx.require_user()?;
        self.folder_repo
            .find_by_id(id, owner_id)
            .await?
            .filter(|f| !f.is_deleted())
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Creates a folder; the name must be unique (case-insensitive) among
    /// the owner's live folders.
    pub async fn create(&self, ctx: &RequestContext, req: CreateFolderRequest) -> AppResult<Folder> {
        let owner_id = ctx.require_user()?;
        let name = valid_name(&req.name)?;

        if self
            .folder_repo
            .find_live_by_name(owner_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists"
            )));
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                owner_id,
                name,
                description: req.description,
                color: req.color,
                icon: req.icon,
            })
            .await?;

        info!(user_id = %owner_id, folder_id = %folder.id, "Folder created");
        Ok(folder)
    }

    /// Renames or restyles a folder.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateFolderRequest,
    ) -> AppResult<Folder> {
        let owner_id = ctx.require_user()?;
        let mut folder = self.get(ctx, id).await?;

        if let Some(name) = req.name {
            let name = valid_name(&name)?;
            let duplicate = self
                .folder_repo
                .find_live_by_name(owner_id, &name)
                .await?
                .is_some_and(|existing| existing.id != id);
            if duplicate {
                return Err(AppError::conflict(format!(
                    "A folder named '{name}' already exists"
                )));
            }
            folder.name = name;
        }
        if let Some(description) = req.description {
            folder.description = description;
        }
        if let Some(color) = req.color {
            folder.color = color;
        }
        if let Some(icon) = req.icon {
            folder.icon = icon;
        }

        let updated = self.folder_repo.update(&folder).await?;
        info!(user_id = %owner_id, folder_id = %id, "Folder updated");
        Ok(updated)
    }

    /// Moves a folder to the recycle bin. Contained snippets stay live and
    /// keep their folder assignment until the folder is purged.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.folder_repo.soft_delete(id, owner_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }
        info!(user_id = %owner_id, folder_id = %id, "Folder moved to recycle bin");
        Ok(())
    }

    /// Restores a folder from the recycle bin.
    pub async fn restore(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        if !self.folder_repo.restore(id, owner_id).await? {
            return Err(AppError::not_found("Folder not found in recycle bin"));
        }
        info!(user_id = %owner_id, folder_id = %id, "Folder restored");
        Ok(())
    }

    /// Permanently deletes a folder together with the snippets it contains.
    pub async fn purge(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        self.purge_for_owner(id, owner_id).await
    }

    /// Purge without a request context; shared with the retention worker.
    pub async fn purge_for_owner(&self, id: Uuid, owner_id: Uuid) -> AppResult<()> {
        let purged_snippets = self.snippet_repo.purge_by_folder(id, owner_id).await?;
        if !self.folder_repo.purge(id, owner_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }
        info!(
            user_id = %owner_id,
            folder_id = %id,
            purged_snippets,
            "Folder permanently deleted"
        );
        Ok(())
    }
}

fn valid_name(name: &str) -> AppResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    Ok(trimmed.to_string())
}
