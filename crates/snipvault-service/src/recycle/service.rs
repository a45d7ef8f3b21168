//! The recycle bin: one aggregate view over all five soft-deleted kinds.
//!
//! Bulk restore and purge are best-effort fan-outs, not transactions; one
//! failing item never rolls back the others, and the outcome reports every
//! item individually.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use snipvault_core::error::{AppError, AppResult};
use snipvault_database::repositories::{
    CategoryRepository, FolderRepository, MediaFileRepository, MediaFolderRepository,
    SnippetRepository,
};
use snipvault_entity::recycle::{RecycleBinContents, RecycleKind, RecycleSelector};

use crate::category::CategoryService;
use crate::context::RequestContext;
use crate::folder::FolderService;
use crate::media::MediaService;

/// Aggregates the recycle bin across all entity kinds.
#[derive(Debug, Clone)]
pub struct RecycleService {
    snippet_repo: Arc<SnippetRepository>,
    folder_repo: Arc<FolderRepository>,
    category_repo: Arc<CategoryRepository>,
    media_file_repo: Arc<MediaFileRepository>,
    media_folder_repo: Arc<MediaFolderRepository>,
    folder_service: Arc<FolderService>,
    category_service: Arc<CategoryService>,
    media_service: Arc<MediaService>,
}

/// One failed item in a bulk operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedItem {
    /// The item that failed.
    pub selector: RecycleSelector,
    /// Why it failed.
    pub error: String,
}

/// Per-item result of a bulk restore or purge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Items that went through.
    pub succeeded: Vec<RecycleSelector>,
    /// Items that failed, with reasons.
    pub failed: Vec<FailedItem>,
}

impl BulkOutcome {
    /// Whether every item went through.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Record one item's result. Failures are kept alongside successes;
    /// nothing already recorded is rolled back.
    pub fn record(&mut self, item: RecycleSelector, result: AppResult<()>) {
        match result {
            Ok(()) => self.succeeded.push(item),
            Err(e) => self.failed.push(FailedItem {
                selector: item,
                error: e.message,
            }),
        }
    }
}

/// Row counts removed by one retention sweep.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RetentionReport {
    /// Purged snippets.
    pub snippets: u64,
    /// Purged snippet folders.
    pub folders: u64,
    /// Purged categories.
    pub categories: u64,
    /// Purged media files.
    pub media_files: u64,
    /// Purged media folder subtrees.
    pub media_folders: u64,
}

impl RetentionReport {
    /// Total purged rows (media-folder subtrees counted once).
    pub fn total(&self) -> u64 {
        self.snippets + self.folders + self.categories + self.media_files + self.media_folders
    }
}

impl RecycleService {
    /// Creates a new recycle bin service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        snippet_repo: Arc<SnippetRepository>,
        folder_repo: Arc<FolderRepository>,
        category_repo: Arc<CategoryRepository>,
        media_file_repo: Arc<MediaFileRepository>,
        media_folder_repo: Arc<MediaFolderRepository>,
        folder_service: Arc<FolderService>,
        category_service: Arc<CategoryService>,
        media_service: Arc<MediaService>,
    ) -> Self {
        Self {
            snippet_repo,
            folder_repo,
            category_repo,
            media_file_repo,
            media_folder_repo,
            folder_service,
            category_service,
            media_service,
        }
    }

    /// The full grouped view of the owner's recycle bin.
    pub async fn contents(&self, ctx: &RequestContext) -> AppResult<RecycleBinContents> {
        let owner_id = ctx.require_user()?;
        let snippets = self.snippet_repo.find_deleted(owner_id).await?;
        let folders = self.folder_repo.find_deleted(owner_id).await?;
        let categories = self.category_repo.find_deleted(owner_id).await?;
        let media_files = self.media_file_repo.find_deleted(owner_id).await?;
        let media_folders = self.media_folder_repo.find_deleted_roots(owner_id).await?;
        Ok(RecycleBinContents::new(
            snippets,
            folders,
            categories,
            media_files,
            media_folders,
        ))
    }

    /// Restores one item by kind and id.
    pub async fn restore(&self, ctx: &RequestContext, item: RecycleSelector) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        match item.kind {
            RecycleKind::Snippet => self.restore_row(
                self.snippet_repo.restore(item.id, owner_id).await?,
                "Snippet",
            ),
            RecycleKind::Folder => self.restore_row(
                self.folder_repo.restore(item.id, owner_id).await?,
                "Folder",
            ),
            RecycleKind::Category => self.restore_row(
                self.category_repo.restore(item.id, owner_id).await?,
                "Category",
            ),
            RecycleKind::MediaFile => self.restore_row(
                self.media_file_repo.restore(item.id, owner_id).await?,
                "Media file",
            ),
            RecycleKind::MediaFolder => self.media_service.restore_folder(ctx, item.id).await,
        }?;
        info!(user_id = %owner_id, kind = %item.kind, id = %item.id, "Recycle bin item restored");
        Ok(())
    }

    /// Permanently deletes one item by kind and id.
    pub async fn purge(&self, ctx: &RequestContext, item: RecycleSelector) -> AppResult<()> {
        let owner_id = ctx.require_user()?;
        match item.kind {
            RecycleKind::Snippet => {
                if !self.snippet_repo.purge(item.id, owner_id).await? {
                    return Err(AppError::not_found("Snippet not found"));
                }
                Ok(())
            }
            RecycleKind::Folder => self.folder_service.purge_for_owner(item.id, owner_id).await,
            RecycleKind::Category => {
                self.category_service
                    .purge_for_owner(item.id, owner_id)
                    .await
            }
            RecycleKind::MediaFile => self.media_service.purge_file(ctx, item.id).await,
            RecycleKind::MediaFolder => {
                self.media_service
                    .purge_folder_for_owner(item.id, owner_id)
                    .await
            }
        }?;
        info!(user_id = %owner_id, kind = %item.kind, id = %item.id, "Recycle bin item purged");
        Ok(())
    }

    /// Restores many items, best-effort.
    pub async fn restore_bulk(
        &self,
        ctx: &RequestContext,
        items: Vec<RecycleSelector>,
    ) -> AppResult<BulkOutcome> {
        ctx.require_user()?;
        let mut outcome = BulkOutcome::default();
        for item in items {
            let result = self.restore(ctx, item).await;
            outcome.record(item, result);
        }
        Ok(outcome)
    }

    /// Purges many items, best-effort.
    pub async fn purge_bulk(
        &self,
        ctx: &RequestContext,
        items: Vec<RecycleSelector>,
    ) -> AppResult<BulkOutcome> {
        ctx.require_user()?;
        let mut outcome = BulkOutcome::default();
        for item in items {
            let result = self.purge(ctx, item).await;
            outcome.record(item, result);
        }
        Ok(outcome)
    }

    /// Empties the owner's recycle bin (best-effort purge of everything).
    pub async fn clear(&self, ctx: &RequestContext) -> AppResult<BulkOutcome> {
        let contents = self.contents(ctx).await?;
        self.purge_bulk(ctx, contents.selectors()).await
    }

    /// Purges every row soft-deleted before the cutoff, across all owners.
    /// Called by the retention worker; item failures are logged and skipped.
    pub async fn purge_expired(&self, cutoff: DateTime<Utc>) -> AppResult<RetentionReport> {
        let mut report = RetentionReport::default();

        report.snippets = self.snippet_repo.purge_deleted_before(cutoff).await?;

        for folder in self.folder_repo.find_deleted_before(cutoff).await? {
            match self
                .folder_service
                .purge_for_owner(folder.id, folder.owner_id)
                .await
            {
                Ok(()) => report.folders += 1,
                Err(e) => warn!(folder_id = %folder.id, error = %e, "Retention purge failed"),
            }
        }

        for category in self.category_repo.find_deleted_before(cutoff).await? {
            match self
                .category_service
                .purge_for_owner(category.id, category.owner_id)
                .await
            {
                Ok(()) => report.categories += 1,
                Err(e) => warn!(category_id = %category.id, error = %e, "Retention purge failed"),
            }
        }

        for file in self.media_file_repo.find_deleted_before(cutoff).await? {
            match self.media_service.purge_file_row(&file).await {
                Ok(()) => report.media_files += 1,
                Err(e) => warn!(media_file_id = %file.id, error = %e, "Retention purge failed"),
            }
        }

        for folder in self
            .media_folder_repo
            .find_deleted_roots_before(cutoff)
            .await?
        {
            match self
                .media_service
                .purge_folder_for_owner(folder.id, folder.owner_id)
                .await
            {
                Ok(()) => report.media_folders += 1,
                Err(e) => {
                    warn!(media_folder_id = %folder.id, error = %e, "Retention purge failed")
                }
            }
        }

        Ok(report)
    }

    fn restore_row(&self, restored: bool, what: &str) -> AppResult<()> {
        if restored {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "{what} not found in recycle bin"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn selector(kind: RecycleKind) -> RecycleSelector {
        RecycleSelector {
            kind,
            id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_bulk_outcome_keeps_successes_alongside_failures() {
        let ok = selector(RecycleKind::Snippet);
        let bad = selector(RecycleKind::Folder);
        let ok_too = selector(RecycleKind::Category);

        let mut outcome = BulkOutcome::default();
        outcome.record(ok, Ok(()));
        outcome.record(bad, Err(AppError::not_found("Folder not found")));
        outcome.record(ok_too, Ok(()));

        assert!(!outcome.all_succeeded());
        assert_eq!(outcome.succeeded, vec![ok, ok_too]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].selector, bad);
        assert_eq!(outcome.failed[0].error, "Folder not found");
    }
}
