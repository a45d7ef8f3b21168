//! Import/export orchestration over the snippet table.

use std::sync::Arc;

use tracing::info;

use snipvault_core::error::AppResult;
use snipvault_database::repositories::SnippetRepository;
use snipvault_entity::snippet::{CreateSnippet, Snippet};

use crate::context::RequestContext;
use crate::transfer::{json, markdown, text, ExportFormat, SnippetTransfer};

/// Exports and imports the owner's snippets.
#[derive(Debug, Clone)]
pub struct TransferService {
    snippet_repo: Arc<SnippetRepository>,
}

impl TransferService {
    /// Creates a new transfer service.
    pub fn new(snippet_repo: Arc<SnippetRepository>) -> Self {
        Self { snippet_repo }
    }

    /// Renders all of the owner's live snippets in the requested format.
    pub async fn export(&self, ctx: &RequestContext, format: ExportFormat) -> AppResult<String> {
        let owner_id = ctx.require_user()?;
        let snippets = self.snippet_repo.find_all(owner_id).await?;
        let records: Vec<SnippetTransfer> = snippets.iter().map(SnippetTransfer::from).collect();

        let rendered = match format {
            ExportFormat::Json => json::export(&records)?,
            ExportFormat::Text => text::export(&records),
            ExportFormat::Markdown => markdown::export(&records),
        };

        info!(
            user_id = %owner_id,
            count = records.len(),
            format = %format,
            "Snippets exported"
        );
        Ok(rendered)
    }

    /// Parses the content in the requested format and creates one snippet
    /// per record. Parsing is all-or-nothing; creation happens only after
    /// the whole document parsed.
    pub async fn import(
        &self,
        ctx: &RequestContext,
        format: ExportFormat,
        content: &str,
    ) -> AppResult<Vec<Snippet>> {
        let owner_id = ctx.require_user()?;
        let records = match format {
            ExportFormat::Json => json::import(content)?,
            ExportFormat::Text => text::import(content)?,
            ExportFormat::Markdown => markdown::import(content)?,
        };

        let mut created = Vec::with_capacity(records.len());
        for record in records {
            let snippet = self
                .snippet_repo
                .create(&CreateSnippet {
                    owner_id,
                    title: record.title,
                    description: record.description,
                    code: record.code,
                    language: record.language,
                    tags: record.tags,
                    is_public: record.is_public,
                    folder_id: None,
                    category_id: None,
                })
                .await?;
            created.push(snippet);
        }

        info!(
            user_id = %owner_id,
            count = created.len(),
            format = %format,
            "Snippets imported"
        );
        Ok(created)
    }
}
