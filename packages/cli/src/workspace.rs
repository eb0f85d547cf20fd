use crate::config::Config;
use anyhow::{Context, Result};
use pagecraft_document::PageDocument;
use pagecraft_registry::{initialize, WidgetRegistry};
use pagecraft_repository::{FilePageStore, PageRepository};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Config, registry and repository for the current directory
pub struct Workspace {
    pub config: Config,
    pub registry: Arc<WidgetRegistry>,
    pub repository: PageRepository,
}

impl Workspace {
    pub fn open(cwd: &Path) -> Result<Self> {
        let config = Config::load(cwd)
            .with_context(|| format!("Failed to read {}", crate::config::DEFAULT_CONFIG_NAME))?;
        let registry = Arc::new(initialize().context("Failed to build widget registry")?);
        let store_path = config.store_path(cwd);
        debug!(store = %store_path.display(), user = %config.user.id, "Opening page store");
        let store = Arc::new(FilePageStore::new(store_path));
        let repository = PageRepository::new(store, registry.clone(), config.actor());
        Ok(Self {
            config,
            registry,
            repository,
        })
    }

    /// Look a page up by id, then by slug
    pub async fn find_page(&self, reference: &str) -> Result<PageDocument> {
        if let Ok(page) = self.repository.get_page(reference).await {
            return Ok(page);
        }
        self.repository
            .list_pages()
            .await?
            .into_iter()
            .find(|page| page.slug == reference)
            .ok_or_else(|| anyhow::anyhow!("No page with id or slug '{}'", reference))
    }
}
