use crate::errors::RepositoryResult;
use crate::store::{PageStore, PageVersion};
use async_trait::async_trait;
use pagecraft_document::PageDocument;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    pages: HashMap<String, PageDocument>,
    versions: HashMap<String, Vec<PageVersion>>,
    storefront: Option<String>,
}

/// In-memory store for tests and previews
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    state: RwLock<MemoryState>,
    writes: AtomicUsize,
}

impl MemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls received so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn load_page(&self, page_id: &str) -> RepositoryResult<Option<PageDocument>> {
        Ok(self.state.read().await.pages.get(page_id).cloned())
    }

    async fn save_page(&self, page: &PageDocument) -> RepositoryResult<()> {
        self.record_write();
        self.state
            .write()
            .await
            .pages
            .insert(page.id.clone(), page.clone());
        Ok(())
    }

    async fn delete_page(&self, page_id: &str) -> RepositoryResult<bool> {
        self.record_write();
        Ok(self.state.write().await.pages.remove(page_id).is_some())
    }

    async fn list_pages(&self) -> RepositoryResult<Vec<PageDocument>> {
        let state = self.state.read().await;
        let mut pages: Vec<PageDocument> = state.pages.values().cloned().collect();
        pages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(pages)
    }

    async fn save_version(&self, version: &PageVersion) -> RepositoryResult<()> {
        self.record_write();
        self.state
            .write()
            .await
            .versions
            .entry(version.page_id.clone())
            .or_default()
            .push(version.clone());
        Ok(())
    }

    async fn load_version(
        &self,
        page_id: &str,
        version_id: &str,
    ) -> RepositoryResult<Option<PageVersion>> {
        let state = self.state.read().await;
        Ok(state
            .versions
            .get(page_id)
            .and_then(|versions| versions.iter().find(|v| v.id == version_id))
            .cloned())
    }

    async fn list_versions(&self, page_id: &str) -> RepositoryResult<Vec<PageVersion>> {
        let state = self.state.read().await;
        Ok(state.versions.get(page_id).cloned().unwrap_or_default())
    }

    async fn delete_versions(&self, page_id: &str) -> RepositoryResult<()> {
        self.record_write();
        self.state.write().await.versions.remove(page_id);
        Ok(())
    }

    async fn storefront_page_id(&self) -> RepositoryResult<Option<String>> {
        Ok(self.state.read().await.storefront.clone())
    }

    async fn set_storefront_page_id(&self, page_id: Option<&str>) -> RepositoryResult<()> {
        self.record_write();
        self.state.write().await.storefront = page_id.map(str::to_string);
        Ok(())
    }
}
