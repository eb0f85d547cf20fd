//! Persistence seam for pages, published snapshots, and the storefront pointer.

use crate::errors::RepositoryResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagecraft_document::PageDocument;
use serde::{Deserialize, Serialize};

/// Immutable copy of a page taken at publish time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    /// Same id as the history entry that produced it
    pub id: String,
    pub page_id: String,
    /// Draft version that was published, as in the history entry; `document.version`
    /// holds the bumped version
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
    pub note: String,
    pub document: PageDocument,
}

/// Backing storage for a [`crate::PageRepository`].
///
/// Stores do no permission or lifecycle checks; they only move bytes.
#[async_trait]
pub trait PageStore: Send + Sync {
    async fn load_page(&self, page_id: &str) -> RepositoryResult<Option<PageDocument>>;

    async fn save_page(&self, page: &PageDocument) -> RepositoryResult<()>;

    /// Returns false if nothing was stored under `page_id`
    async fn delete_page(&self, page_id: &str) -> RepositoryResult<bool>;

    async fn list_pages(&self) -> RepositoryResult<Vec<PageDocument>>;

    async fn save_version(&self, version: &PageVersion) -> RepositoryResult<()>;

    async fn load_version(
        &self,
        page_id: &str,
        version_id: &str,
    ) -> RepositoryResult<Option<PageVersion>>;

    /// Snapshots of a page, oldest first
    async fn list_versions(&self, page_id: &str) -> RepositoryResult<Vec<PageVersion>>;

    async fn delete_versions(&self, page_id: &str) -> RepositoryResult<()>;

    async fn storefront_page_id(&self) -> RepositoryResult<Option<String>>;

    async fn set_storefront_page_id(&self, page_id: Option<&str>) -> RepositoryResult<()>;
}
