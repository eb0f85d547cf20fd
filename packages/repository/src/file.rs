//! JSON-file store.
//!
//! ```text
//! <root>/
//!   pages/<page-id>.json
//!   versions/<page-id>/<version-id>.json
//!   storefront.json
//! ```

use crate::errors::{RepositoryError, RepositoryResult};
use crate::store::{PageStore, PageVersion};
use async_trait::async_trait;
use pagecraft_document::PageDocument;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StorefrontPointer {
    page_id: Option<String>,
}

/// Keeps every page and snapshot as a pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct FilePageStore {
    root: PathBuf,
}

impl FilePageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pages_dir(&self) -> PathBuf {
        self.root.join("pages")
    }

    fn page_path(&self, page_id: &str) -> RepositoryResult<PathBuf> {
        check_file_id(page_id)?;
        Ok(self.pages_dir().join(format!("{}.json", page_id)))
    }

    fn versions_dir(&self, page_id: &str) -> RepositoryResult<PathBuf> {
        check_file_id(page_id)?;
        Ok(self.root.join("versions").join(page_id))
    }

    fn storefront_path(&self) -> PathBuf {
        self.root.join("storefront.json")
    }
}

/// Ids become file names, so only plain characters are allowed
fn check_file_id(id: &str) -> RepositoryResult<()> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(RepositoryError::Storage(format!(
            "'{}' cannot be used as a file name",
            id
        )))
    }
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> RepositoryResult<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Write via a temp file and rename so readers never see half a document
async fn write_json<T: Serialize>(path: &Path, value: &T) -> RepositoryResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, content).await?;
    fs::rename(&tmp, path).await?;
    debug!(path = %path.display(), "Wrote file");
    Ok(())
}

async fn read_dir_json<T: DeserializeOwned>(dir: &Path) -> RepositoryResult<Vec<T>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut items = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable file"),
        }
    }
    Ok(items)
}

#[async_trait]
impl PageStore for FilePageStore {
    async fn load_page(&self, page_id: &str) -> RepositoryResult<Option<PageDocument>> {
        read_json(&self.page_path(page_id)?).await
    }

    async fn save_page(&self, page: &PageDocument) -> RepositoryResult<()> {
        write_json(&self.page_path(&page.id)?, page).await
    }

    async fn delete_page(&self, page_id: &str) -> RepositoryResult<bool> {
        match fs::remove_file(self.page_path(page_id)?).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_pages(&self) -> RepositoryResult<Vec<PageDocument>> {
        let mut pages: Vec<PageDocument> = read_dir_json(&self.pages_dir()).await?;
        pages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(pages)
    }

    async fn save_version(&self, version: &PageVersion) -> RepositoryResult<()> {
        check_file_id(&version.id)?;
        let path = self
            .versions_dir(&version.page_id)?
            .join(format!("{}.json", version.id));
        write_json(&path, version).await
    }

    async fn load_version(
        &self,
        page_id: &str,
        version_id: &str,
    ) -> RepositoryResult<Option<PageVersion>> {
        check_file_id(version_id)?;
        let path = self
            .versions_dir(page_id)?
            .join(format!("{}.json", version_id));
        read_json(&path).await
    }

    async fn list_versions(&self, page_id: &str) -> RepositoryResult<Vec<PageVersion>> {
        let mut versions: Vec<PageVersion> = read_dir_json(&self.versions_dir(page_id)?).await?;
        versions.sort_by(|a, b| a.version.cmp(&b.version).then(a.created_at.cmp(&b.created_at)));
        Ok(versions)
    }

    async fn delete_versions(&self, page_id: &str) -> RepositoryResult<()> {
        match fs::remove_dir_all(self.versions_dir(page_id)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn storefront_page_id(&self) -> RepositoryResult<Option<String>> {
        let pointer: Option<StorefrontPointer> = read_json(&self.storefront_path()).await?;
        Ok(pointer.and_then(|p| p.page_id))
    }

    async fn set_storefront_page_id(&self, page_id: Option<&str>) -> RepositoryResult<()> {
        let pointer = StorefrontPointer {
            page_id: page_id.map(str::to_string),
        };
        write_json(&self.storefront_path(), &pointer).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_ids_reject_path_segments() {
        assert!(check_file_id("abc-123").is_ok());
        assert!(check_file_id("../etc").is_err());
        assert!(check_file_id("").is_err());
    }

    #[tokio::test]
    async fn test_missing_page_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePageStore::new(dir.path());
        assert!(store.load_page("nope").await.unwrap().is_none());
        assert!(store.list_pages().await.unwrap().is_empty());
        assert!(store.storefront_page_id().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_page_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let page = PageDocument::empty("page-1", "Home", "/", "s1", "r1");
        FilePageStore::new(dir.path()).save_page(&page).await.unwrap();

        let reopened = FilePageStore::new(dir.path());
        let loaded = reopened.load_page("page-1").await.unwrap().unwrap();
        assert_eq!(loaded, page);
        assert!(reopened.delete_page("page-1").await.unwrap());
        assert!(!reopened.delete_page("page-1").await.unwrap());
    }
}
