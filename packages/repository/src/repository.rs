use crate::access::{Actor, Permission};
use crate::errors::{RepositoryError, RepositoryResult};
use crate::store::{PageStore, PageVersion};
use chrono::Utc;
use pagecraft_document::{
    is_valid_slug, new_page_id, slugify, IdGenerator, PageDocument, PageStatus, PageTemplate,
    PublishEvent, Row, Section, HOME_SLUG,
};
use pagecraft_registry::{MigrationReport, WidgetRegistry};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, instrument, warn};

const PUBLISH_NOTE: &str = "Published";

/// Result of persisting a draft
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// The document as stored
    pub page: PageDocument,
    pub migration: MigrationReport,
}

/// Page lifecycle on top of a [`PageStore`].
///
/// Every mutating call checks the actor's role before touching the store.
pub struct PageRepository {
    store: Arc<dyn PageStore>,
    registry: Arc<WidgetRegistry>,
    actor: Actor,
}

impl PageRepository {
    pub fn new(store: Arc<dyn PageStore>, registry: Arc<WidgetRegistry>, actor: Actor) -> Self {
        Self {
            store,
            registry,
            actor,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.registry
    }

    /// Same store and registry, different user
    pub fn with_actor(&self, actor: Actor) -> Self {
        Self {
            store: Arc::clone(&self.store),
            registry: Arc::clone(&self.registry),
            actor,
        }
    }

    fn require(&self, permission: Permission, action: &'static str) -> RepositoryResult<()> {
        if self.actor.can(permission) {
            Ok(())
        } else {
            warn!(user = %self.actor.user_id, role = %self.actor.role, action, "Permission denied");
            Err(RepositoryError::PermissionDenied {
                action,
                role: self.actor.role,
            })
        }
    }

    async fn load(&self, page_id: &str) -> RepositoryResult<PageDocument> {
        self.store
            .load_page(page_id)
            .await?
            .ok_or_else(|| RepositoryError::PageNotFound(page_id.to_string()))
    }

    /// First free slug derived from `base`: `/about`, `/about-2`, `/about-3`, ...
    async fn unique_slug(&self, base: &str, exclude_page: Option<&str>) -> RepositoryResult<String> {
        let taken: HashSet<String> = self
            .store
            .list_pages()
            .await?
            .into_iter()
            .filter(|p| Some(p.id.as_str()) != exclude_page)
            .map(|p| p.slug)
            .collect();

        if !taken.contains(base) {
            return Ok(base.to_string());
        }
        let stem = if base == HOME_SLUG { "/home" } else { base };
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", stem, n);
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Migrate, validate and persist without touching lifecycle fields
    async fn persist(&self, mut page: PageDocument) -> RepositoryResult<SaveReport> {
        let migration = self.registry.migrate_document(&mut page);
        for failure in &migration.failures {
            warn!(page_id = %page.id, widget_id = %failure.widget_id(), error = %failure, "Widget left at old version");
        }
        page.ensure_valid()?;
        page.touch();
        self.store.save_page(&page).await?;
        Ok(SaveReport { page, migration })
    }

    /// New draft at version 1.
    ///
    /// Without a template the page holds one empty section with one empty row.
    /// Template sections are copied with fresh ids.
    #[instrument(skip(self, template), fields(user = %self.actor.user_id))]
    pub async fn create_page(
        &self,
        name: &str,
        template: Option<&PageTemplate>,
    ) -> RepositoryResult<PageDocument> {
        self.require(Permission::Modify, "create pages")?;

        let mut ids = IdGenerator::new();
        let slug = self.unique_slug(&slugify(name), None).await?;
        let mut page = PageDocument::new(new_page_id(), name, slug, Vec::new());
        match template {
            Some(template) => {
                page.sections = template.instantiate(&mut ids);
                page.theme_overrides = template.theme_overrides.clone();
            }
            None => {
                let row = Row::new(ids.new_id());
                let section = Section::new(ids.new_id()).with_row(row);
                page.sections = vec![Arc::new(section)];
            }
        }

        let report = self.persist(page).await?;
        info!(page_id = %report.page.id, slug = %report.page.slug, "Page created");
        Ok(report.page)
    }

    /// Persist the current draft.
    ///
    /// Id, slug, version, status and history always come from the stored record,
    /// so a stale editor copy can never rewind the lifecycle.
    #[instrument(skip(self, page), fields(user = %self.actor.user_id, page_id = %page.id))]
    pub async fn save_draft(&self, page: &PageDocument) -> RepositoryResult<SaveReport> {
        self.require(Permission::Modify, "save drafts")?;

        let stored = self.load(&page.id).await?;
        if stored.status == PageStatus::Archived {
            return Err(RepositoryError::InvalidState(format!(
                "page {} is archived",
                page.id
            )));
        }

        let mut draft = page.clone();
        draft.slug = stored.slug;
        draft.version = stored.version;
        draft.status = stored.status;
        draft.history = stored.history;
        draft.created_at = stored.created_at;
        self.persist(draft).await
    }

    /// Publish the draft: append a history entry, bump the version, store a snapshot
    #[instrument(skip(self), fields(user = %self.actor.user_id))]
    pub async fn publish(&self, page_id: &str) -> RepositoryResult<PageDocument> {
        self.require(Permission::Modify, "publish pages")?;

        let mut page = self.load(page_id).await?;
        if page.status == PageStatus::Archived {
            return Err(RepositoryError::InvalidState(format!(
                "page {} is archived; restore a version first",
                page_id
            )));
        }
        page.ensure_valid()?;

        let event = PublishEvent {
            id: new_page_id(),
            created_at: Utc::now(),
            author_id: self.actor.user_id.clone(),
            version: page.version,
            note: PUBLISH_NOTE.to_string(),
        };
        page.history.push(event.clone());
        page.status = PageStatus::Published;
        page.version += 1;
        page.touch();

        let snapshot = PageVersion {
            id: event.id,
            page_id: page.id.clone(),
            version: event.version,
            created_at: event.created_at,
            author_id: event.author_id,
            note: event.note,
            document: page.clone(),
        };
        self.store.save_version(&snapshot).await?;
        self.store.save_page(&page).await?;

        info!(page_id, version = page.version, "Page published");
        Ok(page)
    }

    /// Replace the draft with a published snapshot.
    ///
    /// The restored draft gets a version above both the current record and the
    /// snapshot, and keeps the current publish history.
    #[instrument(skip(self), fields(user = %self.actor.user_id))]
    pub async fn restore_version(
        &self,
        page_id: &str,
        version_id: &str,
    ) -> RepositoryResult<PageDocument> {
        self.require(Permission::Modify, "restore versions")?;

        let current = self.load(page_id).await?;
        let snapshot = self
            .store
            .load_version(page_id, version_id)
            .await?
            .ok_or_else(|| RepositoryError::VersionNotFound {
                page_id: page_id.to_string(),
                version_id: version_id.to_string(),
            })?;

        let mut page = snapshot.document;
        page.id = current.id;
        page.slug = current.slug;
        page.created_at = current.created_at;
        page.status = PageStatus::Draft;
        page.version = current.version.max(page.version) + 1;
        page.history = current.history;

        let report = self.persist(page).await?;
        info!(page_id, version_id, version = report.page.version, "Version restored");
        Ok(report.page)
    }

    pub async fn get_page(&self, page_id: &str) -> RepositoryResult<PageDocument> {
        self.require(Permission::View, "view pages")?;
        self.load(page_id).await
    }

    pub async fn list_pages(&self) -> RepositoryResult<Vec<PageDocument>> {
        self.require(Permission::View, "list pages")?;
        self.store.list_pages().await
    }

    pub async fn get_version(
        &self,
        page_id: &str,
        version_id: &str,
    ) -> RepositoryResult<PageVersion> {
        self.require(Permission::View, "view versions")?;
        self.store
            .load_version(page_id, version_id)
            .await?
            .ok_or_else(|| RepositoryError::VersionNotFound {
                page_id: page_id.to_string(),
                version_id: version_id.to_string(),
            })
    }

    /// Published snapshots, oldest first
    pub async fn list_versions(&self, page_id: &str) -> RepositoryResult<Vec<PageVersion>> {
        self.require(Permission::View, "list versions")?;
        self.load(page_id).await?;
        self.store.list_versions(page_id).await
    }

    /// Delete a page with its snapshots, clearing the storefront pointer if it was set to it
    #[instrument(skip(self), fields(user = %self.actor.user_id))]
    pub async fn delete_page(&self, page_id: &str) -> RepositoryResult<()> {
        self.require(Permission::Modify, "delete pages")?;

        self.load(page_id).await?;
        if self.store.storefront_page_id().await?.as_deref() == Some(page_id) {
            self.store.set_storefront_page_id(None).await?;
        }
        self.store.delete_versions(page_id).await?;
        self.store.delete_page(page_id).await?;
        info!(page_id, "Page deleted");
        Ok(())
    }

    /// Take a page off the storefront without deleting its history
    #[instrument(skip(self), fields(user = %self.actor.user_id))]
    pub async fn archive_page(&self, page_id: &str) -> RepositoryResult<PageDocument> {
        self.require(Permission::Modify, "archive pages")?;

        let mut page = self.load(page_id).await?;
        if self.store.storefront_page_id().await?.as_deref() == Some(page_id) {
            return Err(RepositoryError::InvalidState(format!(
                "page {} is the storefront page",
                page_id
            )));
        }
        page.status = PageStatus::Archived;
        page.touch();
        self.store.save_page(&page).await?;
        info!(page_id, "Page archived");
        Ok(page)
    }

    /// Change a page's slug; taken slugs get a numeric suffix
    #[instrument(skip(self), fields(user = %self.actor.user_id))]
    pub async fn set_slug(&self, page_id: &str, slug: &str) -> RepositoryResult<PageDocument> {
        self.require(Permission::Modify, "change slugs")?;

        if !is_valid_slug(slug) {
            return Err(RepositoryError::InvalidState(format!(
                "'{}' is not a valid slug",
                slug
            )));
        }
        let mut page = self.load(page_id).await?;
        page.slug = self.unique_slug(slug, Some(page_id)).await?;
        page.touch();
        self.store.save_page(&page).await?;
        Ok(page)
    }

    /// Serve `page_id` at the storefront root. The page must have been published.
    #[instrument(skip(self), fields(user = %self.actor.user_id))]
    pub async fn set_storefront_page(&self, page_id: &str) -> RepositoryResult<()> {
        self.require(Permission::Modify, "set the storefront page")?;

        let page = self.load(page_id).await?;
        if page.history.is_empty() || page.status == PageStatus::Archived {
            return Err(RepositoryError::InvalidState(format!(
                "page {} has no live published version",
                page_id
            )));
        }
        self.store.set_storefront_page_id(Some(page_id)).await?;
        info!(page_id, "Storefront page set");
        Ok(())
    }

    /// Latest published snapshot of `page_id`, ignoring any unpublished draft edits
    pub async fn published_page(&self, page_id: &str) -> RepositoryResult<Option<PageVersion>> {
        self.require(Permission::View, "view pages")?;
        let page = self.load(page_id).await?;
        self.latest_snapshot(&page).await
    }

    /// Published snapshot served at the storefront root
    pub async fn storefront_page(&self) -> RepositoryResult<Option<PageVersion>> {
        self.require(Permission::View, "view the storefront")?;
        let Some(page_id) = self.store.storefront_page_id().await? else {
            return Ok(None);
        };
        match self.store.load_page(&page_id).await? {
            Some(page) => self.latest_snapshot(&page).await,
            None => {
                warn!(page_id = %page_id, "Storefront pointer references a missing page");
                Ok(None)
            }
        }
    }

    /// Published snapshot served at `slug`; `/` falls back to the storefront pointer
    pub async fn published_by_slug(&self, slug: &str) -> RepositoryResult<Option<PageVersion>> {
        self.require(Permission::View, "view pages")?;
        let pages = self.store.list_pages().await?;
        if let Some(page) = pages.iter().find(|p| p.slug == slug) {
            if let Some(snapshot) = self.latest_snapshot(page).await? {
                return Ok(Some(snapshot));
            }
        }
        if slug == HOME_SLUG {
            return self.storefront_page().await;
        }
        Ok(None)
    }

    async fn latest_snapshot(&self, page: &PageDocument) -> RepositoryResult<Option<PageVersion>> {
        if page.status == PageStatus::Archived {
            return Ok(None);
        }
        let Some(last) = page.history.last() else {
            return Ok(None);
        };
        self.store.load_version(&page.id, &last.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use crate::memory::MemoryPageStore;

    fn repository(role: Role) -> (Arc<MemoryPageStore>, PageRepository) {
        let store = Arc::new(MemoryPageStore::new());
        let registry = Arc::new(pagecraft_registry::initialize().unwrap());
        let repo = PageRepository::new(store.clone(), registry, Actor::new("u1", role));
        (store, repo)
    }

    #[tokio::test]
    async fn test_slug_collisions_get_suffix() {
        let (_, repo) = repository(Role::Owner);
        let a = repo.create_page("About", None).await.unwrap();
        let b = repo.create_page("About", None).await.unwrap();
        let c = repo.create_page("About", None).await.unwrap();
        assert_eq!(a.slug, "/about");
        assert_eq!(b.slug, "/about-2");
        assert_eq!(c.slug, "/about-3");
    }

    #[tokio::test]
    async fn test_viewer_denied_before_store_call() {
        let (store, repo) = repository(Role::Viewer);
        let err = repo.create_page("Home", None).await.unwrap_err();
        assert!(err.is_permission_denied());
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_set_slug_rejects_invalid() {
        let (_, repo) = repository(Role::Owner);
        let page = repo.create_page("Home", None).await.unwrap();
        assert!(matches!(
            repo.set_slug(&page.id, "no leading slash").await,
            Err(RepositoryError::InvalidState(_))
        ));
        let moved = repo.set_slug(&page.id, "/").await.unwrap();
        assert_eq!(moved.slug, "/");
    }
}
