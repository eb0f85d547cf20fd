use pagecraft_document::PageStatus;
use pagecraft_editor::{save_if_dirty, AutoSave, EditorOptions, EditorSession, SharedSession};
use pagecraft_registry::initialize;
use pagecraft_repository::{Actor, MemoryPageStore, PageRepository, Role};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

async fn setup() -> (Arc<MemoryPageStore>, Arc<PageRepository>, SharedSession) {
    let registry = Arc::new(initialize().unwrap());
    let store = Arc::new(MemoryPageStore::new());
    let repo = Arc::new(PageRepository::new(
        store.clone(),
        registry.clone(),
        Actor::new("owner-1", Role::Owner),
    ));
    let page = repo.create_page("Home", None).await.unwrap();
    let session = EditorSession::new(page, registry, &EditorOptions::default());
    (store, repo, Arc::new(Mutex::new(session)))
}

#[tokio::test]
async fn test_save_if_dirty_skips_clean_session() {
    let (store, repo, session) = setup().await;
    let writes = store.write_count();

    assert!(save_if_dirty(&session, &repo).await.unwrap().is_none());
    assert_eq!(store.write_count(), writes);
}

#[tokio::test]
async fn test_save_if_dirty_persists_and_cleans() {
    let (_, repo, session) = setup().await;
    let page_id = {
        let mut s = session.lock().await;
        let row_id = s.document().sections[0].rows[0].id.clone();
        let id = s.add_widget("text", &row_id).unwrap();
        s.set_prop(&id, "content", json!("Saved text")).unwrap();
        s.document().id.clone()
    };

    let report = save_if_dirty(&session, &repo).await.unwrap().unwrap();
    assert!(report.migration.is_clean());
    assert!(!session.lock().await.is_dirty());

    let stored = repo.get_page(&page_id).await.unwrap();
    assert_eq!(stored.widget_count(), 1);
    assert_eq!(stored.version, 1);
}

#[tokio::test]
async fn test_publish_then_autosave_keeps_lifecycle() {
    let (_, repo, session) = setup().await;
    let page_id = session.lock().await.document().id.clone();
    repo.publish(&page_id).await.unwrap();

    {
        let mut s = session.lock().await;
        let section_id = s.document().sections[0].id.clone();
        s.add_row(&section_id).unwrap();
    }
    let report = save_if_dirty(&session, &repo).await.unwrap().unwrap();

    assert_eq!(report.page.version, 2);
    assert_eq!(report.page.status, PageStatus::Published);
    assert_eq!(session.lock().await.document().version, 2);
}

#[tokio::test(start_paused = true)]
async fn test_auto_save_runs_on_interval() {
    let (_, repo, session) = setup().await;
    let page_id = session.lock().await.document().id.clone();
    let autosave = AutoSave::spawn(session.clone(), repo.clone(), Duration::from_secs(10));

    {
        let mut s = session.lock().await;
        let section_id = s.document().sections[0].id.clone();
        s.add_row(&section_id).unwrap();
    }

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(repo.get_page(&page_id).await.unwrap().sections[0].rows.len(), 1);

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(repo.get_page(&page_id).await.unwrap().sections[0].rows.len(), 2);
    assert!(!session.lock().await.is_dirty());

    autosave.shutdown().await;
}

#[tokio::test]
async fn test_undo_after_save_keeps_published_lifecycle() {
    let (_, repo, session) = setup().await;
    let page_id = session.lock().await.document().id.clone();
    repo.publish(&page_id).await.unwrap();

    let widget_id = {
        let mut s = session.lock().await;
        let row_id = s.document().sections[0].rows[0].id.clone();
        s.add_widget("text", &row_id).unwrap()
    };
    save_if_dirty(&session, &repo).await.unwrap().unwrap();

    let mut s = session.lock().await;
    let saved = s.document().clone();
    assert_eq!(saved.version, 2);
    assert_eq!(saved.status, PageStatus::Published);
    assert_eq!(saved.history.len(), 1);

    assert!(s.undo());
    assert!(s.document().widget(&widget_id).is_none());
    assert_eq!(s.document().version, saved.version);
    assert_eq!(s.document().status, saved.status);
    assert_eq!(s.document().history, saved.history);

    assert!(s.redo());
    assert!(s.document().widget(&widget_id).is_some());
    assert_eq!(s.document().version, 2);
    assert_eq!(s.document().history.len(), 1);
}
