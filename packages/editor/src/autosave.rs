//! Periodic background save of a dirty editing session.
//!
//! Each tick persists the working document through the repository only when it
//! changed since the last save. Failures are logged and left for the next tick
//! or an explicit save; nothing is retried in between.

use crate::errors::EditorResult;
use crate::session::EditorSession;
use pagecraft_repository::{PageRepository, SaveReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, instrument};

/// Session shared between the UI and the auto-save task
pub type SharedSession = Arc<Mutex<EditorSession>>;

/// Save the session's document if it is dirty.
///
/// The lock is released while the repository call is in flight, so edits can
/// continue; edits made meanwhile stay dirty for the next save.
pub async fn save_if_dirty(
    session: &Mutex<EditorSession>,
    repository: &PageRepository,
) -> EditorResult<Option<SaveReport>> {
    let (document, revision) = {
        let session = session.lock().await;
        if !session.is_dirty() {
            return Ok(None);
        }
        (session.document().clone(), session.revision())
    };

    let report = repository.save_draft(&document).await?;
    session.lock().await.mark_saved(revision, &report.page);
    Ok(Some(report))
}

/// Handle to a running auto-save task
#[derive(Debug)]
pub struct AutoSave {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl AutoSave {
    pub fn spawn(
        session: SharedSession,
        repository: Arc<PageRepository>,
        interval: Duration,
    ) -> Self {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run(session, repository, interval, shutdown_rx));
        Self {
            shutdown: Some(shutdown_tx),
            handle,
        }
    }

    /// Stop the task and wait for an in-flight save to finish
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Err(e) = self.handle.await {
            error!(error = %e, "Auto-save task panicked");
        }
    }
}

async fn run(
    session: SharedSession,
    repository: Arc<PageRepository>,
    period: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    info!(interval_secs = period.as_secs(), "Auto-save started");
    let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Auto-save stopping");
                break;
            }
            _ = interval.tick() => tick(&session, &repository).await,
        }
    }
}

#[instrument(skip_all)]
async fn tick(session: &Mutex<EditorSession>, repository: &PageRepository) {
    match save_if_dirty(session, repository).await {
        Ok(Some(report)) => {
            debug!(page_id = %report.page.id, migrated = report.migration.migrated.len(), "Auto-saved draft");
        }
        Ok(None) => {}
        Err(e) => error!(error = %e, "Auto-save failed"),
    }
}
