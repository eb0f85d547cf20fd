//! # Edit Session
//!
//! One user's editing state for one page: the working document, selection,
//! undo history, drag state and dirty tracking. Every document change goes
//! through [`EditorSession::apply`], so gestures, keyboard commands and the
//! properties panel share a single mutation path.

use crate::drag::{CanvasState, DragPayload, DropOutcome, DropTarget, TargetKind};
use crate::errors::{EditorError, EditorResult};
use crate::mutations::{Mutation, SectionPatch};
use crate::undo_stack::{UndoStack, DEFAULT_UNDO_LIMIT};
use pagecraft_document::{
    ColSpan, IdGenerator, PageDocument, Row, RowAlignment, Section, Visibility,
};
use pagecraft_registry::WidgetRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MIN_AUTO_SAVE_SECONDS: u64 = 5;
pub const MAX_AUTO_SAVE_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub undo_limit: usize,
    pub auto_save_interval: Duration,
}

impl EditorOptions {
    /// Auto-save interval in seconds, clamped to 5-30
    pub fn with_auto_save_seconds(mut self, seconds: u64) -> Self {
        let seconds = seconds.clamp(MIN_AUTO_SAVE_SECONDS, MAX_AUTO_SAVE_SECONDS);
        self.auto_save_interval = Duration::from_secs(seconds);
        self
    }

    pub fn with_undo_limit(mut self, undo_limit: usize) -> Self {
        self.undo_limit = undo_limit;
        self
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
            auto_save_interval: Duration::from_secs(10),
        }
    }
}

/// Active element in the canvas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Selection {
    Section(String),
    Row(String),
    Widget(String),
}

impl Selection {
    pub fn id(&self) -> &str {
        match self {
            Selection::Section(id) | Selection::Row(id) | Selection::Widget(id) => id,
        }
    }
}

/// Keyboard shortcuts routed through the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorCommand {
    Undo,
    Redo,
    Delete,
    Duplicate,
    Escape,
}

#[derive(Debug)]
pub struct EditorSession {
    document: PageDocument,
    registry: Arc<WidgetRegistry>,
    ids: IdGenerator,
    undo: UndoStack,
    selection: Option<Selection>,
    canvas: CanvasState,
    /// Bumped on every document change
    revision: u64,
    saved_revision: u64,
}

impl EditorSession {
    /// Open `document` for editing, migrating outdated widgets first
    pub fn new(
        mut document: PageDocument,
        registry: Arc<WidgetRegistry>,
        options: &EditorOptions,
    ) -> Self {
        let report = registry.migrate_document(&mut document);
        for failure in &report.failures {
            warn!(page_id = %document.id, widget_id = %failure.widget_id(), error = %failure, "Widget left at old version");
        }
        let revision = u64::from(!report.migrated.is_empty());
        info!(page_id = %document.id, migrated = report.migrated.len(), "Editing session opened");

        Self {
            document,
            registry,
            ids: IdGenerator::new(),
            undo: UndoStack::with_max_levels(options.undo_limit),
            selection: None,
            canvas: CanvasState::default(),
            revision,
            saved_revision: 0,
        }
    }

    pub fn with_id_generator(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn registry(&self) -> &Arc<WidgetRegistry> {
        &self.registry
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    pub fn undo_description(&self) -> Option<&'static str> {
        self.undo.undo_description()
    }

    /// Select an element; the id must exist in the document
    pub fn select(&mut self, selection: Selection) -> EditorResult<()> {
        let exists = match &selection {
            Selection::Section(id) => self.document.section(id).is_some(),
            Selection::Row(id) => self.document.row(id).is_some(),
            Selection::Widget(id) => self.document.widget(id).is_some(),
        };
        if !exists {
            return Err(match selection {
                Selection::Section(id) => EditorError::SectionNotFound(id),
                Selection::Row(id) => EditorError::RowNotFound(id),
                Selection::Widget(id) => EditorError::WidgetNotFound(id),
            });
        }
        self.selection = Some(selection);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Apply a mutation, recording the previous document for undo
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<()> {
        let mut next = self.document.clone();
        mutation.apply(&mut next)?;
        let previous = std::mem::replace(&mut self.document, next);
        self.undo.push(previous, mutation.label());
        self.revision += 1;
        debug!(mutation = mutation.label(), revision = self.revision, "Applied mutation");
        Ok(())
    }

    /// Fresh id not used anywhere in the document
    pub fn new_id(&mut self) -> String {
        let document = &self.document;
        self.ids.new_unique_id(|id| document.contains_id(id))
    }

    pub fn undo(&mut self) -> bool {
        if !self.undo.can_undo() {
            return false;
        }
        let Some(previous) = self.undo.undo(self.document.clone()) else {
            return false;
        };
        self.document = with_lifecycle_of(previous, &self.document);
        self.revision += 1;
        self.prune_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.undo.can_redo() {
            return false;
        }
        let Some(next) = self.undo.redo(self.document.clone()) else {
            return false;
        };
        self.document = with_lifecycle_of(next, &self.document);
        self.revision += 1;
        self.prune_selection();
        true
    }

    fn prune_selection(&mut self) {
        let keep = match &self.selection {
            Some(selection) => self.document.contains_id(selection.id()),
            None => true,
        };
        if !keep {
            self.selection = None;
        }
    }

    // Drag and drop

    pub fn drag_start(&mut self, payload: DragPayload) {
        self.canvas.clear();
        self.canvas.active_drag_item = Some(payload);
    }

    /// Update highlight state only
    pub fn drag_over(&mut self, target: Option<&DropTarget>) {
        self.canvas.clear_highlight();
        let Some(target) = target else {
            return;
        };
        match target.kind {
            TargetKind::Section => {
                if self.document.section(&target.id).is_some() {
                    self.canvas.drag_over_section = Some(target.id.clone());
                }
            }
            TargetKind::Row => {
                if let Some(section_id) = self.document.section_of_row(&target.id) {
                    self.canvas.drag_over_section = Some(section_id.to_string());
                    self.canvas.drag_over_row = Some(target.id.clone());
                }
            }
            TargetKind::Widget => {
                if let Some(location) = self.document.locate_widget(&target.id) {
                    let section = &self.document.sections[location.section];
                    self.canvas.drag_over_section = Some(section.id.clone());
                    self.canvas.drag_over_row = Some(section.rows[location.row].id.clone());
                }
            }
        }
    }

    /// Finish a drag, applying at most one mutation
    pub fn drag_end(&mut self, over: Option<&DropTarget>) -> EditorResult<DropOutcome> {
        let payload = self.canvas.active_drag_item.take();
        self.canvas.clear();

        let (Some(payload), Some(over)) = (payload, over) else {
            return Ok(DropOutcome::Cancelled);
        };

        match payload {
            DragPayload::Widget { widget_id } if over.kind == TargetKind::Widget => {
                let mutation = Mutation::ReorderWidget {
                    widget_id: widget_id.clone(),
                    target_id: over.id.clone(),
                };
                match self.apply(mutation) {
                    Ok(()) => Ok(DropOutcome::Reordered { widget_id }),
                    Err(EditorError::Mutation(e)) => {
                        debug!(widget_id = %widget_id, target = %over.id, reason = %e, "Reorder drop discarded");
                        Ok(DropOutcome::Discarded)
                    }
                    Err(e) => Err(e),
                }
            }

            DragPayload::Widget { widget_id } => {
                let Some((_, row_id)) = self.resolve_drop(over) else {
                    debug!(widget_id = %widget_id, target = %over.id, "Move drop discarded: no target row");
                    return Ok(DropOutcome::Discarded);
                };
                let mutation = Mutation::MoveWidget {
                    widget_id: widget_id.clone(),
                    row_id: row_id.clone(),
                    index: None,
                };
                match self.apply(mutation) {
                    Ok(()) => Ok(DropOutcome::Moved { widget_id, row_id }),
                    Err(EditorError::Mutation(e)) => {
                        debug!(widget_id = %widget_id, reason = %e, "Move drop discarded");
                        Ok(DropOutcome::Discarded)
                    }
                    Err(e) => Err(e),
                }
            }

            DragPayload::NewWidget { widget_type } => {
                let Some((_, row_id)) = self.resolve_drop(over) else {
                    debug!(widget_type = %widget_type, target = %over.id, "New widget drop discarded: no target row");
                    return Ok(DropOutcome::Discarded);
                };
                let widget_id = self.add_widget(&widget_type, &row_id)?;
                Ok(DropOutcome::Inserted { widget_id, row_id })
            }
        }
    }

    /// `(section_id, row_id)` a drop on `target` lands in
    fn resolve_drop(&self, target: &DropTarget) -> Option<(String, String)> {
        match target.kind {
            TargetKind::Section => {
                let section = self.document.section(&target.id)?;
                let row = section.rows.first()?;
                Some((section.id.clone(), row.id.clone()))
            }
            TargetKind::Row => {
                let section_id = self.document.section_of_row(&target.id)?;
                Some((section_id.to_string(), target.id.clone()))
            }
            TargetKind::Widget => {
                let location = self.document.locate_widget(&target.id)?;
                let section = &self.document.sections[location.section];
                Some((section.id.clone(), section.rows[location.row].id.clone()))
            }
        }
    }

    // Widgets

    /// Append a default `widget_type` instance to `row_id` and select it
    pub fn add_widget(&mut self, widget_type: &str, row_id: &str) -> EditorResult<String> {
        let widget_id = self.new_id();
        let widget = self
            .registry
            .create_widget(widget_type, widget_id.clone())
            .map_err(|e| {
                warn!(widget_type, error = %e, "Refusing to insert unregistered widget");
                e
            })?;
        self.apply(Mutation::InsertWidget {
            row_id: row_id.to_string(),
            index: None,
            widget,
        })?;
        self.selection = Some(Selection::Widget(widget_id.clone()));
        Ok(widget_id)
    }

    /// Shallow-merge `partial` into the widget's props after schema validation
    pub fn update_widget(&mut self, widget_id: &str, partial: Value) -> EditorResult<()> {
        let mut candidate = self
            .document
            .widget(widget_id)
            .ok_or_else(|| EditorError::WidgetNotFound(widget_id.to_string()))?
            .clone();
        candidate.merge_props(&partial);
        self.check_props(&candidate)?;
        self.apply(Mutation::UpdateWidgetProps {
            widget_id: widget_id.to_string(),
            props: partial,
        })
    }

    pub fn delete_widget(&mut self, widget_id: &str) -> EditorResult<()> {
        self.apply(Mutation::DeleteWidget {
            widget_id: widget_id.to_string(),
        })?;
        if self.selection.as_ref().map(Selection::id) == Some(widget_id) {
            self.selection = None;
        }
        Ok(())
    }

    /// Copy a widget under a new id right after the original; selects the copy
    pub fn duplicate_widget(&mut self, widget_id: &str) -> EditorResult<String> {
        if self.document.widget(widget_id).is_none() {
            return Err(EditorError::WidgetNotFound(widget_id.to_string()));
        }
        let new_id = self.new_id();
        self.apply(Mutation::DuplicateWidget {
            widget_id: widget_id.to_string(),
            new_id: new_id.clone(),
        })?;
        self.selection = Some(Selection::Widget(new_id.clone()));
        Ok(new_id)
    }

    pub fn set_col_span(&mut self, widget_id: &str, col_span: ColSpan) -> EditorResult<()> {
        self.apply(Mutation::SetColSpan {
            widget_id: widget_id.to_string(),
            col_span,
        })
    }

    pub fn set_visibility(&mut self, widget_id: &str, visibility: Visibility) -> EditorResult<()> {
        self.apply(Mutation::SetVisibility {
            widget_id: widget_id.to_string(),
            visibility,
        })
    }

    pub fn set_custom_css(&mut self, widget_id: &str, css: Option<String>) -> EditorResult<()> {
        self.apply(Mutation::SetCustomCss {
            widget_id: widget_id.to_string(),
            css: css.filter(|c| !c.trim().is_empty()),
        })
    }

    // Sections and rows

    /// New section holding one empty row; appended when `index` is `None`
    pub fn add_section(&mut self, index: Option<usize>) -> EditorResult<String> {
        let section_id = self.new_id();
        let row_id = self.new_id();
        let section = Section::new(section_id.clone()).with_row(Row::new(row_id));
        self.apply(Mutation::AddSection { section, index })?;
        self.selection = Some(Selection::Section(section_id.clone()));
        Ok(section_id)
    }

    pub fn add_row(&mut self, section_id: &str) -> EditorResult<String> {
        let row_id = self.new_id();
        self.apply(Mutation::AddRow {
            section_id: section_id.to_string(),
            row: Row::new(row_id.clone()),
            index: None,
        })?;
        Ok(row_id)
    }

    pub fn delete_section(&mut self, section_id: &str) -> EditorResult<()> {
        self.apply(Mutation::DeleteSection {
            section_id: section_id.to_string(),
        })?;
        self.prune_selection();
        Ok(())
    }

    pub fn delete_row(&mut self, row_id: &str) -> EditorResult<()> {
        self.apply(Mutation::DeleteRow {
            row_id: row_id.to_string(),
        })?;
        self.prune_selection();
        Ok(())
    }

    pub fn move_section(&mut self, section_id: &str, index: usize) -> EditorResult<()> {
        if self.document.section_index(section_id) == Some(index) {
            return Ok(());
        }
        self.apply(Mutation::MoveSection {
            section_id: section_id.to_string(),
            index,
        })
    }

    pub fn update_section(&mut self, section_id: &str, patch: SectionPatch) -> EditorResult<()> {
        self.apply(Mutation::UpdateSection {
            section_id: section_id.to_string(),
            patch,
        })
    }

    pub fn update_row(
        &mut self,
        row_id: &str,
        alignment: Option<RowAlignment>,
        gap: Option<String>,
    ) -> EditorResult<()> {
        self.apply(Mutation::UpdateRow {
            row_id: row_id.to_string(),
            alignment,
            gap,
        })
    }

    // Commands

    /// Run a keyboard command; returns whether anything happened
    pub fn execute(&mut self, command: EditorCommand) -> EditorResult<bool> {
        match command {
            EditorCommand::Undo => Ok(self.undo()),
            EditorCommand::Redo => Ok(self.redo()),
            EditorCommand::Delete => match self.selection.clone() {
                Some(Selection::Widget(id)) => self.delete_widget(&id).map(|_| true),
                Some(Selection::Row(id)) => self.delete_row(&id).map(|_| true),
                Some(Selection::Section(id)) => self.delete_section(&id).map(|_| true),
                None => Ok(false),
            },
            EditorCommand::Duplicate => match self.selection.clone() {
                Some(Selection::Widget(id)) => self.duplicate_widget(&id).map(|_| true),
                _ => Ok(false),
            },
            EditorCommand::Escape => {
                let active = self.selection.is_some() || self.canvas.is_dragging();
                self.selection = None;
                self.canvas.clear();
                Ok(active)
            }
        }
    }

    // Persistence bookkeeping

    /// Record that `revision` was persisted as `saved`.
    ///
    /// Lifecycle fields (version, status, history, slug) are taken from the
    /// stored record; content edits made since `revision` are kept.
    pub fn mark_saved(&mut self, revision: u64, saved: &PageDocument) {
        if revision > self.saved_revision {
            self.saved_revision = revision;
        }
        copy_lifecycle(saved, &mut self.document);
    }
}

/// Undo snapshots only rewind content; lifecycle fields always follow the last save
fn with_lifecycle_of(mut restored: PageDocument, current: &PageDocument) -> PageDocument {
    copy_lifecycle(current, &mut restored);
    restored
}

fn copy_lifecycle(from: &PageDocument, to: &mut PageDocument) {
    to.version = from.version;
    to.status = from.status;
    to.history = from.history.clone();
    to.slug = from.slug.clone();
    to.updated_at = from.updated_at;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drop_zone::parse_zone_id;

    fn session() -> EditorSession {
        let registry = Arc::new(pagecraft_registry::initialize().unwrap());
        let doc = PageDocument::empty("page", "Home", "/", "s1", "r1");
        EditorSession::new(doc, registry, &EditorOptions::default())
            .with_id_generator(IdGenerator::from_seed("t"))
    }

    #[test]
    fn test_new_session_is_clean() {
        let session = session();
        assert!(!session.is_dirty());
        assert!(!session.can_undo());
    }

    #[test]
    fn test_drop_new_widget_on_section_uses_first_row() {
        let mut session = session();
        session.drag_start(DragPayload::NewWidget {
            widget_type: "heading".into(),
        });
        let outcome = session
            .drag_end(parse_zone_id("section-s1").as_ref())
            .unwrap();

        let DropOutcome::Inserted { widget_id, row_id } = outcome else {
            panic!("expected insert, got {:?}", outcome);
        };
        assert_eq!(row_id, "r1");
        assert_eq!(widget_id, "t-1");
        assert_eq!(session.selection(), Some(&Selection::Widget(widget_id)));
        assert!(session.is_dirty());
        assert!(!session.canvas().is_dragging());
    }

    #[test]
    fn test_drop_unknown_type_aborts() {
        let mut session = session();
        session.drag_start(DragPayload::NewWidget {
            widget_type: "carousel-3000".into(),
        });
        let err = session.drag_end(Some(&DropTarget::row("r1"))).unwrap_err();
        assert!(matches!(err, EditorError::Registry(_)));
        assert_eq!(session.document().widget_count(), 0);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_drop_on_nothing_is_cancelled() {
        let mut session = session();
        session.drag_start(DragPayload::NewWidget {
            widget_type: "text".into(),
        });
        assert_eq!(session.drag_end(None).unwrap(), DropOutcome::Cancelled);
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_drop_on_missing_section_discarded() {
        let mut session = session();
        session.drag_start(DragPayload::NewWidget {
            widget_type: "text".into(),
        });
        let outcome = session.drag_end(Some(&DropTarget::section("gone"))).unwrap();
        assert_eq!(outcome, DropOutcome::Discarded);
        assert_eq!(session.document().widget_count(), 0);
    }

    #[test]
    fn test_drag_over_only_highlights() {
        let mut session = session();
        session.drag_start(DragPayload::NewWidget {
            widget_type: "text".into(),
        });
        session.drag_over(Some(&DropTarget::row("r1")));
        assert_eq!(session.canvas().drag_over_section.as_deref(), Some("s1"));
        assert_eq!(session.canvas().drag_over_row.as_deref(), Some("r1"));
        assert!(!session.is_dirty());

        session.drag_over(None);
        assert!(session.canvas().drag_over_row.is_none());
        assert!(session.canvas().is_dragging());
    }

    #[test]
    fn test_delete_clears_selection() {
        let mut session = session();
        let id = session.add_widget("text", "r1").unwrap();
        assert!(session.execute(EditorCommand::Delete).unwrap());
        assert!(session.document().widget(&id).is_none());
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_duplicate_command() {
        let mut session = session();
        let id = session.add_widget("text", "r1").unwrap();
        assert!(session.execute(EditorCommand::Duplicate).unwrap());
        let row = session.document().row("r1").unwrap();
        assert_eq!(row.widgets.len(), 2);
        assert_eq!(row.widgets[0].id, id);
        assert_ne!(row.widgets[1].id, id);
        assert_eq!(row.widgets[1].props, row.widgets[0].props);
    }

    #[test]
    fn test_undo_keeps_selection_out_of_history() {
        let mut session = session();
        let id = session.add_widget("text", "r1").unwrap();
        session.update_widget(&id, serde_json::json!({ "content": "Hi" })).unwrap();
        session.clear_selection();

        assert!(session.undo());
        assert!(session.selection().is_none());
        assert!(session.undo());
        assert_eq!(session.document().widget_count(), 0);
        assert!(!session.undo());
    }

    #[test]
    fn test_auto_save_interval_clamped() {
        assert_eq!(
            EditorOptions::default().with_auto_save_seconds(1).auto_save_interval,
            Duration::from_secs(5)
        );
        assert_eq!(
            EditorOptions::default().with_auto_save_seconds(120).auto_save_interval,
            Duration::from_secs(30)
        );
    }
}
