//! # Pagecraft Editor
//!
//! Canvas editing engine for page documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ UI adapter: pointer gestures, drop-zone ids │
//! └─────────────────────────────────────────────┘
//!                     ↓  DragPayload / DropTarget / EditorCommand
//! ┌─────────────────────────────────────────────┐
//! │ EditorSession                               │
//! │  - drag state machine                       │
//! │  - Mutation (validated, id addressed)       │
//! │  - snapshot undo/redo                       │
//! │  - properties + responsive style editors    │
//! └─────────────────────────────────────────────┘
//!                     ↓  save_if_dirty / AutoSave
//! ┌─────────────────────────────────────────────┐
//! │ PageRepository                              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{DragPayload, DropTarget, EditorOptions, EditorSession};
//!
//! let mut session = EditorSession::new(page, registry, &EditorOptions::default());
//!
//! session.drag_start(DragPayload::NewWidget { widget_type: "hero".into() });
//! session.drag_end(Some(&DropTarget::section(&section_id)))?;
//!
//! session.undo();
//! ```

mod autosave;
mod drag;
pub mod drop_zone;
mod errors;
mod mutations;
mod properties;
mod responsive;
mod session;
mod undo_stack;

pub use autosave::{save_if_dirty, AutoSave, SharedSession};
pub use drag::{CanvasState, DragPayload, DropOutcome, DropTarget, TargetKind};
pub use errors::{EditorError, EditorResult, MutationError};
pub use mutations::{Mutation, SectionPatch};
pub use responsive::{ResponsiveStyleEditor, StylePatch};
pub use session::{
    EditorCommand, EditorOptions, EditorSession, Selection, MAX_AUTO_SAVE_SECONDS,
    MIN_AUTO_SAVE_SECONDS,
};
pub use undo_stack::{UndoStack, DEFAULT_UNDO_LIMIT};
