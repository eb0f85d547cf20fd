//! # Canvas Drag State
//!
//! ```text
//!   idle ──drag_start──→ dragging ──drag_over──→ dragging (highlight only)
//!                           │
//!                        drag_end ──→ idle (+ at most one document mutation)
//! ```
//!
//! Highlight fields are for visual feedback only. The drop is resolved from
//! the target handed to `drag_end`, never from the highlight.

use serde::{Deserialize, Serialize};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum DragPayload {
    /// A widget type from the library
    #[serde(rename_all = "camelCase")]
    NewWidget { widget_type: String },
    /// A widget already on the canvas
    #[serde(rename_all = "camelCase")]
    Widget { widget_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Section,
    Row,
    Widget,
}

/// Typed drop target
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropTarget {
    pub kind: TargetKind,
    pub id: String,
}

impl DropTarget {
    pub fn section(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Section,
            id: id.into(),
        }
    }

    pub fn row(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Row,
            id: id.into(),
        }
    }

    pub fn widget(id: impl Into<String>) -> Self {
        Self {
            kind: TargetKind::Widget,
            id: id.into(),
        }
    }
}

/// Transient canvas state; never saved and never part of undo history
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasState {
    pub active_drag_item: Option<DragPayload>,
    pub drag_over_section: Option<String>,
    pub drag_over_row: Option<String>,
}

impl CanvasState {
    pub fn is_dragging(&self) -> bool {
        self.active_drag_item.is_some()
    }

    pub fn clear(&mut self) {
        *self = CanvasState::default();
    }

    pub fn clear_highlight(&mut self) {
        self.drag_over_section = None;
        self.drag_over_row = None;
    }
}

/// What a finished drag did to the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Widget reordered inside its row
    Reordered { widget_id: String },
    /// Existing widget moved into another row
    Moved { widget_id: String, row_id: String },
    /// New widget created from the library
    Inserted { widget_id: String, row_id: String },
    /// Drop target could not be resolved; document unchanged
    Discarded,
    /// Drag ended outside any target, or no drag was active
    Cancelled,
}

impl DropOutcome {
    pub fn changed_document(&self) -> bool {
        matches!(
            self,
            DropOutcome::Reordered { .. } | DropOutcome::Moved { .. } | DropOutcome::Inserted { .. }
        )
    }
}
