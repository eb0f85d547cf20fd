//! # Undo/Redo Stack
//!
//! Snapshot history for one editing session.
//!
//! - Every successful mutation pushes the document as it was *before* the edit
//! - Undo swaps the current document for the latest snapshot and keeps the
//!   current one for redo; redo is the mirror
//! - New edits clear the redo stack
//! - Selection is not part of a snapshot
//!
//! Snapshots share unchanged sections with the live document, so each entry
//! costs one section list plus the sections an edit actually touched.

use pagecraft_document::PageDocument;
use std::collections::VecDeque;

/// Default number of undo levels kept
pub const DEFAULT_UNDO_LIMIT: usize = 50;

#[derive(Debug, Clone)]
struct Snapshot {
    document: PageDocument,
    description: &'static str,
}

#[derive(Debug)]
pub struct UndoStack {
    /// Oldest first
    undo_stack: VecDeque<Snapshot>,
    redo_stack: Vec<Snapshot>,
    /// 0 = unlimited
    max_levels: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_UNDO_LIMIT)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_levels,
        }
    }

    /// Record the document as it was before an edit described by `description`
    pub fn push(&mut self, previous: PageDocument, description: &'static str) {
        self.undo_stack.push_back(Snapshot {
            document: previous,
            description,
        });
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
    }

    /// Step back: returns the document to restore, keeping `current` for redo
    pub fn undo(&mut self, current: PageDocument) -> Option<PageDocument> {
        let snapshot = self.undo_stack.pop_back()?;
        self.redo_stack.push(Snapshot {
            document: current,
            description: snapshot.description,
        });
        Some(snapshot.document)
    }

    /// Step forward: returns the document to restore, keeping `current` for undo
    pub fn redo(&mut self, current: PageDocument) -> Option<PageDocument> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push_back(Snapshot {
            document: current,
            description: snapshot.description,
        });
        Some(snapshot.document)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Label of the edit the next undo reverts
    pub fn undo_description(&self) -> Option<&'static str> {
        self.undo_stack.back().map(|s| s.description)
    }

    pub fn redo_description(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|s| s.description)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
