//! Structural invariant checks for page documents.

use crate::model::{PageDocument, Row, Section, WidgetBase, GRID_COLUMNS};
use crate::slug::is_valid_slug;
use crate::visitor::{walk_row, walk_section, Visitor};
use pagecraft_common::Breakpoint;
use std::collections::HashSet;
use thiserror::Error;

/// Prefixes drag-and-drop zone ids give to sections and rows; widget zones use the
/// bare widget id, so no widget id may start with one of these
pub const RESERVED_WIDGET_ID_PREFIXES: [&str; 2] = ["section-", "row-"];

/// A single invariant violation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentIssue {
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Widget {widget_id} has colSpan {value} at {breakpoint} (must be 1-{max})", max = GRID_COLUMNS)]
    ColSpanOutOfRange {
        widget_id: String,
        breakpoint: Breakpoint,
        value: u8,
    },

    #[error("Widget id {0} starts with a reserved prefix")]
    ReservedWidgetId(String),

    #[error("Widget {widget_id} has an empty type")]
    EmptyWidgetType { widget_id: String },

    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Document failed validation: {}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Invalid(Vec<DocumentIssue>),
}

struct InvariantChecker {
    section_ids: HashSet<String>,
    row_ids: HashSet<String>,
    widget_ids: HashSet<String>,
    issues: Vec<DocumentIssue>,
}

impl Visitor for InvariantChecker {
    fn visit_section(&mut self, section: &Section) {
        if !self.section_ids.insert(section.id.clone()) {
            self.issues.push(DocumentIssue::DuplicateId {
                kind: "section",
                id: section.id.clone(),
            });
        }
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        if !self.row_ids.insert(row.id.clone()) {
            self.issues.push(DocumentIssue::DuplicateId {
                kind: "row",
                id: row.id.clone(),
            });
        }
        walk_row(self, row);
    }

    fn visit_widget(&mut self, widget: &WidgetBase) {
        if !self.widget_ids.insert(widget.id.clone()) {
            self.issues.push(DocumentIssue::DuplicateId {
                kind: "widget",
                id: widget.id.clone(),
            });
        }
        if RESERVED_WIDGET_ID_PREFIXES
            .iter()
            .any(|prefix| widget.id.starts_with(prefix))
        {
            self.issues
                .push(DocumentIssue::ReservedWidgetId(widget.id.clone()));
        }
        if widget.widget_type.is_empty() {
            self.issues.push(DocumentIssue::EmptyWidgetType {
                widget_id: widget.id.clone(),
            });
        }
        for (breakpoint, value) in widget.col_span.iter() {
            if !(1..=GRID_COLUMNS).contains(value) {
                self.issues.push(DocumentIssue::ColSpanOutOfRange {
                    widget_id: widget.id.clone(),
                    breakpoint,
                    value: *value,
                });
            }
        }
    }
}

/// Collect every invariant violation in `page`
pub fn validate_document(page: &PageDocument) -> Vec<DocumentIssue> {
    let mut checker = InvariantChecker {
        section_ids: HashSet::new(),
        row_ids: HashSet::new(),
        widget_ids: HashSet::new(),
        issues: Vec::new(),
    };

    if !is_valid_slug(&page.slug) {
        checker.issues.push(DocumentIssue::InvalidSlug(page.slug.clone()));
    }
    checker.visit_page(page);
    checker.issues
}

impl PageDocument {
    /// Fails with every violation found
    pub fn ensure_valid(&self) -> Result<(), DocumentError> {
        let issues = validate_document(self);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(DocumentError::Invalid(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ColSpan;

    #[test]
    fn test_valid_document_has_no_issues() {
        let page = PageDocument::empty("p", "Home", "/", "s", "r");
        assert!(validate_document(&page).is_empty());
        assert!(page.ensure_valid().is_ok());
    }

    #[test]
    fn test_duplicate_widget_ids_across_rows() {
        let page = PageDocument::new(
            "p",
            "P",
            "/p",
            vec![Section::new("s")
                .with_row(Row::new("r1").with_widget(WidgetBase::new("w", "text", 1)))
                .with_row(Row::new("r2").with_widget(WidgetBase::new("w", "text", 1)))],
        );
        assert_eq!(
            validate_document(&page),
            vec![DocumentIssue::DuplicateId {
                kind: "widget",
                id: "w".to_string()
            }]
        );
    }

    #[test]
    fn test_widget_ids_cannot_look_like_zone_ids() {
        let page = PageDocument::new(
            "p",
            "P",
            "/p",
            vec![Section::new("s").with_row(
                Row::new("r")
                    .with_widget(WidgetBase::new("row-hero", "hero", 1))
                    .with_widget(WidgetBase::new("section-banner", "text", 1))
                    .with_widget(WidgetBase::new("sectional", "text", 1)),
            )],
        );
        assert_eq!(
            validate_document(&page),
            vec![
                DocumentIssue::ReservedWidgetId("row-hero".to_string()),
                DocumentIssue::ReservedWidgetId("section-banner".to_string()),
            ]
        );
        assert!(page.ensure_valid().is_err());
    }

    #[test]
    fn test_col_span_range() {
        let widget = WidgetBase::new("w", "text", 1).with_col_span(
            ColSpan::empty()
                .with(Breakpoint::Sm, 0)
                .with(Breakpoint::Lg, 13),
        );
        let page = PageDocument::new(
            "p",
            "P",
            "/p",
            vec![Section::new("s").with_row(Row::new("r").with_widget(widget))],
        );

        let issues = validate_document(&page);
        assert_eq!(issues.len(), 2);
        assert!(page.ensure_valid().unwrap_err().to_string().contains("colSpan 13 at lg"));
    }

    #[test]
    fn test_invalid_slug() {
        let page = PageDocument::empty("p", "P", "no-leading-slash", "s", "r");
        assert_eq!(
            validate_document(&page),
            vec![DocumentIssue::InvalidSlug("no-leading-slash".to_string())]
        );
    }
}
