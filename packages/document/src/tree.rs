//! Id lookups across the section → row → widget tree.
//!
//! Mutable lookups go through `Arc::make_mut`, so only the section that owns the
//! target is copied when it is shared with an undo snapshot.

use crate::model::{PageDocument, Row, Section, WidgetBase};
use std::sync::Arc;

/// Position of a row inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLocation {
    pub section: usize,
    pub row: usize,
}

/// Position of a widget inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetLocation {
    pub section: usize,
    pub row: usize,
    pub index: usize,
}

impl WidgetLocation {
    pub fn row_location(&self) -> RowLocation {
        RowLocation {
            section: self.section,
            row: self.row,
        }
    }
}

impl PageDocument {
    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .map(|s| s.as_ref())
    }

    pub fn section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        let index = self.section_index(section_id)?;
        Some(Arc::make_mut(&mut self.sections[index]))
    }

    pub fn section_at_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index).map(Arc::make_mut)
    }

    pub fn locate_row(&self, row_id: &str) -> Option<RowLocation> {
        self.sections.iter().enumerate().find_map(|(s, section)| {
            section
                .rows
                .iter()
                .position(|r| r.id == row_id)
                .map(|r| RowLocation { section: s, row: r })
        })
    }

    /// Owning section id of a row (linear search)
    pub fn section_of_row(&self, row_id: &str) -> Option<&str> {
        let location = self.locate_row(row_id)?;
        Some(self.sections[location.section].id.as_str())
    }

    pub fn row(&self, row_id: &str) -> Option<&Row> {
        let location = self.locate_row(row_id)?;
        self.row_at(location)
    }

    pub fn row_mut(&mut self, row_id: &str) -> Option<&mut Row> {
        let location = self.locate_row(row_id)?;
        self.row_at_mut(location)
    }

    pub fn row_at(&self, location: RowLocation) -> Option<&Row> {
        self.sections
            .get(location.section)
            .and_then(|s| s.rows.get(location.row))
    }

    pub fn row_at_mut(&mut self, location: RowLocation) -> Option<&mut Row> {
        let section = self.section_at_mut(location.section)?;
        section.rows.get_mut(location.row)
    }

    pub fn locate_widget(&self, widget_id: &str) -> Option<WidgetLocation> {
        for (s, section) in self.sections.iter().enumerate() {
            for (r, row) in section.rows.iter().enumerate() {
                if let Some(index) = row.position(widget_id) {
                    return Some(WidgetLocation {
                        section: s,
                        row: r,
                        index,
                    });
                }
            }
        }
        None
    }

    pub fn widget(&self, widget_id: &str) -> Option<&WidgetBase> {
        self.widgets().find(|w| w.id == widget_id)
    }

    pub fn widget_mut(&mut self, widget_id: &str) -> Option<&mut WidgetBase> {
        let location = self.locate_widget(widget_id)?;
        self.row_at_mut(location.row_location())?
            .widgets
            .get_mut(location.index)
    }

    /// Every widget in rendering order
    pub fn widgets(&self) -> impl Iterator<Item = &WidgetBase> {
        self.sections
            .iter()
            .flat_map(|s| s.rows.iter())
            .flat_map(|r| r.widgets.iter())
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    pub fn widget_count(&self) -> usize {
        self.widgets().count()
    }

    /// True when any section, row or widget uses `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.sections.iter().any(|s| {
            s.id == id
                || s.rows
                    .iter()
                    .any(|r| r.id == id || r.widgets.iter().any(|w| w.id == id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Row, Section, WidgetBase};

    fn sample() -> PageDocument {
        PageDocument::new(
            "p1",
            "Home",
            "/",
            vec![
                Section::new("s1")
                    .with_row(
                        Row::new("r1")
                            .with_widget(WidgetBase::new("a", "text", 1))
                            .with_widget(WidgetBase::new("b", "text", 1)),
                    )
                    .with_row(Row::new("r2")),
                Section::new("s2").with_row(Row::new("r3").with_widget(WidgetBase::new("c", "image", 1))),
            ],
        )
    }

    #[test]
    fn test_locate_widget() {
        let doc = sample();
        assert_eq!(
            doc.locate_widget("c"),
            Some(WidgetLocation {
                section: 1,
                row: 0,
                index: 0
            })
        );
        assert_eq!(doc.locate_widget("missing"), None);
    }

    #[test]
    fn test_section_of_row() {
        let doc = sample();
        assert_eq!(doc.section_of_row("r2"), Some("s1"));
        assert_eq!(doc.section_of_row("r3"), Some("s2"));
        assert_eq!(doc.section_of_row("nope"), None);
    }

    #[test]
    fn test_widget_mut_copies_only_owning_section() {
        let original = sample();
        let mut edited = original.clone();

        edited.widget_mut("a").unwrap().version = 2;

        assert_eq!(original.widget("a").unwrap().version, 1);
        assert_eq!(edited.widget("a").unwrap().version, 2);
        // untouched section still shared
        assert!(Arc::ptr_eq(&original.sections[1], &edited.sections[1]));
        assert!(!Arc::ptr_eq(&original.sections[0], &edited.sections[0]));
    }

    #[test]
    fn test_contains_id_covers_all_levels() {
        let doc = sample();
        assert!(doc.contains_id("s2"));
        assert!(doc.contains_id("r2"));
        assert!(doc.contains_id("b"));
        assert!(!doc.contains_id("zzz"));
        assert_eq!(doc.widget_count(), 3);
    }
}
