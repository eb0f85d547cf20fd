use crate::model::{PageDocument, Row, Section, WidgetBase};
use std::sync::Arc;

/// Visitor for walking a page document immutably
///
/// Default implementations walk the whole tree; override the `visit_*` methods
/// that need to act on a node.
pub trait Visitor: Sized {
    fn visit_page(&mut self, page: &PageDocument) {
        walk_page(self, page);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_row(&mut self, row: &Row) {
        walk_row(self, row);
    }

    fn visit_widget(&mut self, _widget: &WidgetBase) {
        // Leaf node, no children to walk
    }
}

/// Mutable visitor for transforming a page document in place
///
/// Visiting a section copies it if it is shared with another document clone.
pub trait VisitorMut: Sized {
    fn visit_page_mut(&mut self, page: &mut PageDocument) {
        walk_page_mut(self, page);
    }

    fn visit_section_mut(&mut self, section: &mut Section) {
        walk_section_mut(self, section);
    }

    fn visit_row_mut(&mut self, row: &mut Row) {
        walk_row_mut(self, row);
    }

    fn visit_widget_mut(&mut self, _widget: &mut WidgetBase) {
        // Leaf node, no children to walk
    }
}

pub fn walk_page<V: Visitor>(visitor: &mut V, page: &PageDocument) {
    for section in &page.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for row in &section.rows {
        visitor.visit_row(row);
    }
}

pub fn walk_row<V: Visitor>(visitor: &mut V, row: &Row) {
    for widget in &row.widgets {
        visitor.visit_widget(widget);
    }
}

pub fn walk_page_mut<V: VisitorMut>(visitor: &mut V, page: &mut PageDocument) {
    for section in &mut page.sections {
        visitor.visit_section_mut(Arc::make_mut(section));
    }
}

pub fn walk_section_mut<V: VisitorMut>(visitor: &mut V, section: &mut Section) {
    for row in &mut section.rows {
        visitor.visit_row_mut(row);
    }
}

pub fn walk_row_mut<V: VisitorMut>(visitor: &mut V, row: &mut Row) {
    for widget in &mut row.widgets {
        visitor.visit_widget_mut(widget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountTypes(Vec<String>);

    impl Visitor for CountTypes {
        fn visit_widget(&mut self, widget: &WidgetBase) {
            self.0.push(widget.widget_type.clone());
        }
    }

    struct BumpVersions;

    impl VisitorMut for BumpVersions {
        fn visit_widget_mut(&mut self, widget: &mut WidgetBase) {
            widget.version += 1;
        }
    }

    fn sample() -> PageDocument {
        PageDocument::new(
            "p",
            "P",
            "/p",
            vec![Section::new("s").with_row(
                Row::new("r")
                    .with_widget(WidgetBase::new("a", "text", 1))
                    .with_widget(WidgetBase::new("b", "image", 1)),
            )],
        )
    }

    #[test]
    fn test_visitor_sees_widgets_in_order() {
        let mut counter = CountTypes(vec![]);
        counter.visit_page(&sample());
        assert_eq!(counter.0, vec!["text", "image"]);
    }

    #[test]
    fn test_visitor_mut_does_not_touch_clones() {
        let original = sample();
        let mut copy = original.clone();
        BumpVersions.visit_page_mut(&mut copy);
        assert!(copy.widgets().all(|w| w.version == 2));
        assert!(original.widgets().all(|w| w.version == 1));
    }
}
