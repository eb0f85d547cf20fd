//! Flat drop-zone ids for UI drag-and-drop adapters.
//!
//! Adapters that need a single string per drop zone use `section-<id>` and
//! `row-<id>`; widget zones use the bare widget id, which document validation
//! keeps clear of both prefixes. Only adapters deal in these strings; the engine
//! takes [`DropTarget`] values.

use crate::drag::{DropTarget, TargetKind};
use pagecraft_document::RESERVED_WIDGET_ID_PREFIXES;

const SECTION_PREFIX: &str = RESERVED_WIDGET_ID_PREFIXES[0];
const ROW_PREFIX: &str = RESERVED_WIDGET_ID_PREFIXES[1];

/// Zone id for a typed target
pub fn zone_id(target: &DropTarget) -> String {
    match target.kind {
        TargetKind::Section => format!("{}{}", SECTION_PREFIX, target.id),
        TargetKind::Row => format!("{}{}", ROW_PREFIX, target.id),
        TargetKind::Widget => target.id.clone(),
    }
}

/// Typed target for a zone id produced by [`zone_id`]
pub fn parse_zone_id(zone: &str) -> Option<DropTarget> {
    if zone.is_empty() {
        return None;
    }
    if let Some(id) = zone.strip_prefix(SECTION_PREFIX) {
        return (!id.is_empty()).then(|| DropTarget::section(id));
    }
    if let Some(id) = zone.strip_prefix(ROW_PREFIX) {
        return (!id.is_empty()).then(|| DropTarget::row(id));
    }
    Some(DropTarget::widget(zone))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_ids() {
        assert_eq!(zone_id(&DropTarget::section("abc-1")), "section-abc-1");
        assert_eq!(zone_id(&DropTarget::row("abc-2")), "row-abc-2");
        assert_eq!(zone_id(&DropTarget::widget("abc-3")), "abc-3");
    }

    #[test]
    fn test_parse_zone_ids() {
        assert_eq!(parse_zone_id("section-abc-1"), Some(DropTarget::section("abc-1")));
        assert_eq!(parse_zone_id("row-abc-2"), Some(DropTarget::row("abc-2")));
        assert_eq!(parse_zone_id("abc-3"), Some(DropTarget::widget("abc-3")));
        assert_eq!(parse_zone_id("row-"), None);
        assert_eq!(parse_zone_id(""), None);
    }

    #[test]
    fn test_valid_widget_ids_parse_back_as_widgets() {
        use pagecraft_document::{validate_document, PageDocument, Row, Section, WidgetBase};

        let ids = ["a1b2c3d4-7", "rowan", "sections"];
        let row = ids
            .iter()
            .fold(Row::new("r"), |row, id| row.with_widget(WidgetBase::new(*id, "text", 1)));
        let page = PageDocument::new("p", "P", "/p", vec![Section::new("s").with_row(row)]);
        assert!(validate_document(&page).is_empty());

        for id in ids {
            let zone = zone_id(&DropTarget::widget(id));
            assert_eq!(parse_zone_id(&zone), Some(DropTarget::widget(id)));
        }
    }
}
