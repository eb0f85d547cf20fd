use super::text_align;
use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "heading";

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Heading",
        WidgetCategory::Basic,
        json!({
            "type": "object",
            "required": ["text"],
            "properties": {
                "text": { "type": "string", "title": "Text" },
                "level": { "type": "integer", "minimum": 1, "maximum": 6, "title": "Level" },
                "align": { "enum": ["left", "center", "right"], "title": "Alignment" }
            }
        }),
    )?
    .with_description("Section title")
    .with_icon("heading")
    .with_default_props(json!({ "text": "Heading", "level": 2, "align": "left" }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view))
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    let level = ctx.u64_or("level", 2).clamp(1, 6);
    VNode::element(format!("h{}", level))
        .with_class("pc-heading")
        .with_style("text-align", text_align(ctx.str_or("align", "left")))
        .with_style("color", ctx.color("text"))
        .with_child(VNode::text(ctx.str_or("text", "")))
}
