use super::text_align;
use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "text";

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Text",
        WidgetCategory::Basic,
        json!({
            "type": "object",
            "required": ["content"],
            "properties": {
                "content": { "type": "string", "title": "Content" },
                "align": { "enum": ["left", "center", "right"], "title": "Alignment" }
            }
        }),
    )?
    .with_description("Paragraph of text")
    .with_icon("type")
    .with_default_props(json!({ "content": "Tell your customers about Your Store.", "align": "left" }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view))
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    // Blank lines separate paragraphs
    let paragraphs = ctx
        .str_or("content", "")
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| VNode::element("p").with_child(VNode::text(p.trim())))
        .collect();

    VNode::element("div")
        .with_class("pc-text")
        .with_style("text-align", text_align(ctx.str_or("align", "left")))
        .with_style("color", ctx.color("text"))
        .with_children(paragraphs)
}
