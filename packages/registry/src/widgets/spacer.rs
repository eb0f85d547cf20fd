use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "spacer";

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Spacer",
        WidgetCategory::Layout,
        json!({
            "type": "object",
            "properties": {
                "height": { "type": "string", "title": "Height" }
            }
        }),
    )?
    .with_description("Vertical whitespace")
    .with_icon("move-vertical")
    .with_default_props(json!({ "height": "48px" }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view))
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    VNode::element("div")
        .with_class("pc-spacer")
        .with_attr("aria-hidden", "true")
        .with_style("height", ctx.str_or("height", "48px"))
}
