use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "image";

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Image",
        WidgetCategory::Media,
        json!({
            "type": "object",
            "required": ["src"],
            "properties": {
                "src": { "type": "string", "title": "Image URL" },
                "alt": { "type": "string", "title": "Alt text" },
                "href": { "type": "string", "title": "Link" },
                "fit": { "enum": ["cover", "contain"], "title": "Fit" }
            }
        }),
    )?
    .with_description("Single image, optionally linked")
    .with_icon("image")
    .with_default_props(json!({ "src": "", "alt": "", "fit": "cover" }))
    .with_default_col_span(
        ColSpan::empty()
            .with(Breakpoint::Sm, 12)
            .with(Breakpoint::Md, 6),
    )
    .with_view(view))
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    let image = VNode::element("img")
        .with_class("pc-image")
        .with_attr("src", ctx.str_or("src", ""))
        .with_attr("alt", ctx.str_or("alt", ""))
        .with_attr("loading", "lazy")
        .with_style("object-fit", ctx.str_or("fit", "cover"))
        .with_style("width", "100%");

    match ctx.str("href") {
        Some(href) if !href.is_empty() => VNode::element("a").with_attr("href", href).with_child(image),
        _ => image,
    }
}
