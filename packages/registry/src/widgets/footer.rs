use super::header::{nav_links, nav_links_schema};
use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "footer";

/// Store footer scaffolding for system pages
pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Store Footer",
        WidgetCategory::Navigation,
        json!({
            "type": "object",
            "properties": {
                "copyright": { "type": "string", "title": "Copyright" },
                "links": nav_links_schema()
            }
        }),
    )?
    .with_icon("panel-bottom")
    .with_default_props(json!({
        "copyright": "© {{store_name}}. All rights reserved.",
        "links": [{ "label": "Contact", "href": "/contact" }]
    }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view)
    .system())
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    VNode::element("footer")
        .with_class("pc-footer")
        .with_style("color", ctx.color("muted"))
        .with_child(nav_links(ctx.array("links")))
        .with_child(VNode::element("small").with_child(VNode::text(ctx.str_or("copyright", ""))))
}
