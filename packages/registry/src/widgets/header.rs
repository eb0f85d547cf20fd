use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::{json, Value};

pub const TYPE: &str = "header";

/// Store header scaffolding for system pages
pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Store Header",
        WidgetCategory::Navigation,
        json!({
            "type": "object",
            "properties": {
                "showLogo": { "type": "boolean", "title": "Show logo" },
                "links": nav_links_schema()
            }
        }),
    )?
    .with_icon("panel-top")
    .with_default_props(json!({
        "showLogo": true,
        "links": [
            { "label": "Home", "href": "/" },
            { "label": "Shop", "href": "/products" }
        ]
    }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view)
    .system())
}

pub(crate) fn nav_links_schema() -> Value {
    json!({
        "type": "array",
        "title": "Links",
        "items": {
            "type": "object",
            "required": ["label", "href"],
            "properties": {
                "label": { "type": "string" },
                "href": { "type": "string" }
            }
        }
    })
}

pub(crate) fn nav_links(links: &[Value]) -> VNode {
    let items = links
        .iter()
        .filter_map(|link| {
            let label = link.get("label")?.as_str()?;
            let href = link.get("href")?.as_str()?;
            Some(VNode::element("a").with_attr("href", href).with_child(VNode::text(label)))
        })
        .collect();
    VNode::element("nav").with_children(items)
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    let brand = match (&ctx.store.logo_url, ctx.bool_or("showLogo", true)) {
        (Some(logo), true) => VNode::element("img")
            .with_class("pc-logo")
            .with_attr("src", logo.clone())
            .with_attr("alt", ctx.store.name.clone()),
        _ => VNode::element("span")
            .with_class("pc-store-name")
            .with_child(VNode::text(ctx.store.name.clone())),
    };

    VNode::element("header")
        .with_class("pc-header")
        .with_style("background-color", ctx.color("surface"))
        .with_child(VNode::element("a").with_attr("href", "/").with_child(brand))
        .with_child(nav_links(ctx.array("links")))
}
