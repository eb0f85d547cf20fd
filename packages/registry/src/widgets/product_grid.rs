use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "product-grid";

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Product Grid",
        WidgetCategory::Commerce,
        json!({
            "type": "object",
            "required": ["collection"],
            "properties": {
                "collection": { "type": "string", "title": "Collection" },
                "columns": { "type": "integer", "minimum": 1, "maximum": 6, "title": "Columns" },
                "limit": { "type": "integer", "minimum": 1, "maximum": 48, "title": "Products shown" },
                "showPrice": { "type": "boolean", "title": "Show price" }
            }
        }),
    )?
    .with_description("Products from a collection")
    .with_icon("shopping-bag")
    .with_default_props(json!({ "collection": "all", "columns": 4, "limit": 8, "showPrice": true }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view))
}

/// Product data is fetched client-side; the grid renders one slot per product
fn view(ctx: &ViewContext<'_>) -> VNode {
    let columns = ctx.u64_or("columns", 4).clamp(1, 6);
    let limit = ctx.u64_or("limit", 8).clamp(1, 48);
    let show_price = ctx.bool_or("showPrice", true);

    let slots = (0..limit)
        .map(|i| {
            let mut card = VNode::element("div")
                .with_class("pc-product-card")
                .with_attr("data-slot", i.to_string())
                .with_child(VNode::element("div").with_class("pc-product-image"))
                .with_child(VNode::element("span").with_class("pc-product-title"));
            if show_price {
                card = card.with_child(
                    VNode::element("span")
                        .with_class("pc-product-price")
                        .with_attr("data-currency", ctx.store.currency.clone()),
                );
            }
            card
        })
        .collect();

    VNode::element("div")
        .with_class("pc-product-grid")
        .with_attr("data-collection", ctx.str_or("collection", "all"))
        .with_attr("data-limit", limit.to_string())
        .with_style("display", "grid")
        .with_style("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", columns))
        .with_children(slots)
}
