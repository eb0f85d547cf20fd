use super::text_align;
use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::ColSpan;
use serde_json::json;

pub const TYPE: &str = "hero";

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Hero Banner",
        WidgetCategory::Marketing,
        json!({
            "type": "object",
            "required": ["title"],
            "properties": {
                "title": { "type": "string", "title": "Title" },
                "subtitle": { "type": "string", "title": "Subtitle" },
                "ctaLabel": { "type": "string", "title": "Button label" },
                "ctaHref": { "type": "string", "title": "Button link" },
                "backgroundImage": { "type": "string", "title": "Background image" },
                "align": { "enum": ["left", "center", "right"], "title": "Alignment" }
            }
        }),
    )?
    .with_description("Full-width banner with headline and call to action")
    .with_icon("layout-panel-top")
    .with_default_props(json!({
        "title": "Welcome to {{store_name}}",
        "subtitle": "Discover our latest collection",
        "ctaLabel": "Shop now",
        "ctaHref": "/products",
        "align": "center"
    }))
    .with_default_col_span(ColSpan::empty().with(Breakpoint::Sm, 12))
    .with_view(view))
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    let mut hero = VNode::element("div")
        .with_class("pc-hero")
        .with_style("text-align", text_align(ctx.str_or("align", "center")))
        .with_style("color", ctx.color("background"))
        .with_style("background-color", ctx.color("primary"));

    if let Some(image) = ctx.str("backgroundImage") {
        hero = hero
            .with_style("background-image", format!("url({})", image))
            .with_style("background-size", "cover");
    }

    hero = hero.with_child(VNode::element("h1").with_child(VNode::text(ctx.str_or("title", ""))));

    if let Some(subtitle) = ctx.str("subtitle") {
        hero = hero.with_child(VNode::element("p").with_child(VNode::text(subtitle)));
    }

    if let Some(label) = ctx.str("ctaLabel") {
        hero = hero.with_child(
            VNode::element("a")
                .with_class("pc-button")
                .with_attr("href", ctx.str_or("ctaHref", "#"))
                .with_style("background-color", ctx.color("accent"))
                .with_child(VNode::text(label)),
        );
    }

    hero
}
