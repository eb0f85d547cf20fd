use crate::config::{ViewContext, WidgetCategory, WidgetConfig};
use crate::errors::RegistryResult;
use pagecraft_common::{Breakpoint, VNode};
use pagecraft_document::{ColSpan, WidgetBase};
use serde_json::{json, Value};

pub const TYPE: &str = "button";

/// Current props schema version. v1 stored the caption under `text`.
pub const VERSION: u32 = 2;

pub fn config() -> RegistryResult<WidgetConfig> {
    Ok(WidgetConfig::new(
        TYPE,
        "Button",
        WidgetCategory::Basic,
        json!({
            "type": "object",
            "required": ["label", "href"],
            "properties": {
                "label": { "type": "string", "title": "Label" },
                "href": { "type": "string", "title": "Link" },
                "variant": { "enum": ["primary", "secondary", "outline"], "title": "Style" },
                "openInNewTab": { "type": "boolean", "title": "Open in new tab" }
            }
        }),
    )?
    .with_description("Call-to-action link styled as a button")
    .with_icon("mouse-pointer-click")
    .with_default_props(json!({ "label": "Click me", "href": "#", "variant": "primary" }))
    .with_default_col_span(
        ColSpan::empty()
            .with(Breakpoint::Sm, 12)
            .with(Breakpoint::Lg, 4),
    )
    .with_migration(VERSION, migrate)
    .with_view(view))
}

fn migrate(widget: &WidgetBase, to: u32) -> Result<WidgetBase, String> {
    let mut next = widget.clone();
    match to {
        2 => {
            let props = next
                .props
                .as_object_mut()
                .ok_or_else(|| "button props are not an object".to_string())?;
            if let Some(text) = props.remove("text") {
                props.entry("label").or_insert(text);
            }
            props
                .entry("href")
                .or_insert_with(|| Value::String("#".to_string()));
        }
        other => return Err(format!("no migration to v{}", other)),
    }
    next.version = to;
    Ok(next)
}

fn view(ctx: &ViewContext<'_>) -> VNode {
    let variant = ctx.str_or("variant", "primary");
    let mut button = VNode::element("a")
        .with_class("pc-button")
        .with_class(format!("pc-button-{}", variant))
        .with_attr("href", ctx.str_or("href", "#"));

    button = match variant {
        "secondary" => button
            .with_style("background-color", ctx.color("secondary"))
            .with_style("color", ctx.color("background")),
        "outline" => button
            .with_style("border", format!("1px solid {}", ctx.color("accent")))
            .with_style("color", ctx.color("accent")),
        _ => button
            .with_style("background-color", ctx.color("accent"))
            .with_style("color", ctx.color("background")),
    };

    if ctx.bool_or("openInNewTab", false) {
        button = button
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener");
    }

    button.with_child(VNode::text(ctx.str_or("label", "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v1_text_moves_to_label() {
        let v1 = WidgetBase::new("b", TYPE, 1).with_props(json!({ "text": "Buy" }));
        let v2 = migrate(&v1, 2).unwrap();
        assert_eq!(v2.version, 2);
        assert_eq!(v2.props, json!({ "label": "Buy", "href": "#" }));
        assert!(config().unwrap().validate_props(&v2.props).is_ok());
    }

    #[test]
    fn test_unknown_target_fails() {
        let widget = WidgetBase::new("b", TYPE, 2);
        assert!(migrate(&widget, 3).is_err());
    }
}
