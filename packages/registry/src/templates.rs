//! Built-in page templates.

use crate::errors::RegistryResult;
use crate::registry::WidgetRegistry;
use crate::widgets::{button, heading, hero, image, product_grid, text};
use pagecraft_common::Breakpoint;
use pagecraft_document::{ColSpan, IdGenerator, PageTemplate, Row, Section};
use serde_json::json;

/// Templates offered when creating a page
///
/// Widget ids inside templates are placeholders; `PageTemplate::instantiate`
/// replaces them.
pub fn builtin_templates(registry: &WidgetRegistry) -> RegistryResult<Vec<PageTemplate>> {
    let mut ids = IdGenerator::from_seed("template");

    let blank = PageTemplate::new(
        "blank",
        "Blank",
        vec![Section::new(ids.new_id()).with_row(Row::new(ids.new_id()))],
    )
    .with_description("One empty section");

    let mut half_button = |label: &str, href: &str, variant: &str| -> RegistryResult<_> {
        let mut widget = registry.create_widget(button::TYPE, ids.new_id())?;
        widget.merge_props(&json!({ "label": label, "href": href, "variant": variant }));
        widget.col_span = ColSpan::empty().with(Breakpoint::Sm, 12).with(Breakpoint::Lg, 6);
        Ok(widget)
    };
    let primary = half_button("Shop now", "/products", "primary")?;
    let secondary = half_button("Our story", "/about", "outline")?;

    let landing = PageTemplate::new(
        "landing",
        "Landing page",
        vec![
            Section::new(ids.new_id())
                .with_title("Hero")
                .with_row(Row::new(ids.new_id()).with_widget(registry.create_widget(hero::TYPE, ids.new_id())?))
                .with_row(Row::new(ids.new_id()).with_widget(primary).with_widget(secondary)),
            Section::new(ids.new_id())
                .with_title("Featured")
                .with_row(
                    Row::new(ids.new_id())
                        .with_widget(registry.create_widget(heading::TYPE, ids.new_id())?)
                        .with_widget(registry.create_widget(product_grid::TYPE, ids.new_id())?),
                ),
        ],
    )
    .with_description("Hero banner, two calls to action and a product grid");

    let mut about_image = registry.create_widget(image::TYPE, ids.new_id())?;
    about_image.merge_props(&json!({ "alt": "Our team" }));
    let about = PageTemplate::new(
        "about",
        "About us",
        vec![Section::new(ids.new_id()).with_row(
            Row::new(ids.new_id())
                .with_widget(registry.create_widget(text::TYPE, ids.new_id())?)
                .with_widget(about_image),
        )],
    )
    .with_description("Story text beside an image");

    Ok(vec![blank, landing, about])
}
