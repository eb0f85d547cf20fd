use pagecraft_common::{StoreContext, ThemeTokens};
use pagecraft_document::{Breakpoint, ColSpan, PageDocument, PageStatus, Row, Section, WidgetBase};
use pagecraft_editor::{EditorOptions, EditorSession};
use pagecraft_registry::{initialize, WidgetRegistry};
use pagecraft_renderer::{
    render_page, to_html, HtmlOptions, RenderDiagnostic, RenderOptions, RenderedPage,
};
use pagecraft_repository::{Actor, MemoryPageStore, PageRepository, Role};
use serde_json::json;
use std::sync::Arc;

fn registry() -> Arc<WidgetRegistry> {
    Arc::new(initialize().unwrap())
}

fn storefront(page: &PageDocument, registry: &WidgetRegistry) -> RenderedPage {
    render_page(
        page,
        registry,
        &ThemeTokens::new(),
        &StoreContext::new("Acme Outfitters"),
        &RenderOptions::storefront(),
    )
}

fn text(id: &str, content: &str) -> WidgetBase {
    WidgetBase::new(id, "text", 1).with_props(json!({ "content": content }))
}

fn sample_page() -> PageDocument {
    let mut first = Row::new("r1");
    first.widgets = vec![
        text("a", "First"),
        WidgetBase::new("ghost", "carousel-3d", 1).with_props(json!({ "slides": 3 })),
        text("b", "Second"),
    ];
    let mut second = Row::new("r2");
    second.widgets = vec![WidgetBase::new("hero", "hero", 1).with_props(json!({
        "title": "Welcome to {{store_name}}",
        "subtitle": "Everything at Your Store"
    }))];
    PageDocument::new(
        "p1",
        "Home",
        "/",
        vec![Section::new("s1").with_row(first).with_row(second)],
    )
}

#[test]
fn test_unknown_widget_type_is_omitted() {
    let registry = registry();
    let page = sample_page();
    let out = storefront(&page, &registry);

    let keys: Vec<_> = out.widgets().iter().filter_map(|w| w.key()).collect();
    assert_eq!(keys, vec!["a", "b", "hero"]);
    assert_eq!(
        out.diagnostics,
        vec![RenderDiagnostic::UnknownWidgetType {
            widget_id: "ghost".into(),
            widget_type: "carousel-3d".into(),
        }]
    );
}

#[test]
fn test_col_span_falls_back_to_smaller_breakpoint() {
    let registry = registry();
    let mut page = sample_page();
    page.widget_mut("a").unwrap().col_span = ColSpan::empty().with(Breakpoint::Sm, 6);

    let out = storefront(&page, &registry);
    let node = out.widget("a").unwrap();
    for class in ["pc-col-sm-6", "pc-col-md-6", "pc-col-lg-6"] {
        assert!(node.has_class(class), "missing {}", class);
    }
}

#[test]
fn test_storefront_substitutes_placeholders_without_touching_document() {
    let registry = registry();
    let page = sample_page();
    let out = storefront(&page, &registry);

    let hero = out.widget("hero").unwrap().text_content();
    assert!(hero.contains("Welcome to Acme Outfitters"));
    assert!(hero.contains("Everything at Acme Outfitters"));
    assert_eq!(
        page.widget("hero").unwrap().props["title"],
        "Welcome to {{store_name}}"
    );

    let canvas = render_page(
        &page,
        &registry,
        &ThemeTokens::new(),
        &StoreContext::new("Acme Outfitters"),
        &RenderOptions::editor(),
    );
    assert!(canvas
        .widget("hero")
        .unwrap()
        .text_content()
        .contains("{{store_name}}"));
}

#[test]
fn test_storefront_has_no_editor_affordances() {
    let registry = registry();
    let out = storefront(&sample_page(), &registry);
    let html = to_html(&out, &HtmlOptions::default());

    for marker in ["data-widget-id", "draggable", "data-selectable", "pc-drag-handle"] {
        assert!(!html.contains(marker), "storefront leaked {}", marker);
    }

    let canvas = render_page(
        &sample_page(),
        &registry,
        &ThemeTokens::new(),
        &StoreContext::default(),
        &RenderOptions::editor(),
    );
    assert!(canvas
        .widgets()
        .iter()
        .all(|w| w.attr("data-widget-id").is_some()));
}

#[test]
fn test_theme_tokens_reach_widgets_and_stylesheet() {
    let registry = registry();
    let mut page = sample_page();
    page.theme_overrides = ThemeTokens::new().with("primary", "#101010");
    let store_theme = ThemeTokens::new()
        .with("primary", "#ff0000")
        .with("accent", "#00aa00");

    let out = render_page(
        &page,
        &registry,
        &store_theme,
        &StoreContext::default(),
        &RenderOptions::storefront(),
    );

    let vars = out
        .styles
        .iter()
        .find(|rule| rule.selector == ".pc-page")
        .unwrap();
    assert_eq!(
        vars.properties.get("--color-primary").map(String::as_str),
        Some("#101010")
    );
    assert_eq!(
        vars.properties.get("--color-accent").map(String::as_str),
        Some("#00aa00")
    );

    let hero = out.widget("hero").unwrap();
    let banner = &hero.children()[0];
    assert_eq!(banner.style("background-color"), Some("#101010"));
}

#[test]
fn test_custom_css_is_scoped_to_widget() {
    let registry = registry();
    let mut page = sample_page();
    page.widget_mut("a").unwrap().custom_css = Some("p { letter-spacing: 2px }".into());
    page.widget_mut("b").unwrap().custom_css = Some("this is not css".into());

    let out = storefront(&page, &registry);
    let html = to_html(&out, &HtmlOptions::default());

    assert!(html.contains("#pc-w-a p {"));
    assert!(html.contains("letter-spacing: 2px;"));
    assert!(out.widget("b").is_some());
    assert!(out
        .diagnostics
        .iter()
        .any(|d| matches!(d, RenderDiagnostic::InvalidCustomCss { widget_id, .. } if widget_id == "b")));
}

#[test]
fn test_html_document_shell() {
    let registry = registry();
    let mut page = sample_page();
    page.seo.title = Some("Acme <Home>".into());
    page.seo.description = Some("Outdoor gear".into());
    page.seo.no_index = true;
    page.custom_code.head = Some("<script src=\"/analytics.js\"></script>".into());

    let html = to_html(&storefront(&page, &registry), &HtmlOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
    assert!(html.contains("<title>Acme &lt;Home&gt;</title>"));
    assert!(html.contains("<meta name=\"description\" content=\"Outdoor gear\">"));
    assert!(html.contains("<meta name=\"robots\" content=\"noindex\">"));
    assert!(html.contains("<script src=\"/analytics.js\"></script>"));
    assert!(html.contains("@media (min-width: 640px) {") || html.contains(".pc-col-sm-12 {"));
    assert!(html.contains("id=\"pc-w-hero\""));
    assert!(html.trim_end().ends_with("</html>"));
}

#[tokio::test]
async fn test_create_edit_publish_render() {
    let registry = registry();
    let repo = PageRepository::new(
        Arc::new(MemoryPageStore::new()),
        registry.clone(),
        Actor::new("owner-1", Role::Owner),
    );

    let page = repo.create_page("Summer Sale", None).await.unwrap();
    let section_id = page.sections[0].id.clone();
    let first_row = page.sections[0].rows[0].id.clone();

    let mut session = EditorSession::new(page, registry.clone(), &EditorOptions::default());
    let hero = session.add_widget("hero", &first_row).unwrap();
    session
        .set_col_span(&hero, ColSpan::empty().with(Breakpoint::Lg, 12))
        .unwrap();

    let second_row = session.add_row(&section_id).unwrap();
    let mut buttons = Vec::new();
    for _ in 0..2 {
        let id = session.add_widget("button", &second_row).unwrap();
        session
            .set_col_span(&id, ColSpan::empty().with(Breakpoint::Lg, 6))
            .unwrap();
        buttons.push(id);
    }

    let saved = repo.save_draft(session.document()).await.unwrap();
    assert!(saved.migration.failures.is_empty());

    let published = repo.publish(&saved.page.id).await.unwrap();
    assert_eq!(published.version, 2);
    assert_eq!(published.status, PageStatus::Published);
    assert_eq!(published.history.len(), 1);

    let live = repo.published_page(&published.id).await.unwrap().unwrap();
    let out = storefront(&live.document, &registry);

    assert!(out.diagnostics.is_empty());
    assert_eq!(out.widgets().len(), 3);

    let rows = out.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].key(), Some(first_row.as_str()));
    assert_eq!(rows[0].children().len(), 1);
    assert_eq!(rows[1].key(), Some(second_row.as_str()));
    assert_eq!(rows[1].children().len(), 2);

    assert!(out.widget(&hero).unwrap().has_class("pc-col-lg-12"));
    for id in &buttons {
        let node = out.widget(id).unwrap();
        assert!(node.has_class("pc-col-lg-6"));
        assert!(node.has_class("pc-col-sm-12"));
    }
    assert!(out
        .widget(&hero)
        .unwrap()
        .text_content()
        .contains("Welcome to Acme Outfitters"));
}
