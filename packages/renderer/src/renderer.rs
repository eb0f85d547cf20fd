use crate::custom_css::scope_custom_css;
use crate::diagnostics::RenderDiagnostic;
use crate::layout::{
    col_class, hidden_class, min_width_query, range_query, resolve_col_span, resolve_visibility,
};
use crate::placeholders::substitute_store_name;
use crate::theme::{color_variables, page_theme, widget_theme};
use pagecraft_common::{CssRule, StoreContext, ThemeTokens, VNode};
use pagecraft_document::{Breakpoint, PageDocument, Row, Section, WidgetBase};
use pagecraft_registry::{ViewContext, WidgetRegistry};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// Who the output is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Canvas: selection and drag affordances on every element
    Editor,
    /// Public site: plain markup, placeholders filled in
    #[default]
    Storefront,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Render for one viewport only (editor preview); `None` emits responsive CSS
    pub viewport: Option<Breakpoint>,
    /// System pages may rearrange header and footer widgets
    pub is_system_page: bool,
    /// Widget, row or section id highlighted as selected (editor mode)
    pub selected: Option<String>,
}

impl RenderOptions {
    pub fn editor() -> Self {
        Self {
            mode: RenderMode::Editor,
            ..Default::default()
        }
    }

    pub fn storefront() -> Self {
        Self::default()
    }

    pub fn with_viewport(mut self, viewport: Breakpoint) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected = Some(id.into());
        self
    }

    pub fn system_page(mut self) -> Self {
        self.is_system_page = true;
        self
    }

    fn is_editor(&self) -> bool {
        self.mode == RenderMode::Editor
    }
}

/// Output of [`render_page`]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedPage {
    pub title: String,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub og_image: Option<String>,
    pub no_index: bool,
    pub root: VNode,
    /// Theme variables, grid classes, widget styles and scoped custom CSS, in that order
    pub styles: Vec<CssRule>,
    pub diagnostics: Vec<RenderDiagnostic>,
    pub head_code: Option<String>,
    pub body_code: Option<String>,
}

impl RenderedPage {
    pub fn sections(&self) -> Vec<&VNode> {
        self.root.find_all(&|node| node.has_class("pc-section"))
    }

    pub fn rows(&self) -> Vec<&VNode> {
        self.root.find_all(&|node| node.has_class("pc-row"))
    }

    pub fn widgets(&self) -> Vec<&VNode> {
        self.root.find_all(&|node| node.has_class("pc-widget"))
    }

    /// Wrapper element of a rendered widget
    pub fn widget(&self, widget_id: &str) -> Option<&VNode> {
        self.widgets()
            .into_iter()
            .find(|node| node.key() == Some(widget_id))
    }
}

pub fn section_element_id(section_id: &str) -> String {
    format!("pc-s-{}", section_id)
}

pub fn row_element_id(row_id: &str) -> String {
    format!("pc-r-{}", row_id)
}

pub fn widget_element_id(widget_id: &str) -> String {
    format!("pc-w-{}", widget_id)
}

struct RenderContext<'a> {
    registry: &'a WidgetRegistry,
    theme: ThemeTokens,
    store: &'a StoreContext,
    options: &'a RenderOptions,
    spans: BTreeSet<(Breakpoint, u8)>,
    hidden: BTreeSet<Breakpoint>,
    widget_rules: Vec<CssRule>,
    custom_rules: Vec<CssRule>,
    diagnostics: Vec<RenderDiagnostic>,
}

/// Render a page into a node tree plus its stylesheet.
///
/// Never fails: widgets of unregistered types and unparseable custom CSS are
/// left out and reported in [`RenderedPage::diagnostics`].
#[instrument(skip_all, fields(page = %page.id, mode = ?options.mode))]
pub fn render_page(
    page: &PageDocument,
    registry: &WidgetRegistry,
    store_theme: &ThemeTokens,
    store: &StoreContext,
    options: &RenderOptions,
) -> RenderedPage {
    let mut ctx = RenderContext {
        registry,
        theme: page_theme(store_theme, page),
        store,
        options,
        spans: BTreeSet::new(),
        hidden: BTreeSet::new(),
        widget_rules: Vec::new(),
        custom_rules: Vec::new(),
        diagnostics: Vec::new(),
    };

    let mut root = VNode::element("main")
        .with_class("pc-page")
        .with_key(page.id.as_str());
    if options.is_system_page {
        root = root.with_class("pc-system-page");
    }
    if options.is_editor() {
        root = root.with_attr("data-page-id", page.id.as_str());
    }
    let sections = page
        .sections
        .iter()
        .map(|section| render_section(&mut ctx, section))
        .collect();
    root = root.with_children(sections);

    let styles = ctx.stylesheet();
    debug!(
        rules = styles.len(),
        diagnostics = ctx.diagnostics.len(),
        "Rendered page"
    );

    let title = page
        .seo
        .title
        .clone()
        .filter(|title| !title.trim().is_empty())
        .unwrap_or_else(|| page.name.clone());

    RenderedPage {
        title,
        description: page.seo.description.clone(),
        keywords: page.seo.keywords.clone(),
        og_image: page.seo.og_image.clone(),
        no_index: page.seo.no_index,
        root,
        styles,
        diagnostics: ctx.diagnostics,
        head_code: page.custom_code.head.clone(),
        body_code: page.custom_code.body.clone(),
    }
}

fn render_section(ctx: &mut RenderContext<'_>, section: &Section) -> VNode {
    let mut node = VNode::element("section")
        .with_attr("id", section_element_id(&section.id))
        .with_class("pc-section")
        .with_class(format!("pc-pad-{}", section.padding))
        .with_key(section.id.as_str());

    if let Some(padding) = section_padding(&section.padding) {
        node = node
            .with_style("padding-top", padding)
            .with_style("padding-bottom", padding);
    }
    if let Some(token) = &section.background.color_token {
        node = node.with_style("background-color", ctx.theme.resolve(token));
    }
    if let Some(url) = &section.background.image_url {
        node = node
            .with_style("background-image", format!("url('{}')", url))
            .with_style("background-size", "cover")
            .with_style("background-position", "center");
    }
    if let Some(url) = &section.background.video_url {
        node = node.with_style("position", "relative").with_child(
            VNode::element("video")
                .with_class("pc-section-video")
                .with_attr("src", url.as_str())
                .with_attr("autoplay", "")
                .with_attr("muted", "")
                .with_attr("loop", "")
                .with_attr("playsinline", ""),
        );
    }

    if ctx.options.is_editor() {
        node = node
            .with_attr("data-section-id", section.id.as_str())
            .with_attr("data-selectable", "true");
        if let Some(title) = &section.title {
            node = node.with_attr("data-section-title", title.as_str());
        }
        if ctx.is_selected(&section.id) {
            node = node.with_attr("data-selected", "true");
        }
    }

    for row in &section.rows {
        if let Some(row) = render_row(ctx, row) {
            node = node.with_child(row);
        }
    }
    node
}

fn section_padding(token: &str) -> Option<&'static str> {
    match token {
        "none" => Some("0"),
        "sm" => Some("1rem"),
        "md" => Some("2rem"),
        "lg" => Some("4rem"),
        "xl" => Some("6rem"),
        _ => None,
    }
}

fn render_row(ctx: &mut RenderContext<'_>, row: &Row) -> Option<VNode> {
    let editor = ctx.options.is_editor();
    let widgets: Vec<VNode> = row
        .widgets
        .iter()
        .filter_map(|widget| render_widget(ctx, widget))
        .collect();

    if widgets.is_empty() && !editor {
        return None;
    }

    let mut node = VNode::element("div")
        .with_attr("id", row_element_id(&row.id))
        .with_class("pc-row")
        .with_key(row.id.as_str());
    if let Some(alignment) = row.alignment {
        node = node.with_style("align-items", alignment.as_css());
    }
    if let Some(gap) = &row.gap {
        node = node.with_style("gap", gap.as_str());
    }

    if editor {
        node = node
            .with_attr("data-row-id", row.id.as_str())
            .with_attr("data-selectable", "true");
        if ctx.is_selected(&row.id) {
            node = node.with_attr("data-selected", "true");
        }
        if widgets.is_empty() {
            node = node.with_child(
                VNode::element("div")
                    .with_class("pc-row-placeholder")
                    .with_child(VNode::text("Drop widgets here")),
            );
        }
    }
    Some(node.with_children(widgets))
}

fn render_widget(ctx: &mut RenderContext<'_>, widget: &WidgetBase) -> Option<VNode> {
    let registry = ctx.registry;
    let Some(config) = registry.get(&widget.widget_type) else {
        warn!(
            widget_id = %widget.id,
            widget_type = %widget.widget_type,
            "Skipping widget of unknown type"
        );
        ctx.diagnostics.push(RenderDiagnostic::UnknownWidgetType {
            widget_id: widget.id.clone(),
            widget_type: widget.widget_type.clone(),
        });
        return None;
    };

    let editor = ctx.options.is_editor();
    let viewport = ctx.options.viewport;
    let spans = resolve_col_span(&widget.col_span);
    let visible = resolve_visibility(&widget.visibility);

    let hidden_at_viewport = viewport.is_some_and(|bp| !visible.get(bp));
    if hidden_at_viewport && !editor {
        return None;
    }

    let element_id = widget_element_id(&widget.id);
    let mut node = VNode::element("div")
        .with_attr("id", element_id.as_str())
        .with_class("pc-widget")
        .with_class(format!("pc-widget-{}", widget.widget_type))
        .with_key(widget.id.as_str());

    for bp in Breakpoint::ALL {
        let span = spans.get(bp);
        ctx.spans.insert((bp, span));
        node = node.with_class(col_class(bp, span));
        if !visible.get(bp) {
            ctx.hidden.insert(bp);
            node = node.with_class(hidden_class(bp));
        }
    }

    match viewport {
        Some(bp) => {
            let span = spans.get(bp);
            node = node.with_style("grid-column", format!("span {} / span {}", span, span));
            if let Some(settings) = widget.styles.as_ref().and_then(|styles| styles.get(bp)) {
                for (name, value) in settings.css_declarations(&|c| ctx.theme.resolve(c).to_string()) {
                    node = node.with_style(name, value);
                }
            }
        }
        None => ctx.push_style_rules(widget, &element_id),
    }

    if let Some(css) = widget.custom_css.as_deref().filter(|css| !css.trim().is_empty()) {
        match scope_custom_css(&format!("#{}", element_id), css) {
            Ok(rules) => ctx.custom_rules.extend(rules),
            Err(message) => {
                warn!(widget_id = %widget.id, %message, "Ignoring custom CSS");
                ctx.diagnostics.push(RenderDiagnostic::InvalidCustomCss {
                    widget_id: widget.id.clone(),
                    message,
                });
            }
        }
    }

    let props = if editor {
        Cow::Borrowed(&widget.props)
    } else {
        Cow::Owned(substitute_store_name(&widget.props, &ctx.store.name))
    };
    let theme = widget_theme(&ctx.theme, widget, viewport);
    let content = config.render(&ViewContext {
        widget,
        props: &props,
        theme: &theme,
        store: ctx.store,
    });

    if editor {
        let locked = config.system_widget && !ctx.options.is_system_page;
        node = node
            .with_attr("data-widget-id", widget.id.as_str())
            .with_attr("data-widget-type", widget.widget_type.as_str())
            .with_attr("data-selectable", "true");
        if ctx.is_selected(&widget.id) {
            node = node.with_attr("data-selected", "true");
        }
        if hidden_at_viewport {
            node = node.with_attr("data-hidden", "true");
        }
        if locked {
            node = node.with_attr("data-locked", "true");
        } else {
            node = node.with_attr("draggable", "true").with_child(
                VNode::element("div")
                    .with_class("pc-drag-handle")
                    .with_attr("data-drag-handle", widget.id.as_str()),
            );
        }
    }

    Some(node.with_child(content))
}

impl RenderContext<'_> {
    fn is_selected(&self, id: &str) -> bool {
        self.options.selected.as_deref() == Some(id)
    }

    /// Widget styles per breakpoint; each breakpoint only applies within its own range
    fn push_style_rules(&mut self, widget: &WidgetBase, element_id: &str) {
        let Some(styles) = &widget.styles else {
            return;
        };
        for (bp, settings) in styles.iter() {
            let mut declarations = color_variables(&self.theme, settings);
            declarations.extend(settings.css_declarations(&|c| self.theme.resolve(c).to_string()));
            if declarations.is_empty() {
                continue;
            }
            let mut rule = CssRule::new(format!("#{}", element_id)).with_media_query(range_query(bp));
            for (name, value) in declarations {
                rule = rule.with_property(name, value);
            }
            self.widget_rules.push(rule);
        }
    }

    fn stylesheet(&mut self) -> Vec<CssRule> {
        let mut rules = Vec::new();

        let mut page = CssRule::new(".pc-page");
        for (name, value) in self.theme.css_variables() {
            page = page.with_property(name, value);
        }
        rules.push(
            page.with_property("color", "var(--color-text)")
                .with_property("background-color", "var(--color-background)"),
        );
        rules.push(
            CssRule::new(".pc-row")
                .with_property("display", "grid")
                .with_property("grid-template-columns", "repeat(12, minmax(0, 1fr))")
                .with_property("gap", "1rem"),
        );
        rules.push(CssRule::new(".pc-section").with_property("position", "relative"));

        for &(bp, span) in &self.spans {
            let mut rule = CssRule::new(format!(".{}", col_class(bp, span)))
                .with_property("grid-column", format!("span {} / span {}", span, span));
            if let Some(query) = min_width_query(bp) {
                rule = rule.with_media_query(query);
            }
            rules.push(rule);
        }
        for &bp in &self.hidden {
            rules.push(
                CssRule::new(format!(".{}", hidden_class(bp)))
                    .with_property("display", "none")
                    .with_media_query(range_query(bp)),
            );
        }

        rules.append(&mut self.widget_rules);
        rules.append(&mut self.custom_rules);
        rules
    }
}
