use pagecraft_common::ThemeTokens;
use pagecraft_document::{Breakpoint, PageDocument, StyleSettings, WidgetBase};
use std::borrow::Cow;

/// Built-in tokens, then the store theme, then the page's overrides
pub fn page_theme(store_theme: &ThemeTokens, page: &PageDocument) -> ThemeTokens {
    ThemeTokens::base()
        .merged_with(store_theme)
        .merged_with(&page.theme_overrides)
}

/// Theme seen by one widget: its own text and background colors win over the page's
///
/// For a single viewport the widget's settings at that breakpoint are folded in
/// directly. Responsive output points both tokens at their CSS variables instead, so
/// the per-breakpoint overrides from [`color_variables`] take effect only within
/// their own range.
pub fn widget_theme<'a>(
    theme: &'a ThemeTokens,
    widget: &WidgetBase,
    viewport: Option<Breakpoint>,
) -> Cow<'a, ThemeTokens> {
    let Some(styles) = widget.styles.as_ref() else {
        return Cow::Borrowed(theme);
    };

    match viewport {
        Some(bp) => {
            let Some(settings) = styles.get(bp) else {
                return Cow::Borrowed(theme);
            };
            let (text, background) = own_colors(settings);
            if text.is_none() && background.is_none() {
                return Cow::Borrowed(theme);
            }
            let mut own = theme.clone();
            if let Some(color) = text {
                own.set("text", theme.resolve(color));
            }
            if let Some(color) = background {
                own.set("background", theme.resolve(color));
            }
            Cow::Owned(own)
        }
        None => {
            let (text, background) = styles.iter().fold((false, false), |acc, (_, settings)| {
                let (t, b) = own_colors(settings);
                (acc.0 || t.is_some(), acc.1 || b.is_some())
            });
            if !text && !background {
                return Cow::Borrowed(theme);
            }
            let mut own = theme.clone();
            if text {
                own.set("text", "var(--color-text)");
            }
            if background {
                own.set("background", "var(--color-background)");
            }
            Cow::Owned(own)
        }
    }
}

/// `--color-text` / `--color-background` overrides for one breakpoint's settings
pub fn color_variables(theme: &ThemeTokens, settings: &StyleSettings) -> Vec<(String, String)> {
    let (text, background) = own_colors(settings);
    let mut vars = Vec::new();
    if let Some(color) = text {
        vars.push(("--color-text".to_string(), theme.resolve(color).to_string()));
    }
    if let Some(color) = background {
        vars.push(("--color-background".to_string(), theme.resolve(color).to_string()));
    }
    vars
}

fn own_colors(settings: &StyleSettings) -> (Option<&str>, Option<&str>) {
    (
        settings.typography.as_ref().and_then(|t| t.color.as_deref()),
        settings.background.as_ref().and_then(|b| b.color.as_deref()),
    )
}
