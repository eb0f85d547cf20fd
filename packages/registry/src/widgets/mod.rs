//! Built-in widget modules.
//!
//! Each module exposes `config()` returning its registry entry (schema, defaults,
//! view and migration).

use crate::config::WidgetConfig;
use crate::errors::RegistryResult;

pub mod button;
pub mod footer;
pub mod header;
pub mod heading;
pub mod hero;
pub mod image;
pub mod product_grid;
pub mod spacer;
pub mod text;

/// Every built-in widget, in picker order
pub fn builtin_widgets() -> RegistryResult<Vec<WidgetConfig>> {
    Ok(vec![
        hero::config()?,
        heading::config()?,
        text::config()?,
        button::config()?,
        image::config()?,
        product_grid::config()?,
        spacer::config()?,
        header::config()?,
        footer::config()?,
    ])
}

/// `text-align` for an alignment prop
pub(crate) fn text_align(value: &str) -> &'static str {
    match value {
        "center" => "center",
        "right" => "right",
        _ => "left",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_types_are_unique() {
        let widgets = builtin_widgets().unwrap();
        let mut types: Vec<_> = widgets.iter().map(|w| w.widget_type.clone()).collect();
        types.sort();
        types.dedup();
        assert_eq!(types.len(), widgets.len());
    }

    #[test]
    fn test_default_props_validate() {
        for config in builtin_widgets().unwrap() {
            assert!(
                config.validate_props(&config.default_props).is_ok(),
                "defaults for {} do not match schema",
                config.widget_type
            );
        }
    }
}
