//! Per-breakpoint style overrides.
//!
//! Every breakpoint's [`StyleSettings`] is independent. Nothing here inherits from
//! a smaller breakpoint; switching breakpoints in the editor never copies values.

use pagecraft_common::ByBreakpoint;
use serde::{Deserialize, Serialize};

/// Style settings keyed by breakpoint
pub type ResponsiveSettings = ByBreakpoint<StyleSettings>;

/// Style bag for one breakpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StyleSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<BorderSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographySettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<ShadowSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpacingSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BorderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypographySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSettings {
    /// Shadow preset (`none`, `sm`, `md`, `lg`) or a raw `box-shadow` value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
}

impl ShadowSettings {
    pub fn box_shadow(&self) -> Option<String> {
        let preset = self.preset.as_deref()?;
        let value = match preset {
            "none" => "none",
            "sm" => "0 1px 2px rgba(0,0,0,0.05)",
            "md" => "0 4px 6px rgba(0,0,0,0.1)",
            "lg" => "0 10px 15px rgba(0,0,0,0.1)",
            raw => raw,
        };
        Some(value.to_string())
    }
}

impl StyleSettings {
    pub fn is_empty(&self) -> bool {
        self == &StyleSettings::default()
    }

    /// CSS declarations for this bag; color values pass through `resolve_color`
    pub fn css_declarations(&self, resolve_color: &dyn Fn(&str) -> String) -> Vec<(String, String)> {
        let mut declarations = Vec::new();
        let mut push = |name: &str, value: &Option<String>| {
            if let Some(value) = value {
                declarations.push((name.to_string(), value.clone()));
            }
        };

        if let Some(spacing) = &self.spacing {
            push("margin-top", &spacing.margin_top);
            push("margin-bottom", &spacing.margin_bottom);
            push("padding-top", &spacing.padding_top);
            push("padding-bottom", &spacing.padding_bottom);
            push("padding-left", &spacing.padding_left);
            push("padding-right", &spacing.padding_right);
        }
        if let Some(border) = &self.border {
            push("border-width", &border.width);
            push("border-style", &border.style);
            push("border-radius", &border.radius);
            push("border-color", &border.color.as_deref().map(resolve_color));
        }
        if let Some(typography) = &self.typography {
            push("font-family", &typography.font_family);
            push("font-size", &typography.font_size);
            push("font-weight", &typography.font_weight);
            push("line-height", &typography.line_height);
            push("text-align", &typography.text_align);
            push("color", &typography.color.as_deref().map(resolve_color));
        }
        if let Some(background) = &self.background {
            push(
                "background-color",
                &background.color.as_deref().map(resolve_color),
            );
            push(
                "background-image",
                &background.image_url.as_ref().map(|url| format!("url({})", url)),
            );
        }
        if let Some(shadow) = &self.shadow {
            push("box-shadow", &shadow.box_shadow());
        }

        declarations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_declarations_resolve_colors() {
        let settings = StyleSettings {
            typography: Some(TypographySettings {
                font_size: Some("18px".to_string()),
                color: Some("accent".to_string()),
                ..Default::default()
            }),
            shadow: Some(ShadowSettings {
                preset: Some("sm".to_string()),
            }),
            ..Default::default()
        };

        let css = settings.css_declarations(&|token| {
            if token == "accent" {
                "#2563eb".to_string()
            } else {
                token.to_string()
            }
        });

        assert!(css.contains(&("font-size".to_string(), "18px".to_string())));
        assert!(css.contains(&("color".to_string(), "#2563eb".to_string())));
        assert!(css.contains(&("box-shadow".to_string(), "0 1px 2px rgba(0,0,0,0.05)".to_string())));
    }

    #[test]
    fn test_default_is_empty() {
        assert!(StyleSettings::default().is_empty());
    }
}
