//! # Page Document
//!
//! Whole-document value types. Documents are persisted by whole-document
//! replacement, so every type here is a plain serde value with no hidden state.

use crate::style::ResponsiveSettings;
use chrono::{DateTime, Utc};
use pagecraft_common::{ByBreakpoint, ThemeTokens};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Columns in a row grid
pub const GRID_COLUMNS: u8 = 12;

/// Columns out of 12 at each breakpoint
pub type ColSpan = ByBreakpoint<u8>;

/// Per-breakpoint visibility; a missing slot means visible
pub type Visibility = ByBreakpoint<bool>;

/// Durable page state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Page document (root of the editing tree)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDocument {
    /// Stable across versions
    pub id: String,
    pub name: String,
    /// URL path; `/` is the home page
    pub slug: String,
    /// Incremented on publish, never on draft save
    pub version: u32,
    pub status: PageStatus,
    /// Rendering order
    pub sections: Vec<Arc<Section>>,
    #[serde(default)]
    pub seo: SeoSettings,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    #[serde(default)]
    pub custom_code: CustomCode,
    #[serde(default)]
    pub theme_overrides: ThemeTokens,
    #[serde(default)]
    pub navigation_placement: NavigationPlacement,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_column: Option<String>,
    /// Append-only publish log
    #[serde(default)]
    pub history: Vec<PublishEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PageDocument {
    /// New draft at version 1 with the given sections
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            slug: slug.into(),
            version: 1,
            status: PageStatus::Draft,
            sections: sections.into_iter().map(Arc::new).collect(),
            seo: SeoSettings::default(),
            analytics: AnalyticsSettings::default(),
            custom_code: CustomCode::default(),
            theme_overrides: ThemeTokens::default(),
            navigation_placement: NavigationPlacement::default(),
            footer_column: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// New draft with one empty section holding one empty row
    pub fn empty(
        id: impl Into<String>,
        name: impl Into<String>,
        slug: impl Into<String>,
        section_id: impl Into<String>,
        row_id: impl Into<String>,
    ) -> Self {
        let section = Section::new(section_id).with_row(Row::new(row_id));
        Self::new(id, name, slug, vec![section])
    }

    pub fn is_published(&self) -> bool {
        self.status == PageStatus::Published
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Vertical page section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub background: SectionBackground,
    /// Layout token (`none`, `sm`, `md`, `lg`, ...)
    #[serde(default = "default_padding")]
    pub padding: String,
    #[serde(default)]
    pub rows: Vec<Row>,
}

fn default_padding() -> String {
    "md".to_string()
}

impl Section {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            background: SectionBackground::default(),
            padding: default_padding(),
            rows: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SectionBackground {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

/// Horizontal 12-column grid of widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub id: String,
    /// Left-to-right order
    #[serde(default)]
    pub widgets: Vec<WidgetBase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<RowAlignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            widgets: Vec::new(),
            alignment: None,
            gap: None,
        }
    }

    pub fn with_widget(mut self, widget: WidgetBase) -> Self {
        self.widgets.push(widget);
        self
    }

    pub fn position(&self, widget_id: &str) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == widget_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowAlignment {
    Start,
    Center,
    End,
    Stretch,
}

impl RowAlignment {
    pub fn as_css(self) -> &'static str {
        match self {
            RowAlignment::Start => "flex-start",
            RowAlignment::Center => "center",
            RowAlignment::End => "flex-end",
            RowAlignment::Stretch => "stretch",
        }
    }
}

/// Widget instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBase {
    /// Unique within the whole document
    pub id: String,
    /// Key into the widget registry
    #[serde(rename = "type")]
    pub widget_type: String,
    /// Schema version `props` conforms to
    pub version: u32,
    /// Type-specific properties, validated against the registered schema
    #[serde(default = "empty_props")]
    pub props: Value,
    #[serde(default)]
    pub col_span: ColSpan,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<ResponsiveSettings>,
    #[serde(rename = "customCSS", default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

fn empty_props() -> Value {
    Value::Object(Default::default())
}

impl WidgetBase {
    pub fn new(id: impl Into<String>, widget_type: impl Into<String>, version: u32) -> Self {
        Self {
            id: id.into(),
            widget_type: widget_type.into(),
            version,
            props: empty_props(),
            col_span: ColSpan::default(),
            visibility: Visibility::default(),
            styles: None,
            custom_css: None,
        }
    }

    pub fn with_props(mut self, props: Value) -> Self {
        self.props = props;
        self
    }

    pub fn with_col_span(mut self, col_span: ColSpan) -> Self {
        self.col_span = col_span;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// String prop lookup
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Shallow-merge an object of props over the current props
    pub fn merge_props(&mut self, partial: &Value) {
        let Some(updates) = partial.as_object() else {
            return;
        };
        if !self.props.is_object() {
            self.props = empty_props();
        }
        if let Some(props) = self.props.as_object_mut() {
            for (key, value) in updates {
                props.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Publish log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishEvent {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
    pub version: u32,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SeoSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default)]
    pub no_index: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook_pixel_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomCode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// Where the page link appears in store navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NavigationPlacement {
    #[default]
    None,
    Header,
    Footer,
    Both,
}
