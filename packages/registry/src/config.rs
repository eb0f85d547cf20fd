use crate::errors::{RegistryError, RegistryResult};
use crate::schema::{PropField, PropSchema};
use pagecraft_common::{StoreContext, ThemeTokens, VNode};
use pagecraft_document::{ColSpan, WidgetBase};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Migration step: receives the widget and the version to produce (current + 1)
pub type MigrateFn = Arc<dyn Fn(&WidgetBase, u32) -> Result<WidgetBase, String> + Send + Sync>;

/// View function: renders one widget instance
pub type ViewFn = Arc<dyn Fn(&ViewContext<'_>) -> VNode + Send + Sync>;

/// Grouping used by the widget picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetCategory {
    Basic,
    Layout,
    Media,
    Commerce,
    Marketing,
    Navigation,
}

impl WidgetCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetCategory::Basic => "basic",
            WidgetCategory::Layout => "layout",
            WidgetCategory::Media => "media",
            WidgetCategory::Commerce => "commerce",
            WidgetCategory::Marketing => "marketing",
            WidgetCategory::Navigation => "navigation",
        }
    }
}

impl fmt::Display for WidgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(WidgetCategory::Basic),
            "layout" => Ok(WidgetCategory::Layout),
            "media" => Ok(WidgetCategory::Media),
            "commerce" => Ok(WidgetCategory::Commerce),
            "marketing" => Ok(WidgetCategory::Marketing),
            "navigation" => Ok(WidgetCategory::Navigation),
            other => Err(format!("Unknown widget category: {}", other)),
        }
    }
}

/// Inputs to a widget view
pub struct ViewContext<'a> {
    pub widget: &'a WidgetBase,
    /// Props to render (may be a substituted copy of `widget.props`)
    pub props: &'a Value,
    pub theme: &'a ThemeTokens,
    pub store: &'a StoreContext,
}

impl<'a> ViewContext<'a> {
    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.props.get(key).and_then(Value::as_str)
    }

    pub fn str_or(&self, key: &str, fallback: &'a str) -> &'a str {
        self.str(key).unwrap_or(fallback)
    }

    pub fn bool_or(&self, key: &str, fallback: bool) -> bool {
        self.props
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(fallback)
    }

    pub fn u64_or(&self, key: &str, fallback: u64) -> u64 {
        self.props
            .get(key)
            .and_then(Value::as_u64)
            .unwrap_or(fallback)
    }

    pub fn array(&self, key: &str) -> &'a [Value] {
        self.props
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Theme color for a token name or literal
    pub fn color(&self, value: &str) -> String {
        self.theme.resolve(value).to_string()
    }
}

/// Registry entry for one widget type
#[derive(Clone)]
pub struct WidgetConfig {
    pub widget_type: String,
    pub name: String,
    pub category: WidgetCategory,
    pub description: String,
    pub icon: String,
    pub default_props: Value,
    pub default_col_span: ColSpan,
    pub schema: PropSchema,
    /// Current schema version for this type
    pub version: u32,
    /// Excluded from the user-facing library
    pub system_widget: bool,
    migrate: Option<MigrateFn>,
    view: Option<ViewFn>,
}

impl fmt::Debug for WidgetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetConfig")
            .field("widget_type", &self.widget_type)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("version", &self.version)
            .field("system_widget", &self.system_widget)
            .field("has_migrate", &self.migrate.is_some())
            .field("has_view", &self.view.is_some())
            .finish()
    }
}

impl WidgetConfig {
    /// Create a config; fails if `schema` does not compile
    pub fn new(
        widget_type: impl Into<String>,
        name: impl Into<String>,
        category: WidgetCategory,
        schema: Value,
    ) -> RegistryResult<Self> {
        let widget_type = widget_type.into();
        let schema = PropSchema::compile(schema).map_err(|message| RegistryError::InvalidSchema {
            widget_type: widget_type.clone(),
            message,
        })?;

        Ok(Self {
            widget_type,
            name: name.into(),
            category,
            description: String::new(),
            icon: String::new(),
            default_props: Value::Object(Default::default()),
            default_col_span: ColSpan::default(),
            schema,
            version: 1,
            system_widget: false,
            migrate: None,
            view: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_default_props(mut self, props: Value) -> Self {
        self.default_props = props;
        self
    }

    pub fn with_default_col_span(mut self, col_span: ColSpan) -> Self {
        self.default_col_span = col_span;
        self
    }

    /// Set the current schema version and the step function that reaches it
    pub fn with_migration(
        mut self,
        version: u32,
        migrate: impl Fn(&WidgetBase, u32) -> Result<WidgetBase, String> + Send + Sync + 'static,
    ) -> Self {
        self.version = version;
        self.migrate = Some(Arc::new(migrate));
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_view(
        mut self,
        view: impl Fn(&ViewContext<'_>) -> VNode + Send + Sync + 'static,
    ) -> Self {
        self.view = Some(Arc::new(view));
        self
    }

    /// Mark as internal scaffolding (header/footer); hidden from the picker
    pub fn system(mut self) -> Self {
        self.system_widget = true;
        self
    }

    pub fn migrate_fn(&self) -> Option<&MigrateFn> {
        self.migrate.as_ref()
    }

    /// Render through the registered view; widgets without a view render as an empty div
    pub fn render(&self, ctx: &ViewContext<'_>) -> VNode {
        match &self.view {
            Some(view) => view(ctx),
            None => VNode::element("div"),
        }
    }

    pub fn validate_props(&self, props: &Value) -> RegistryResult<()> {
        self.schema
            .validate(props)
            .map_err(|errors| RegistryError::InvalidProps {
                widget_type: self.widget_type.clone(),
                errors,
            })
    }

    /// Properties panel fields
    pub fn editable_fields(&self) -> Vec<PropField> {
        self.schema.fields()
    }
}
