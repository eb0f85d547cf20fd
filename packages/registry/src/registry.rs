use crate::config::{WidgetCategory, WidgetConfig};
use crate::errors::{MigrationError, RegistryError, RegistryResult};
use crate::migration::{self, MigrationReport};
use pagecraft_document::{PageDocument, Visibility, WidgetBase};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Catalog of widget types
///
/// Registration order is preserved; it is the order the picker lists widgets in.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    entries: Vec<WidgetConfig>,
    index: HashMap<String, usize>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a widget type
    ///
    /// Registering a type that is already present keeps the first registration and
    /// returns `false`.
    pub fn register(&mut self, config: WidgetConfig) -> bool {
        if self.index.contains_key(&config.widget_type) {
            warn!(
                widget_type = %config.widget_type,
                "Widget type already registered - ignoring duplicate registration"
            );
            return false;
        }

        debug!(widget_type = %config.widget_type, version = config.version, "Registering widget");
        self.index
            .insert(config.widget_type.clone(), self.entries.len());
        self.entries.push(config);
        true
    }

    pub fn get(&self, widget_type: &str) -> Option<&WidgetConfig> {
        self.index.get(widget_type).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, widget_type: &str) -> bool {
        self.index.contains_key(widget_type)
    }

    pub fn get_all(&self) -> &[WidgetConfig] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Widgets offered in the picker (no system widgets)
    pub fn get_user_widgets(&self) -> Vec<&WidgetConfig> {
        self.entries.iter().filter(|c| !c.system_widget).collect()
    }

    pub fn get_user_widgets_by_category(&self, category: WidgetCategory) -> Vec<&WidgetConfig> {
        self.entries
            .iter()
            .filter(|c| !c.system_widget && c.category == category)
            .collect()
    }

    /// Categories that contain at least one user widget, in first-seen order
    pub fn user_categories(&self) -> Vec<WidgetCategory> {
        let mut categories = Vec::new();
        for config in self.get_user_widgets() {
            if !categories.contains(&config.category) {
                categories.push(config.category);
            }
        }
        categories
    }

    /// Default instance of `widget_type` with the given id
    pub fn create_widget(&self, widget_type: &str, id: impl Into<String>) -> RegistryResult<WidgetBase> {
        let config = self
            .get(widget_type)
            .ok_or_else(|| RegistryError::UnknownWidgetType(widget_type.to_string()))?;

        Ok(WidgetBase {
            id: id.into(),
            widget_type: config.widget_type.clone(),
            version: config.version,
            props: config.default_props.clone(),
            col_span: config.default_col_span.clone(),
            visibility: Visibility::uniform(true),
            styles: None,
            custom_css: None,
        })
    }

    /// Validate props against the schema registered for `widget_type`
    pub fn validate_props(&self, widget_type: &str, props: &Value) -> RegistryResult<()> {
        self.get(widget_type)
            .ok_or_else(|| RegistryError::UnknownWidgetType(widget_type.to_string()))?
            .validate_props(props)
    }

    /// Step `widget` up to `target_version`
    ///
    /// Returns the widget unchanged when it is already at (or past) the target, when
    /// its type is not registered, or when the type has no migrate function.
    pub fn migrate_widget(
        &self,
        widget: &WidgetBase,
        target_version: u32,
    ) -> Result<WidgetBase, MigrationError> {
        migration::migrate_to(self.get(&widget.widget_type), widget, target_version)
    }

    /// Current schema version for a type, if registered
    pub fn current_version(&self, widget_type: &str) -> Option<u32> {
        self.get(widget_type).map(|c| c.version)
    }

    pub fn needs_migration(&self, widget: &WidgetBase) -> bool {
        self.current_version(&widget.widget_type)
            .is_some_and(|current| widget.version < current)
    }

    /// Bring every widget in `page` to its type's current version
    ///
    /// A widget whose migration fails is left at its last good version and reported;
    /// the rest of the document is still migrated.
    pub fn migrate_document(&self, page: &mut PageDocument) -> MigrationReport {
        migration::migrate_document(self, page)
    }
}
