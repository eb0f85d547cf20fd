//! # Pagecraft Widget Registry
//!
//! Catalog mapping a widget `type` string to everything the rest of the system
//! needs to know about it:
//!
//! ```text
//! type ─→ WidgetConfig
//!          ├─ schema          (JSON Schema for props)
//!          ├─ default props / default colSpan
//!          ├─ view            (props → VNode)
//!          └─ migrate         (version n → n+1)
//! ```
//!
//! The canvas engine and the repository only ever hold `type` strings; the
//! renderer looks views up here. Build one registry at startup with
//! [`initialize`] and share it behind an `Arc`; tests construct their own with
//! [`WidgetRegistry::new`].

mod config;
mod errors;
mod migration;
mod registry;
mod schema;
pub mod templates;
pub mod widgets;

pub use config::{MigrateFn, ViewContext, ViewFn, WidgetCategory, WidgetConfig};
pub use errors::{MigrationError, RegistryError, RegistryResult};
pub use migration::MigrationReport;
pub use registry::WidgetRegistry;
pub use schema::{FieldKind, PropField, PropSchema};

/// Registry holding every built-in widget module
pub fn initialize() -> RegistryResult<WidgetRegistry> {
    let mut registry = WidgetRegistry::new();
    for config in widgets::builtin_widgets()? {
        registry.register(config);
    }
    tracing::info!(widgets = registry.len(), "Widget registry initialized");
    Ok(registry)
}
