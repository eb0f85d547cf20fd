//! Error types for the widget registry

use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown widget type: {0}")]
    UnknownWidgetType(String),

    #[error("Invalid schema for widget type '{widget_type}': {message}")]
    InvalidSchema { widget_type: String, message: String },

    #[error("Invalid props for widget type '{widget_type}': {}", errors.join("; "))]
    InvalidProps {
        widget_type: String,
        errors: Vec<String>,
    },

    #[error("Migration error: {0}")]
    Migration(#[from] MigrationError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    #[error("Widget {widget_id} failed to migrate from v{from} to v{to}: {message}")]
    Failed {
        widget_id: String,
        from: u32,
        to: u32,
        message: String,
    },

    #[error("Widget {widget_id} migration did not advance past v{version}")]
    Stalled { widget_id: String, version: u32 },

    #[error("Widget {widget_id} migrated to v{version}, past target v{target}")]
    Overshoot {
        widget_id: String,
        version: u32,
        target: u32,
    },
}

impl MigrationError {
    pub fn widget_id(&self) -> &str {
        match self {
            MigrationError::Failed { widget_id, .. }
            | MigrationError::Stalled { widget_id, .. }
            | MigrationError::Overshoot { widget_id, .. } => widget_id,
        }
    }
}
