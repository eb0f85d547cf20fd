use serde::Serialize;
use thiserror::Error;

/// Problem found while rendering; the offending piece is skipped, never fatal
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RenderDiagnostic {
    #[error("widget {widget_id} has unknown type '{widget_type}'")]
    UnknownWidgetType {
        widget_id: String,
        widget_type: String,
    },

    #[error("custom CSS of widget {widget_id} ignored: {message}")]
    InvalidCustomCss { widget_id: String, message: String },
}

impl RenderDiagnostic {
    pub fn widget_id(&self) -> &str {
        match self {
            RenderDiagnostic::UnknownWidgetType { widget_id, .. }
            | RenderDiagnostic::InvalidCustomCss { widget_id, .. } => widget_id,
        }
    }
}
