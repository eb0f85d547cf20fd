//! Error types for the editor

use pagecraft_registry::RegistryError;
use pagecraft_repository::RepositoryError;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Widget not found: {0}")]
    WidgetNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Invalid props for {widget_type}: {}", errors.join("; "))]
    InvalidProps {
        widget_type: String,
        errors: Vec<String>,
    },

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Reasons a mutation was rejected. The document is untouched in every case.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Widget not found: {0}")]
    WidgetNotFound(String),

    #[error("Row not found: {0}")]
    RowNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Widgets {0} and {1} are not in the same row")]
    NotSameRow(String, String),

    #[error("Column span {value} at {breakpoint} is outside 1-12")]
    ColSpanOutOfRange { breakpoint: String, value: u8 },

    #[error("Mutation would not change the document")]
    Unchanged,
}
