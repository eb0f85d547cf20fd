//! Error types for the page repository

use crate::access::Role;
use pagecraft_document::DocumentError;
use pagecraft_registry::RegistryError;
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Permission denied: role '{role}' cannot {action}")]
    PermissionDenied { action: &'static str, role: Role },

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Version {version_id} not found for page {page_id}")]
    VersionNotFound { page_id: String, version_id: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl RepositoryError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, RepositoryError::PermissionDenied { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RepositoryError::PageNotFound(_) | RepositoryError::VersionNotFound { .. }
        )
    }
}
