//! Storage and export error types for scoby-store.

use scoby_core::errors::CoreError;
use thiserror::Error;

/// Errors from reading, writing or editing the settings document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The settings file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON, or a user entry has the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lookup of a tea or experiment returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// An edit was rejected by the domain model.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub(crate) fn experiment_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "experiment".to_string(),
            id: id.to_string(),
        }
    }

    pub(crate) fn tea_not_found(id: u32) -> Self {
        Self::NotFound {
            entity_type: "tea".to_string(),
            id: id.to_string(),
        }
    }
}

/// A failed export. Carries a message for the user; nothing is retried.
#[derive(Debug, Error)]
#[error("Export failed: {message}")]
pub struct ExportError {
    pub message: String,
}

impl ExportError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
