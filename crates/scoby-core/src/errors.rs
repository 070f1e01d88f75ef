//! Cross-cutting error types for the notebook.
//!
//! Migration, aggregation and array resizing are total and never produce
//! these. They are raised by editing operations that address something that
//! does not exist or receive input outside their domain. Storage errors live
//! in `scoby-store`; the CLI converges everything on `anyhow`.

use thiserror::Error;

/// Errors raised by editing operations on a canonical experiment.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (blank names, out-of-range sample index, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn batch_not_found(id: &str) -> Self {
        Self::NotFound {
            entity_type: "batch".to_string(),
            id: id.to_string(),
        }
    }
}
