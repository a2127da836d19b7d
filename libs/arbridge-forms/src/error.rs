//! Backend error types.

use thiserror::Error;

/// Errors reported by a form backend.
///
/// These never cross the module boundary as faults: modules convert them
/// into `FAILED`/`ERROR` responses for the caller.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form not found: {0}")]
    FormNotFound(String),

    #[error("entry not found: {0}")]
    EntryNotFound(String),

    #[error("required field missing: {0}")]
    MissingField(String),

    /// Transport or backend fault outside the domain taxonomy.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}
