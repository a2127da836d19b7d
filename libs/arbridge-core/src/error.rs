//! Error taxonomy for the dispatch path.

use thiserror::Error;

/// Errors surfaced by the registry and dispatch orchestrator.
///
/// Three families, handled differently by callers:
///
/// - [`GatewayError::DuplicateModule`] is a start-up defect: fatal, never
///   retried; fix the registration order or configuration.
/// - [`GatewayError::ModuleNotFound`], [`GatewayError::InvalidRequest`] and
///   [`GatewayError::UnsupportedOperation`] are caller input errors, reported
///   as structured rejections.
/// - [`GatewayError::Internal`] wraps truly unexpected conditions.
///
/// Collaborator faults (backend unreachable, entry missing) never appear
/// here: modules convert them into `FAILED`/`ERROR` responses so one failing
/// operation cannot destabilize the dispatch path for unrelated requests.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("module with type '{0}' is already registered")]
    DuplicateModule(String),

    #[error("module not found: {0}")]
    ModuleNotFound(String),

    #[error("invalid request: {}", errors.join(", "))]
    InvalidRequest { errors: Vec<String> },

    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl GatewayError {
    /// Builds an [`GatewayError::InvalidRequest`] from itemized errors.
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        Self::InvalidRequest { errors }
    }

    /// The itemized validation errors, when this is a caller input error.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::InvalidRequest { errors } => Some(errors),
            _ => None,
        }
    }
}
