//! The module capability contract.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::model::{GenericRequest, GenericResponse, ValidationResult};

/// A pluggable handler for one business-object type.
///
/// Implementations are registered once in the [`crate::ModuleRegistry`],
/// live for the process lifetime and must be safe to invoke concurrently
/// for unrelated requests. Any handler-local mutable store belongs to the
/// implementation and must serialize its own access.
#[async_trait]
pub trait Module: Send + Sync + 'static {
    /// Stable identifier used as the registry key and routing segment
    /// (e.g. `"incident"`).
    fn module_type(&self) -> &str;

    /// Validates a request without side effects.
    ///
    /// Must reject unsupported operation names (one error naming the
    /// operation), empty payloads for operations that require fields, and
    /// missing operation-specific required fields. Operations with no
    /// required fields are accepted as-is.
    fn validate(&self, request: &GenericRequest) -> ValidationResult;

    /// Processes a request, re-validating first.
    ///
    /// Implementations must call [`Module::validate`] and return
    /// [`GatewayError::InvalidRequest`] before performing any external
    /// effect when validation fails; process is never decoupled from
    /// validation. Collaborator failures are converted into `FAILED` or
    /// `ERROR` responses rather than returned as errors.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] when validation fails.
    async fn process(&self, request: &GenericRequest) -> Result<GenericResponse, GatewayError>;

    /// The declarative canonical-to-target field table used by both
    /// translation directions (see [`crate::mapping`]).
    fn field_mappings(&self) -> &'static crate::mapping::FieldTable;
}
