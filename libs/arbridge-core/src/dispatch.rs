//! Dispatch orchestrator: the entry point the boundary layer consumes.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::GatewayError;
use crate::model::{FieldMap, GenericRequest, GenericResponse};
use crate::registry::ModuleRegistry;

/// Metadata key under which each dispatched request carries its generated
/// request identifier.
pub const REQUEST_ID_KEY: &str = "request_id";

/// The identifier field name a module type expects in its data payload.
///
/// Identifier-bearing operations (get/update) inject the entry id under
/// this name before the request is built. Unrecognized types fall back to a
/// generic `id` field.
#[must_use]
pub fn id_field_name(module_type: &str) -> &'static str {
    match module_type.to_ascii_lowercase().as_str() {
        "incident" => "incidentId",
        "workorder" => "workOrderId",
        "change" => "changeId",
        _ => "id",
    }
}

/// Builds canonical requests, resolves the target module and delegates to
/// its `process`, returning the module's response verbatim.
pub struct ModuleService {
    registry: Arc<ModuleRegistry>,
}

impl ModuleService {
    #[must_use]
    pub fn new(registry: Arc<ModuleRegistry>) -> Self {
        Self { registry }
    }

    /// All registered module types.
    #[must_use]
    pub fn module_types(&self) -> Vec<String> {
        self.registry.module_types()
    }

    #[must_use]
    pub fn module_exists(&self, module_type: &str) -> bool {
        self.registry.contains(module_type)
    }

    /// Dispatches an arbitrary operation to the module registered for
    /// `module_type`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::ModuleNotFound`] when no module is registered
    /// for the type (no module method is invoked), or whatever the module's
    /// `process` reports.
    pub async fn dispatch(
        &self,
        module_type: &str,
        operation: &str,
        data: FieldMap,
    ) -> Result<GenericResponse, GatewayError> {
        let Some(module) = self.registry.get(module_type) else {
            tracing::debug!(module_type, "dispatch to unknown module type");
            return Err(GatewayError::ModuleNotFound(module_type.to_owned()));
        };

        let request_id = Uuid::new_v4();
        let request = GenericRequest::new(module_type, operation, data)
            .with_metadata_entry(REQUEST_ID_KEY, request_id.to_string());

        tracing::info!(
            module_type,
            operation = request.operation(),
            %request_id,
            "dispatching request"
        );

        let response = module.process(&request).await?;
        tracing::debug!(
            module_type,
            %request_id,
            status = %response.status(),
            "module processed request"
        );
        Ok(response)
    }

    /// Creates an entry in the given module.
    ///
    /// # Errors
    ///
    /// See [`ModuleService::dispatch`].
    pub async fn create_entry(
        &self,
        module_type: &str,
        data: FieldMap,
    ) -> Result<GenericResponse, GatewayError> {
        self.dispatch(module_type, "create", data).await
    }

    /// Retrieves an entry by id, injecting it under the module-specific
    /// identifier field name.
    ///
    /// # Errors
    ///
    /// See [`ModuleService::dispatch`].
    pub async fn get_entry(
        &self,
        module_type: &str,
        entry_id: &str,
    ) -> Result<GenericResponse, GatewayError> {
        let mut data = FieldMap::new();
        data.insert(
            id_field_name(module_type).to_owned(),
            serde_json::Value::String(entry_id.to_owned()),
        );
        self.dispatch(module_type, "get", data).await
    }

    /// Updates an entry by id; the id is injected into the payload before
    /// the request is built.
    ///
    /// # Errors
    ///
    /// See [`ModuleService::dispatch`].
    pub async fn update_entry(
        &self,
        module_type: &str,
        entry_id: &str,
        mut data: FieldMap,
    ) -> Result<GenericResponse, GatewayError> {
        data.insert(
            id_field_name(module_type).to_owned(),
            serde_json::Value::String(entry_id.to_owned()),
        );
        self.dispatch(module_type, "update", data).await
    }

    /// Searches entries with free-form criteria.
    ///
    /// # Errors
    ///
    /// See [`ModuleService::dispatch`].
    pub async fn search_entries(
        &self,
        module_type: &str,
        criteria: FieldMap,
    ) -> Result<GenericResponse, GatewayError> {
        self.dispatch(module_type, "search", criteria).await
    }
}
