//! The incident module.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use arbridge_core::mapping::{self, FieldTable};
use arbridge_core::{
    FieldMap, GatewayError, GenericRequest, GenericResponse, Module, ValidationResult,
};
use arbridge_forms::{FormError, FormHandler};

const MODULE_TYPE: &str = "incident";
const REMEDY_FORM: &str = "HPD:Help Desk";
const ID_FIELD: &str = "incidentId";
const TARGET_ID_FIELD: &str = "Incident_Number";

/// Canonical incident fields and their `HPD:Help Desk` identifiers.
/// `Detailed_Decription` is the genuine field spelling on that form.
const FIELD_MAPPINGS: &FieldTable = &[
    ("summary", "Short_Description"),
    ("description", "Detailed_Decription"),
    ("priority", "Priority"),
    ("status", "Status"),
    ("submitter", "Submitter"),
    ("impact", "Impact"),
    ("urgency", "Urgency"),
];

const REQUIRED_CREATE_FIELDS: &[&str] = &["summary", "description", "priority", "submitter"];
const VALID_PRIORITIES: &[&str] = &["Critical", "High", "Medium", "Low"];

/// Handler for the "incident" business-object type.
pub struct IncidentModule {
    form_handler: Arc<dyn FormHandler>,
}

impl IncidentModule {
    #[must_use]
    pub fn new(form_handler: Arc<dyn FormHandler>) -> Self {
        Self { form_handler }
    }

    fn display_name(field: &str) -> &str {
        match field {
            "summary" => "Summary",
            "description" => "Description",
            "priority" => "Priority",
            "submitter" => "Submitter",
            other => other,
        }
    }

    /// Missing means absent, null, or a blank string.
    fn is_blank(value: Option<&Value>) -> bool {
        match value {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    fn value_as_string(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    async fn create(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let mut fields = mapping::to_target_fields(FIELD_MAPPINGS, request.data());

        // Form defaults stamped on every created incident.
        fields.insert("Status".to_owned(), Value::String("New".to_owned()));
        fields.insert("Source".to_owned(), Value::String("Integration".to_owned()));

        let incident_id = self.form_handler.create_entry(REMEDY_FORM, fields).await?;
        tracing::info!(incident_id, "incident created");

        let mut data = FieldMap::new();
        data.insert(ID_FIELD.to_owned(), Value::String(incident_id));
        Ok(GenericResponse::success(
            data,
            "Incident created successfully",
        ))
    }

    async fn get(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        // Presence is guaranteed by validate.
        let incident_id = request
            .data()
            .get(ID_FIELD)
            .map(Self::value_as_string)
            .unwrap_or_default();

        let record = self.form_handler.get_entry(REMEDY_FORM, &incident_id).await?;
        let incident = Self::to_canonical(&record);

        let mut data = FieldMap::new();
        data.insert("incident".to_owned(), Value::Object(incident));
        Ok(GenericResponse::success(
            data,
            "Incident retrieved successfully",
        ))
    }

    async fn update(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let incident_id = request
            .data()
            .get(ID_FIELD)
            .map(Self::value_as_string)
            .unwrap_or_default();

        let mut updates = request.data().clone();
        updates.remove(ID_FIELD);
        let fields = mapping::to_target_fields(FIELD_MAPPINGS, &updates);

        self.form_handler
            .update_entry(REMEDY_FORM, &incident_id, fields)
            .await?;
        tracing::info!(incident_id, "incident updated");

        let mut data = FieldMap::new();
        data.insert(ID_FIELD.to_owned(), Value::String(incident_id));
        Ok(GenericResponse::success(
            data,
            "Incident updated successfully",
        ))
    }

    async fn search(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let criteria = mapping::to_target_fields(FIELD_MAPPINGS, request.data());
        let hits = self
            .form_handler
            .search_entries(REMEDY_FORM, &criteria)
            .await?;

        let incidents: Vec<Value> = hits
            .iter()
            .map(|record| Value::Object(Self::to_canonical(record)))
            .collect();

        let mut data = FieldMap::new();
        data.insert("count".to_owned(), Value::from(incidents.len()));
        data.insert("incidents".to_owned(), Value::Array(incidents));
        Ok(GenericResponse::success(
            data,
            "Incident search completed",
        ))
    }

    /// Reverse-maps a target record and lifts the generated identifier.
    fn to_canonical(record: &FieldMap) -> FieldMap {
        let mut canonical = mapping::from_target_fields(FIELD_MAPPINGS, record);
        if let Some(id) = record.get(TARGET_ID_FIELD) {
            canonical.insert(ID_FIELD.to_owned(), id.clone());
        }
        canonical
    }

    /// Collaborator faults become FAILED/ERROR responses, never raised
    /// faults (one failing operation must not destabilize dispatch).
    fn failure_response(error: FormError) -> GenericResponse {
        match error {
            FormError::Backend(e) => {
                tracing::error!(error = ?e, "incident backend fault");
                GenericResponse::error(format!("Backend error: {e}"))
            }
            domain => GenericResponse::failed(domain.to_string()),
        }
    }
}

#[async_trait]
impl Module for IncidentModule {
    fn module_type(&self) -> &str {
        MODULE_TYPE
    }

    fn validate(&self, request: &GenericRequest) -> ValidationResult {
        let operation = request.operation();
        if !matches!(operation, "create" | "get" | "update" | "search") {
            return ValidationResult::invalid_one(format!("Unsupported operation: {operation}"));
        }

        let data = request.data();
        if data.is_empty() && operation != "search" {
            return ValidationResult::invalid_one("Request data cannot be empty");
        }

        let mut errors = Vec::new();

        if operation == "create" {
            for field in REQUIRED_CREATE_FIELDS {
                if Self::is_blank(data.get(*field)) {
                    errors.push(format!("{} is required", Self::display_name(field)));
                }
            }
        }

        if matches!(operation, "get" | "update") && Self::is_blank(data.get(ID_FIELD)) {
            errors.push(format!("Incident ID is required for {operation} operation"));
        }

        if let Some(priority) = data.get("priority") {
            let valid = priority
                .as_str()
                .is_some_and(|p| VALID_PRIORITIES.contains(&p));
            if !valid && !priority.is_null() {
                errors.push(
                    "Invalid priority value. Must be: Critical, High, Medium, Low".to_owned(),
                );
            }
        }

        if errors.is_empty() {
            ValidationResult::valid()
        } else {
            ValidationResult::invalid(errors)
        }
    }

    async fn process(&self, request: &GenericRequest) -> Result<GenericResponse, GatewayError> {
        let validation = self.validate(request);
        if !validation.is_valid() {
            return Err(GatewayError::invalid(validation.errors().to_vec()));
        }

        let result = match request.operation() {
            "create" => self.create(request).await,
            "get" => self.get(request).await,
            "update" => self.update(request).await,
            "search" => self.search(request).await,
            other => return Err(GatewayError::UnsupportedOperation(other.to_owned())),
        };

        Ok(result.unwrap_or_else(Self::failure_response))
    }

    fn field_mappings(&self) -> &'static FieldTable {
        FIELD_MAPPINGS
    }
}
