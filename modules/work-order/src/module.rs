//! The work-order module.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use arbridge_core::mapping::{self, FieldTable};
use arbridge_core::{
    FieldMap, GatewayError, GenericRequest, GenericResponse, Module, ValidationResult,
};
use arbridge_forms::{FormError, FormHandler};

const MODULE_TYPE: &str = "workorder";
const REMEDY_FORM: &str = "WOI:WorkOrder";
const ID_FIELD: &str = "workOrderId";
const TARGET_ID_FIELD: &str = "WorkOrder_ID";

const FIELD_MAPPINGS: &FieldTable = &[
    ("summary", "Summary"),
    ("description", "Detailed_Description"),
    ("priority", "Priority"),
    ("status", "Status"),
    ("requester", "Requester"),
    ("location", "Location"),
];

const REQUIRED_CREATE_FIELDS: &[&str] = &["summary", "description", "requester"];

/// Handler for the "workorder" business-object type.
pub struct WorkOrderModule {
    form_handler: Arc<dyn FormHandler>,
}

impl WorkOrderModule {
    #[must_use]
    pub fn new(form_handler: Arc<dyn FormHandler>) -> Self {
        Self { form_handler }
    }

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

    fn display_name(field: &str) -> &str {
        match field {
            "summary" => "Summary",
            "description" => "Description",
            "requester" => "Requester",
            other => other,
        }
    }

    async fn create(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let mut fields = mapping::to_target_fields(FIELD_MAPPINGS, request.data());
        fields.insert("Status".to_owned(), Value::String("Assigned".to_owned()));

        let work_order_id = self.form_handler.create_entry(REMEDY_FORM, fields).await?;
        tracing::info!(work_order_id, "work order created");

        let mut data = FieldMap::new();
        data.insert(ID_FIELD.to_owned(), Value::String(work_order_id));
        Ok(GenericResponse::success(
            data,
            "Work order created successfully",
        ))
    }

    async fn get(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let work_order_id = request
            .data()
            .get(ID_FIELD)
            .map(Self::value_as_string)
            .unwrap_or_default();

        let record = self
            .form_handler
            .get_entry(REMEDY_FORM, &work_order_id)
            .await?;

        let mut data = FieldMap::new();
        data.insert(
            "workOrder".to_owned(),
            Value::Object(Self::to_canonical(&record)),
        );
        Ok(GenericResponse::success(
            data,
            "Work order retrieved successfully",
        ))
    }

    async fn update(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let work_order_id = request
            .data()
            .get(ID_FIELD)
            .map(Self::value_as_string)
            .unwrap_or_default();

        let mut updates = request.data().clone();
        updates.remove(ID_FIELD);
        let fields = mapping::to_target_fields(FIELD_MAPPINGS, &updates);

        self.form_handler
            .update_entry(REMEDY_FORM, &work_order_id, fields)
            .await?;

        let mut data = FieldMap::new();
        data.insert(ID_FIELD.to_owned(), Value::String(work_order_id));
        Ok(GenericResponse::success(
            data,
            "Work order updated successfully",
        ))
    }

    async fn search(&self, request: &GenericRequest) -> Result<GenericResponse, FormError> {
        let criteria = mapping::to_target_fields(FIELD_MAPPINGS, request.data());
        let hits = self
            .form_handler
            .search_entries(REMEDY_FORM, &criteria)
            .await?;

        let work_orders: Vec<Value> = hits
            .iter()
            .map(|record| Value::Object(Self::to_canonical(record)))
            .collect();

        let mut data = FieldMap::new();
        data.insert("count".to_owned(), Value::from(work_orders.len()));
        data.insert("workOrders".to_owned(), Value::Array(work_orders));
        Ok(GenericResponse::success(data, "Work order search completed"))
    }

    fn to_canonical(record: &FieldMap) -> FieldMap {
        let mut canonical = mapping::from_target_fields(FIELD_MAPPINGS, record);
        if let Some(id) = record.get(TARGET_ID_FIELD) {
            canonical.insert(ID_FIELD.to_owned(), id.clone());
        }
        canonical
    }

    fn failure_response(error: FormError) -> GenericResponse {
        match error {
            FormError::Backend(e) => {
                tracing::error!(error = ?e, "work-order backend fault");
                GenericResponse::error(format!("Backend error: {e}"))
            }
            domain => GenericResponse::failed(domain.to_string()),
        }
    }
}

#[async_trait]
impl Module for WorkOrderModule {
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
            errors.push(format!("Work order ID is required for {operation} operation"));
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
