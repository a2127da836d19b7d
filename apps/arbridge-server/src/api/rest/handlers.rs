//! REST handlers over the dispatch orchestrator.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;

use arbridge_core::{FieldMap, GenericResponse, ModuleService, Status};

use super::dto::{ApiResponse, ModuleListResponse};
use super::error::ApiError;

/// Maps a module outcome to the HTTP code for the envelope.
///
/// FAILED is a domain failure the client can act on; ERROR is a handler
/// fault.
fn respond(response: GenericResponse, success_code: StatusCode) -> Response {
    let code = match response.status() {
        Status::Success => success_code,
        Status::Failed => StatusCode::UNPROCESSABLE_ENTITY,
        Status::Error => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (code, Json(ApiResponse::from(response))).into_response()
}

pub async fn list_modules(State(service): State<Arc<ModuleService>>) -> Json<ModuleListResponse> {
    let modules = service.module_types();
    let count = modules.len();
    Json(ModuleListResponse { modules, count })
}

pub async fn create_entry(
    State(service): State<Arc<ModuleService>>,
    Path(module_type): Path<String>,
    Json(data): Json<FieldMap>,
) -> Result<Response, ApiError> {
    let response = service.create_entry(&module_type, data).await?;
    Ok(respond(response, StatusCode::CREATED))
}

pub async fn get_entry(
    State(service): State<Arc<ModuleService>>,
    Path((module_type, entry_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let response = service.get_entry(&module_type, &entry_id).await?;
    Ok(respond(response, StatusCode::OK))
}

pub async fn update_entry(
    State(service): State<Arc<ModuleService>>,
    Path((module_type, entry_id)): Path<(String, String)>,
    Json(data): Json<FieldMap>,
) -> Result<Response, ApiError> {
    let response = service.update_entry(&module_type, &entry_id, data).await?;
    Ok(respond(response, StatusCode::OK))
}

/// Search with criteria from the query string. Every query parameter is a
/// canonical field name matched for equality; no parameters means "all
/// entries".
pub async fn search_entries(
    State(service): State<Arc<ModuleService>>,
    Path(module_type): Path<String>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Result<Response, ApiError> {
    let criteria: FieldMap = params
        .into_iter()
        .map(|(k, v)| (k, Value::String(v)))
        .collect();
    let response = service.search_entries(&module_type, criteria).await?;
    Ok(respond(response, StatusCode::OK))
}

/// Creates a batch of entries in one call.
///
/// Items are processed in order and independently: one invalid item does
/// not abort the rest. The reply carries one envelope per item.
pub async fn batch_create(
    State(service): State<Arc<ModuleService>>,
    Path(module_type): Path<String>,
    Json(items): Json<Vec<FieldMap>>,
) -> Result<Response, ApiError> {
    if !service.module_exists(&module_type) {
        return Err(ApiError(arbridge_core::GatewayError::ModuleNotFound(
            module_type,
        )));
    }

    let mut results = Vec::with_capacity(items.len());
    let mut succeeded = 0usize;
    for item in items {
        let envelope = match service.create_entry(&module_type, item).await {
            Ok(response) => {
                if response.status() == Status::Success {
                    succeeded += 1;
                }
                ApiResponse::from(response)
            }
            Err(err) => {
                let mut data = FieldMap::new();
                if let Some(errors) = err.validation_errors() {
                    data.insert(
                        "errors".to_owned(),
                        Value::Array(errors.iter().cloned().map(Value::String).collect()),
                    );
                }
                ApiResponse::boundary_error(err.to_string(), data)
            }
        };
        results.push(envelope);
    }

    let body = serde_json::json!({
        "total": results.len(),
        "succeeded": succeeded,
        "results": results,
    });
    Ok((StatusCode::OK, Json(body)).into_response())
}
