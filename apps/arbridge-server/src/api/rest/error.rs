//! HTTP problem mapping for gateway errors.
//!
//! Module-reported failures travel inside the envelope with 2xx/4xx/5xx
//! status codes chosen here; only faults that never reached a module
//! (unknown type, malformed request) surface as plain HTTP errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::Value;

use arbridge_core::{FieldMap, GatewayError};

use super::dto::ApiResponse;

/// Boundary-side wrapper so [`GatewayError`] can be returned from handlers.
#[derive(Debug)]
pub struct ApiError(pub GatewayError);

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message, data) = match &self.0 {
            GatewayError::ModuleNotFound(module_type) => (
                StatusCode::NOT_FOUND,
                format!("No module registered for type '{module_type}'"),
                FieldMap::new(),
            ),
            GatewayError::InvalidRequest { errors } => {
                let mut data = FieldMap::new();
                data.insert(
                    "errors".to_owned(),
                    Value::Array(errors.iter().cloned().map(Value::String).collect()),
                );
                (StatusCode::BAD_REQUEST, self.0.to_string(), data)
            }
            GatewayError::UnsupportedOperation(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string(), FieldMap::new())
            }
            GatewayError::DuplicateModule(_) | GatewayError::Internal(_) => {
                tracing::error!(error = %self.0, "internal gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                    FieldMap::new(),
                )
            }
        };

        (code, Json(ApiResponse::boundary_error(message, data))).into_response()
    }
}
