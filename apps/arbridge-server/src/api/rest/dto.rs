//! Wire representations for the REST boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arbridge_core::{FieldMap, GenericResponse, Status};

/// The response envelope every endpoint returns.
///
/// Mirrors [`GenericResponse`] one to one so that boundary clients see the
/// module's outcome unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: Status,
    #[serde(default)]
    pub data: FieldMap,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiResponse {
    /// An ERROR envelope produced by the boundary itself (routing and
    /// validation faults that never reached a module).
    #[must_use]
    pub fn boundary_error(message: impl Into<String>, data: FieldMap) -> Self {
        Self {
            status: Status::Error,
            data,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

impl From<GenericResponse> for ApiResponse {
    fn from(response: GenericResponse) -> Self {
        Self {
            status: response.status(),
            data: response.data().clone(),
            message: response.message().to_owned(),
            timestamp: response.timestamp(),
        }
    }
}

/// Registered module types, as reported by the discovery endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleListResponse {
    pub modules: Vec<String>,
    pub count: usize,
}
