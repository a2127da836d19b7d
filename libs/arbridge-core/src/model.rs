//! Canonical data model shared by all modules.
//!
//! Requests and responses are plain immutable values: constructed once,
//! never mutated afterwards. Field payloads are loosely typed JSON maps so
//! that callers can send whatever their integration needs; each module
//! decides which fields it understands (see [`crate::mapping`]).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Loosely typed field payload: canonical field name → scalar or nested value.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// A canonical entity-operation request routed to a module.
///
/// Operations are case-insensitive; the operation name is lowercased at
/// construction so modules can match on it directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericRequest {
    module_type: String,
    operation: String,
    data: FieldMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<BTreeMap<String, String>>,
}

impl GenericRequest {
    #[must_use]
    pub fn new(
        module_type: impl Into<String>,
        operation: impl Into<String>,
        data: FieldMap,
    ) -> Self {
        Self {
            module_type: module_type.into(),
            operation: operation.into().to_ascii_lowercase(),
            data,
            metadata: None,
        }
    }

    /// Attaches cross-cutting metadata (trace identifiers and the like).
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Adds a single metadata entry, creating the map on first use.
    #[must_use]
    pub fn with_metadata_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn module_type(&self) -> &str {
        &self.module_type
    }

    /// The lowercased operation name.
    #[must_use]
    pub fn operation(&self) -> &str {
        &self.operation
    }

    #[must_use]
    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    #[must_use]
    pub fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.as_ref()
    }
}

/// Outcome status of a processed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The operation's side effect, if any, has committed in the backend.
    Success,
    /// The handler reported a domain failure (e.g. unknown entry).
    Failed,
    /// An unexpected condition was caught inside the handler.
    Error,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Success => f.write_str("SUCCESS"),
            Status::Failed => f.write_str("FAILED"),
            Status::Error => f.write_str("ERROR"),
        }
    }
}

/// A canonical response produced by a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericResponse {
    status: Status,
    /// May be empty, never absent.
    data: FieldMap,
    message: String,
    timestamp: DateTime<Utc>,
}

impl GenericResponse {
    #[must_use]
    pub fn success(data: FieldMap, message: impl Into<String>) -> Self {
        Self::build(Status::Success, data, message)
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::build(Status::Failed, FieldMap::new(), message)
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::build(Status::Error, FieldMap::new(), message)
    }

    fn build(status: Status, data: FieldMap, message: impl Into<String>) -> Self {
        Self {
            status,
            data,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Result of validating a request against a module's rules.
///
/// Validation failures travel as data, never as raised faults; callers check
/// before acting. Error order is itemization order and matters only for
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no errors.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result. An empty error list is replaced by a generic error
    /// so that invalid results always carry at least one reason.
    #[must_use]
    pub fn invalid(errors: Vec<String>) -> Self {
        let errors = if errors.is_empty() {
            vec!["request is invalid".to_owned()]
        } else {
            errors
        };
        Self {
            valid: false,
            errors,
        }
    }

    /// A failing result with a single error.
    #[must_use]
    pub fn invalid_one(error: impl Into<String>) -> Self {
        Self::invalid(vec![error.into()])
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// All errors joined for display, `None` when the result is valid.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_data() -> FieldMap {
        let mut data = FieldMap::new();
        data.insert("summary".to_owned(), json!("Printer on fire"));
        data
    }

    #[test]
    fn request_lowercases_operation() {
        let req = GenericRequest::new("incident", "CREATE", sample_data());
        assert_eq!(req.operation(), "create");
        assert_eq!(req.module_type(), "incident");
    }

    #[test]
    fn request_metadata_is_optional() {
        let req = GenericRequest::new("incident", "get", FieldMap::new());
        assert!(req.metadata().is_none());

        let req = req.with_metadata_entry("request_id", "r-1");
        assert_eq!(
            req.metadata().and_then(|m| m.get("request_id")).map(String::as_str),
            Some("r-1")
        );
    }

    #[test]
    fn response_data_is_never_absent() {
        let resp = GenericResponse::failed("backend unreachable");
        assert_eq!(resp.status(), Status::Failed);
        assert!(resp.data().is_empty());
        assert_eq!(resp.message(), "backend unreachable");
    }

    #[test]
    fn status_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&Status::Success).unwrap(),
            "\"SUCCESS\""
        );
        assert_eq!(Status::Error.to_string(), "ERROR");
    }

    #[test]
    fn valid_result_has_no_errors() {
        let result = ValidationResult::valid();
        assert!(result.is_valid());
        assert!(result.errors().is_empty());
        assert!(result.error_message().is_none());
    }

    #[test]
    fn invalid_result_always_carries_an_error() {
        let result = ValidationResult::invalid(Vec::new());
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);

        let result = ValidationResult::invalid(vec!["a".into(), "b".into()]);
        assert_eq!(result.error_message().as_deref(), Some("a, b"));
    }

    #[test]
    fn invalid_preserves_itemization_order() {
        let result =
            ValidationResult::invalid(vec!["first".into(), "second".into(), "third".into()]);
        assert_eq!(result.errors(), ["first", "second", "third"]);
    }
}
