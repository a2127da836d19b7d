//! The form backend contract.

use async_trait::async_trait;

use crate::error::FormError;

/// Target-system field layout: field identifier → value.
pub type FieldMap = serde_json::Map<String, serde_json::Value>;

/// Abstract CRUD-plus-search surface of the external ticketing system.
///
/// `form` names the target-system record container (e.g. `"HPD:Help Desk"`).
/// All field names on this surface are target-system identifiers; canonical
/// field translation happens in the module, not here.
#[async_trait]
pub trait FormHandler: Send + Sync {
    /// Creates an entry and returns the generated entry identifier.
    async fn create_entry(&self, form: &str, fields: FieldMap) -> Result<String, FormError>;

    /// Retrieves an entry's fields by id.
    async fn get_entry(&self, form: &str, entry_id: &str) -> Result<FieldMap, FormError>;

    /// Applies field updates to an existing entry; fails when the id is
    /// unknown.
    async fn update_entry(
        &self,
        form: &str,
        entry_id: &str,
        updates: FieldMap,
    ) -> Result<(), FormError>;

    /// Deletes an entry; deleting an unknown id is a no-op.
    async fn delete_entry(&self, form: &str, entry_id: &str) -> Result<(), FormError>;

    /// Returns all entries of `form` whose fields equal every criterion.
    async fn search_entries(
        &self,
        form: &str,
        criteria: &FieldMap,
    ) -> Result<Vec<FieldMap>, FormError>;
}
