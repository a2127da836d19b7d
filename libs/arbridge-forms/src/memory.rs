//! In-memory reference backend.
//!
//! A consistent store: an entry created here is visible to subsequent
//! get/update/search calls, unlike a canned-response mock. Entry ids are
//! generated from a single atomic counter, so concurrent creates never
//! collide; updates merge under the map's shard lock, so concurrent updates
//! to the same entry never lose fields.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::FormError;
use crate::handler::{FieldMap, FormHandler};

/// Shape of a known form: id generation and required target fields.
struct FormSpec {
    name: &'static str,
    id_prefix: &'static str,
    /// Target fields into which the generated id is echoed on create.
    echo_fields: &'static [&'static str],
    required_fields: &'static [&'static str],
}

const KNOWN_FORMS: &[FormSpec] = &[
    FormSpec {
        name: "HPD:Help Desk",
        id_prefix: "INC",
        echo_fields: &["Incident_Number", "Entry_ID"],
        required_fields: &["Short_Description", "Priority", "Status"],
    },
    FormSpec {
        name: "WOI:WorkOrder",
        id_prefix: "WO",
        echo_fields: &["WorkOrder_ID", "Entry_ID"],
        required_fields: &["Summary", "Status"],
    },
];

fn form_spec(form: &str) -> Result<&'static FormSpec, FormError> {
    KNOWN_FORMS
        .iter()
        .find(|spec| spec.name == form)
        .ok_or_else(|| FormError::FormNotFound(form.to_owned()))
}

struct StoredEntry {
    form: String,
    fields: FieldMap,
}

/// Concurrency-safe in-memory form store.
pub struct InMemoryFormStore {
    entries: DashMap<String, StoredEntry>,
    next_id: AtomicU64,
}

impl InMemoryFormStore {
    /// Creates a store with the conventional starting entry number.
    #[must_use]
    pub fn new() -> Self {
        Self::with_starting_id(123)
    }

    /// Creates a store whose first generated entry number is `start`.
    #[must_use]
    pub fn with_starting_id(start: u64) -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicU64::new(start),
        }
    }

    /// Number of stored entries across all forms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn generate_entry_id(&self, spec: &FormSpec) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("{}{n:012}", spec.id_prefix)
    }

    fn validate_required(spec: &FormSpec, fields: &FieldMap) -> Result<(), FormError> {
        for required in spec.required_fields {
            match fields.get(*required) {
                Some(value) if !value.is_null() => {}
                _ => return Err(FormError::MissingField((*required).to_owned())),
            }
        }
        Ok(())
    }
}

impl Default for InMemoryFormStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormHandler for InMemoryFormStore {
    async fn create_entry(&self, form: &str, fields: FieldMap) -> Result<String, FormError> {
        let spec = form_spec(form)?;
        Self::validate_required(spec, &fields)?;

        let entry_id = self.generate_entry_id(spec);
        let mut stored = fields;
        for echo in spec.echo_fields {
            stored.insert(
                (*echo).to_owned(),
                serde_json::Value::String(entry_id.clone()),
            );
        }

        tracing::debug!(form, entry_id, "created entry");
        self.entries.insert(
            entry_id.clone(),
            StoredEntry {
                form: form.to_owned(),
                fields: stored,
            },
        );
        Ok(entry_id)
    }

    async fn get_entry(&self, form: &str, entry_id: &str) -> Result<FieldMap, FormError> {
        match self.entries.get(entry_id) {
            Some(entry) if entry.form == form => Ok(entry.fields.clone()),
            _ => Err(FormError::EntryNotFound(entry_id.to_owned())),
        }
    }

    async fn update_entry(
        &self,
        form: &str,
        entry_id: &str,
        updates: FieldMap,
    ) -> Result<(), FormError> {
        // get_mut holds the shard lock for the whole merge.
        match self.entries.get_mut(entry_id) {
            Some(mut entry) if entry.form == form => {
                entry.fields.extend(updates);
                tracing::debug!(form, entry_id, "updated entry");
                Ok(())
            }
            _ => Err(FormError::EntryNotFound(entry_id.to_owned())),
        }
    }

    async fn delete_entry(&self, form: &str, entry_id: &str) -> Result<(), FormError> {
        form_spec(form)?;
        self.entries.remove(entry_id);
        Ok(())
    }

    async fn search_entries(
        &self,
        form: &str,
        criteria: &FieldMap,
    ) -> Result<Vec<FieldMap>, FormError> {
        form_spec(form)?;
        let hits = self
            .entries
            .iter()
            .filter(|entry| {
                entry.form == form
                    && criteria
                        .iter()
                        .all(|(field, value)| entry.fields.get(field) == Some(value))
            })
            .map(|entry| entry.fields.clone())
            .collect();
        Ok(hits)
    }
}
