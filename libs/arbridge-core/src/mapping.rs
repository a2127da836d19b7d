//! Field-translation helpers shared by all modules.
//!
//! A module declares a static table from canonical field names to the
//! target system's field identifiers. Both translation directions run over
//! the same table, so round-trip fields stay consistent by construction.
//!
//! Forward translation is permissive by policy: canonical fields absent from
//! the table are dropped, not rejected. The module is the authority on which
//! fields it understands; callers may send extra metadata without tripping
//! validation.

use crate::model::FieldMap;

/// Declarative mapping table: `(canonical name, target-system identifier)`.
pub type FieldTable = [(&'static str, &'static str)];

/// Translates canonical fields into the target system's field layout.
///
/// Unmapped fields are silently dropped.
#[must_use]
pub fn to_target_fields(table: &FieldTable, fields: &FieldMap) -> FieldMap {
    let mut out = FieldMap::new();
    for (name, value) in fields {
        if let Some((_, target)) = table.iter().find(|(canonical, _)| canonical == name) {
            out.insert((*target).to_owned(), value.clone());
        }
    }
    out
}

/// Translates a target-system record back into canonical field names.
///
/// Iterates the table (not the record), so target fields without a canonical
/// counterpart are left behind; modules lift special fields such as generated
/// identifiers themselves.
#[must_use]
pub fn from_target_fields(table: &FieldTable, fields: &FieldMap) -> FieldMap {
    let mut out = FieldMap::new();
    for (canonical, target) in table {
        if let Some(value) = fields.get(*target) {
            out.insert((*canonical).to_owned(), value.clone());
        }
    }
    out
}
