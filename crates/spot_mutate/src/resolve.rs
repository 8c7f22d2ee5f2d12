use serde::{Deserialize, Serialize};

use spot_model::{Field, FieldSet};

use crate::engine::FieldEdit;
use crate::error::MutateError;

/// A field-value change addressed by field name rather than id, the
/// shape command interpreters naturally produce ("change the client name
/// to Jane Smith").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedEdit {
    pub field_name: String,
    pub new_value: String,
}

/// Translates name-addressed edits into an id-addressed batch.
///
/// Names are matched leniently: exact match on the normalized form
/// first, then substring containment either way, so "client" resolves to
/// "client_name". An unresolvable name rejects the whole batch.
pub fn resolve_edits(fields: &FieldSet, edits: &[NamedEdit]) -> Result<Vec<FieldEdit>, MutateError> {
    edits
        .iter()
        .map(|edit| {
            let field = resolve_field(fields, &edit.field_name)
                .ok_or_else(|| MutateError::UnknownFieldName(edit.field_name.clone()))?;
            Ok(FieldEdit {
                field_id: field.id,
                new_value: edit.new_value.clone(),
            })
        })
        .collect()
}

/// Finds the field a loosely spelled name refers to.
pub fn resolve_field<'a>(fields: &'a FieldSet, name: &str) -> Option<&'a Field> {
    let needle = normalize_name(name);
    if needle.is_empty() {
        return None;
    }

    fields
        .iter()
        .find(|f| normalize_name(&f.name) == needle)
        .or_else(|| {
            fields.iter().find(|f| {
                let hay = normalize_name(&f.name);
                hay.contains(&needle) || needle.contains(&hay)
            })
        })
}

/// Lowercases and folds spaces/hyphens to underscores, the same
/// normalization applied to both sides of every comparison.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace([' ', '-'], "_")
}
