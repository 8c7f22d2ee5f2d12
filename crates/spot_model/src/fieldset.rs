use serde::{Deserialize, Serialize};

use crate::field::{Field, FieldId};

/// The full collection of fields bound to one document version.
///
/// Insertion order is significant: when positions of different fields
/// overlap, the index layer resolves ownership in favor of the
/// later-inserted field, so reordering a set changes how overlaps render.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.iter_mut()
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Exact name lookup; first match wins when names repeat.
    pub fn by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Appends a field. Structural invariants (unique id, valid
    /// positions) are checked by [`validate`](crate::validate), not here.
    pub fn add(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Removes and returns the field with `id`, if present.
    pub fn remove(&mut self, id: FieldId) -> Option<Field> {
        let idx = self.fields.iter().position(|f| f.id == id)?;
        Some(self.fields.remove(idx))
    }

    /// Renames the field with `id`. Returns false when no such field.
    pub fn rename(&mut self, id: FieldId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(field) => {
                field.name = name.into();
                true
            }
            None => false,
        }
    }
}

impl IntoIterator for FieldSet {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
