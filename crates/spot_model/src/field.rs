use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::position::FieldPosition;

/// Unique identifier for a field within one document's field set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FieldId(pub Uuid);

impl FieldId {
    /// Freshly generated random id, for fields added by hand.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Open field category tag.
///
/// Detectors label fields with free-form categories (`text`, `date`,
/// `number`, ...) and may introduce new ones at any time, so this is a
/// tagged string rather than a closed enum. Type-specific formatting is
/// not validated here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FieldType(pub String);

impl FieldType {
    pub const TEXT: &'static str = "text";
    pub const DATE: &'static str = "date";
    pub const NUMBER: &'static str = "number";
    pub const EMAIL: &'static str = "email";
    pub const PHONE: &'static str = "phone";
    pub const ADDRESS: &'static str = "address";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        Self(tag.to_string())
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// A named, typed variable occurring at one or more byte ranges in a
/// document's text.
///
/// `positions` must stay sorted by `start` and disjoint; that is enforced
/// by [`validate`](crate::validate), not by construction.
///
/// `current_value` is the most recently assigned value, not a derived
/// invariant: occurrences are allowed to disagree with it (and with each
/// other) when the set came out of a noisy detector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub id: FieldId,
    pub name: String,
    pub field_type: FieldType,
    /// Occurrences ordered by `start`, pairwise disjoint.
    pub positions: Vec<FieldPosition>,
    /// Most recently assigned value, if any.
    pub current_value: Option<String>,
    /// Free-form per-field metadata carried through from detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Value>,
}

impl Field {
    /// New field with a random id and no assigned value.
    pub fn new(
        name: impl Into<String>,
        field_type: impl Into<FieldType>,
        positions: Vec<FieldPosition>,
    ) -> Self {
        Self {
            id: FieldId::random(),
            name: name.into(),
            field_type: field_type.into(),
            positions,
            current_value: None,
            attributes: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.current_value = Some(value.into());
        self
    }

    /// Total byte coverage across all occurrences.
    pub fn coverage(&self) -> usize {
        self.positions.iter().map(FieldPosition::len).sum()
    }
}
