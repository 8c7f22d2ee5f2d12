use thiserror::Error;

use crate::field::FieldId;

/// Structural validation failures for a field set against a document text.
///
/// Both variants are recoverable: the offending input set is rejected
/// before any mutation touches it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldSetError {
    /// A position does not denote a valid slice of the document text:
    /// empty range, range past the end, or an offset landing inside a
    /// multi-byte character.
    #[error("field {field_id} position {start}..{end}: {detail}")]
    OutOfBounds {
        field_id: FieldId,
        start: usize,
        end: usize,
        detail: String,
    },
    /// A field (or the set as a whole) breaks its own structural
    /// invariants: overlapping or unsorted own positions, duplicate ids,
    /// empty name.
    #[error("malformed field {field_id}: {detail}")]
    MalformedField { field_id: FieldId, detail: String },
}
