use thiserror::Error;

use spot_model::{FieldId, FieldSetError};

/// Rejections and failures of a batch edit.
///
/// Everything here surfaces synchronously to the caller; a rejected
/// batch leaves the input snapshot untouched, and there is no automatic
/// retry because each failure reflects a logic or input error, not a
/// transient condition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MutateError {
    /// The batch references a field id absent from the snapshot.
    /// Rejected wholesale, nothing applied.
    #[error("edit references unknown field {0}")]
    UnknownField(FieldId),
    /// A name-addressed edit matched no field, even fuzzily.
    #[error("edit references unknown field name `{0}`")]
    UnknownFieldName(String),
    /// Two writes in the batch cover overlapping ranges. The engine does
    /// not merge overlapping edits; the batch is rejected wholesale.
    #[error("conflicting edits: fields {first} and {second} write overlapping ranges at byte {at}")]
    ConflictingEdit {
        first: FieldId,
        second: FieldId,
        at: usize,
    },
    /// The input snapshot itself failed structural validation.
    #[error(transparent)]
    InvalidSnapshot(#[from] FieldSetError),
    /// Post-edit validation failed. Fatal: indicates an engine bug, and
    /// no partially-updated pair is returned.
    #[error("post-edit consistency check failed: {0}")]
    InternalConsistency(String),
}
