use serde::{Deserialize, Serialize};

use spot_index::{OwnershipMap, Segments, segments};
use spot_model::{Document, FieldSet, FieldSetError, validate};
use spot_mutate::{FieldEdit, NamedEdit, apply_edits, resolve_edits};
use spot_render::StyledSpan;

use crate::TemplateError;

/// An immutable `(Document, FieldSet)` pair at one version.
///
/// This is the unit the whole engine passes around: segmenting, rendering
/// and mutation all take a snapshot and mutation returns a new one. The
/// enclosing application owns the single pointer to "current" and swaps
/// it atomically; adopting a new text with an old field set (or the
/// reverse) leaves every offset meaningless, which is why no operation
/// here ever updates in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub document: Document,
    pub fields: FieldSet,
}

impl Snapshot {
    /// Binds a field set to a document, validating the pair.
    pub fn new(document: Document, fields: FieldSet) -> Result<Self, FieldSetError> {
        validate(&fields, &document.text)?;
        Ok(Self { document, fields })
    }

    /// Re-checks the structural invariants, e.g. after deserializing a
    /// snapshot the storage layer produced.
    pub fn revalidate(&self) -> Result<(), FieldSetError> {
        validate(&self.fields, &self.document.text)
    }

    /// Per-byte ownership for this snapshot's field set.
    pub fn ownership(&self) -> OwnershipMap {
        OwnershipMap::build(&self.fields)
    }

    /// Lazy segment sequence over this snapshot's text.
    pub fn segments<'a>(&'a self, ownership: &'a OwnershipMap) -> Segments<'a> {
        segments(&self.document.text, ownership)
    }

    /// Renderable spans with field labels.
    pub fn styled_spans(&self) -> Vec<StyledSpan> {
        let ownership = self.ownership();
        spot_render::styled_spans(&self.document.text, &self.fields, &ownership)
    }

    /// Applies a batch of id-addressed edits, returning the successor
    /// snapshot. The batch is atomic; any rejection leaves `self` as the
    /// latest version.
    pub fn apply(&self, edits: &[FieldEdit]) -> Result<Snapshot, TemplateError> {
        let (document, fields) = apply_edits(&self.document, &self.fields, edits)?;
        Ok(Snapshot { document, fields })
    }

    /// Applies a batch of name-addressed edits (the command-interpreter
    /// shape), resolving names fuzzily before applying.
    pub fn apply_named(&self, edits: &[NamedEdit]) -> Result<Snapshot, TemplateError> {
        let batch = resolve_edits(&self.fields, edits)?;
        self.apply(&batch)
    }
}
