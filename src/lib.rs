//! Workspace umbrella crate for the Spot Edit template field engine.
//!
//! This crate stitches together field intake, indexing, mutation and
//! rendering so callers can operate over document templates with a
//! single API entry point.
//!
//! The engine's unit of work is the [`Snapshot`]: an immutable
//! `(Document, FieldSet)` pair at one version. A detector report is
//! confirmed into a snapshot once ([`confirm_and_snapshot`]); from then
//! on the template evolves only through [`Snapshot::apply`] /
//! [`Snapshot::apply_named`], each call yielding the successor snapshot
//! with every field offset corrected for the applied edits.
//!
//! Nothing here performs I/O or talks to an AI provider. Field detection
//! and command interpretation happen outside; this crate takes their
//! output as input and checks only structural validity.

pub use spot_index::{OwnershipMap, Segment, Segments, segments};
pub use spot_intake::{
    DetectedField, DetectionReport, DropReason, DroppedEntry, IntakeConfig, IntakeError,
    IntakeOutcome, OverlapHint, confirm_fields,
};
pub use spot_model::{
    Document, Field, FieldId, FieldPosition, FieldSet, FieldSetError, FieldType, validate,
};
pub use spot_mutate::{FieldEdit, MutateError, NamedEdit, apply_edits, resolve_edits, resolve_field};
pub use spot_render::{
    LegendEntry, StyledSpan, field_at, field_for_selection, legend, styled_spans,
};

mod snapshot;

pub use crate::snapshot::Snapshot;

use std::error::Error;
use std::fmt;

/// Errors that can occur while processing a template through the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    Intake(IntakeError),
    Validate(FieldSetError),
    Mutate(MutateError),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Intake(err) => write!(f, "intake failure: {err}"),
            TemplateError::Validate(err) => write!(f, "validation failure: {err}"),
            TemplateError::Mutate(err) => write!(f, "mutation failure: {err}"),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TemplateError::Intake(err) => Some(err),
            TemplateError::Validate(err) => Some(err),
            TemplateError::Mutate(err) => Some(err),
        }
    }
}

impl From<IntakeError> for TemplateError {
    fn from(value: IntakeError) -> Self {
        TemplateError::Intake(value)
    }
}

impl From<FieldSetError> for TemplateError {
    fn from(value: FieldSetError) -> Self {
        TemplateError::Validate(value)
    }
}

impl From<MutateError> for TemplateError {
    fn from(value: MutateError) -> Self {
        TemplateError::Mutate(value)
    }
}

/// Confirms a detector report against freshly uploaded text and binds
/// the surviving fields into the template's first snapshot.
///
/// Dropped entries and overlap hints from intake are returned alongside
/// so the confirmation UI can surface them.
pub fn confirm_and_snapshot(
    text: impl Into<String>,
    report: DetectionReport,
    cfg: &IntakeConfig,
) -> Result<(Snapshot, IntakeOutcome), TemplateError> {
    let text = text.into();
    let outcome = confirm_fields(&text, report, cfg)?;
    let snapshot = Snapshot::new(Document::new(text), outcome.fields.clone())?;
    Ok((snapshot, outcome))
}
