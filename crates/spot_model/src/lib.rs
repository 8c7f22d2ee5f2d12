//! Position-indexed field model for document templates.
//!
//! A template is a plain-text [`Document`] plus a [`FieldSet`]: named,
//! typed fields, each bound to one or more byte ranges in the text.
//! Everything downstream (segmenting, rendering, batched value edits)
//! trusts the structural invariants this crate validates:
//!
//! - every position is a valid half-open byte range into the text,
//!   aligned on UTF-8 character boundaries
//! - a field's own positions are sorted and disjoint
//! - field ids are unique within a set
//!
//! Positions of *different* fields may overlap. Detector output cannot
//! be fully trusted, and the index layer resolves that with a
//! deterministic tie-break instead of failing here.
//!
//! All values are immutable snapshots: an edit produces a new
//! `(Document, FieldSet)` pair, never an in-place change. Offsets are
//! only meaningful against the exact document version they were
//! validated for.

mod document;
mod error;
mod field;
mod fieldset;
mod position;
mod validate;

pub use crate::document::Document;
pub use crate::error::FieldSetError;
pub use crate::field::{Field, FieldId, FieldType};
pub use crate::fieldset::FieldSet;
pub use crate::position::FieldPosition;
pub use crate::validate::validate;
