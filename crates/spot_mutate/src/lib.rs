//! Batch mutation engine for position-indexed field sets.
//!
//! [`apply_edits`] takes a `(Document, FieldSet)` snapshot and a batch of
//! field-value changes, and produces the successor pair: every occurrence
//! of every targeted field replaced with the new value, every other
//! position shifted so it still covers the same content. Replacement text
//! is rarely the same length as what it replaces, so keeping the
//! untouched offsets correct is the entire job.
//!
//! The engine operates purely on offsets. It never pattern-matches
//! content, so replacement text that happens to look like another field's
//! boundary text cannot confuse it.
//!
//! Batches are atomic: overlapping writes, unknown field references, or
//! a structurally broken input snapshot reject the whole batch with the
//! inputs untouched. A passing batch re-validates its own output before
//! returning; a failure there aborts instead of handing back a corrupted
//! pair.

mod engine;
mod error;
mod resolve;

pub use crate::engine::{FieldEdit, apply_edits};
pub use crate::error::MutateError;
pub use crate::resolve::{NamedEdit, resolve_edits, resolve_field};
