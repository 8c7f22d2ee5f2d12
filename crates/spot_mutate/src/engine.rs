use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{Level, info, warn};

use spot_model::{Document, FieldId, FieldPosition, FieldSet, validate};

use crate::error::MutateError;

/// One proposed field-value change. Every occurrence of the named field
/// receives the same value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldEdit {
    pub field_id: FieldId,
    pub new_value: String,
}

/// Applies a batch of field-value edits to a snapshot.
///
/// Returns the successor `(Document, FieldSet)` pair: the text with every
/// occurrence of every targeted field replaced, and every field position
/// (targeted or not) remapped so it is correct against the new text. The
/// caller must adopt both values together; mixing the new text with the
/// old field set (or vice versa) leaves offsets meaningless.
///
/// The batch is atomic: any rejection leaves the inputs untouched and the
/// version unbumped. A field with no occurrences contributes no writes
/// but still has its `current_value` updated. Replacing with an empty
/// value deletes the occurrence text and leaves the field with zero
/// positions; it keeps its identity and can be re-placed later.
pub fn apply_edits(
    document: &Document,
    fields: &FieldSet,
    edits: &[FieldEdit],
) -> Result<(Document, FieldSet), MutateError> {
    let started = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "spot_mutate.apply",
        version = document.version,
        edits = edits.len()
    );
    let _guard = span.enter();

    match apply_inner(document, fields, edits) {
        Ok((new_document, new_fields)) => {
            info!(
                new_version = new_document.version,
                old_len = document.text.len(),
                new_len = new_document.text.len(),
                elapsed_micros = started.elapsed().as_micros() as u64,
                "apply_success"
            );
            Ok((new_document, new_fields))
        }
        Err(err) => {
            warn!(version = document.version, error = %err, "apply_rejected");
            Err(err)
        }
    }
}

/// One write: a single occurrence of a targeted field and the value
/// replacing it.
struct Write<'a> {
    field_id: FieldId,
    start: usize,
    end: usize,
    new_value: &'a str,
}

fn apply_inner(
    document: &Document,
    fields: &FieldSet,
    edits: &[FieldEdit],
) -> Result<(Document, FieldSet), MutateError> {
    // The engine trusts offsets completely, so the snapshot must be
    // structurally sound before any splicing.
    validate(fields, &document.text)?;

    // One write per occurrence, across all targeted fields. A field
    // listed twice duplicates its writes, which the overlap check below
    // rejects; no last-wins merging.
    let mut new_values: HashMap<FieldId, &str> = HashMap::with_capacity(edits.len());
    let mut writes: Vec<Write> = Vec::new();
    for edit in edits {
        let field = fields
            .get(edit.field_id)
            .ok_or(MutateError::UnknownField(edit.field_id))?;
        new_values.insert(field.id, edit.new_value.as_str());
        for pos in &field.positions {
            writes.push(Write {
                field_id: field.id,
                start: pos.start,
                end: pos.end,
                new_value: edit.new_value.as_str(),
            });
        }
    }

    writes.sort_by_key(|w| w.start);
    for pair in writes.windows(2) {
        if pair[0].end > pair[1].start {
            return Err(MutateError::ConflictingEdit {
                first: pair[0].field_id,
                second: pair[1].field_id,
                at: pair[1].start,
            });
        }
    }

    let new_text = splice(&document.text, &writes);

    // Running byte delta after each write; prefix[k] is the total shift
    // introduced by the first k writes.
    let mut prefix: Vec<i64> = Vec::with_capacity(writes.len() + 1);
    prefix.push(0);
    for w in &writes {
        let delta = w.new_value.len() as i64 - (w.end - w.start) as i64;
        prefix.push(prefix[prefix.len() - 1] + delta);
    }

    let mut new_fields = fields.clone();
    for field in new_fields.iter_mut() {
        let replacement = new_values.get(&field.id).copied();
        if replacement == Some("") {
            // An empty value erases the occurrences outright; a zero-width
            // range is not a valid position, but a field with no
            // occurrences is.
            field.positions.clear();
            field.current_value = Some(String::new());
            continue;
        }
        for pos in field.positions.iter_mut() {
            *pos = remap(*pos, replacement, &writes, &prefix)?;
        }
        if let Some(value) = replacement {
            field.current_value = Some(value.to_string());
        }
    }

    let new_document = document.with_text(new_text);
    validate(&new_fields, &new_document.text)
        .map_err(|err| MutateError::InternalConsistency(err.to_string()))?;

    Ok((new_document, new_fields))
}

/// Splices all writes into `text` in one left-to-right pass.
/// Writes must be sorted by start and pairwise disjoint.
fn splice(text: &str, writes: &[Write]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for w in writes {
        out.push_str(&text[cursor..w.start]);
        out.push_str(w.new_value);
        cursor = w.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Remaps one position into post-edit coordinates.
///
/// A written occurrence becomes the span of its replacement text. Any
/// other position shifts by the summed deltas of the writes that ended at
/// or before its start; positions before every write keep their offsets.
/// A position of an untargeted field that straddles a write keeps its
/// offsets too; the post-edit validation pass decides whether the result
/// is still structurally sound.
fn remap(
    pos: FieldPosition,
    replacement: Option<&str>,
    writes: &[Write],
    prefix: &[i64],
) -> Result<FieldPosition, MutateError> {
    // Writes are disjoint and sorted, so "writes ending at or before
    // pos.start" is a prefix of the list.
    let shifted_by = prefix[writes.partition_point(|w| w.end <= pos.start)];

    let start = shift(pos.start, shifted_by)?;
    let end = match replacement {
        // This position is itself a write target; its occurrences and the
        // write ranges are the same set, so the replacement span starts
        // where the (shifted) occurrence started.
        Some(value) => start + value.len(),
        None => shift(pos.end, shifted_by)?,
    };
    Ok(FieldPosition { start, end })
}

fn shift(offset: usize, by: i64) -> Result<usize, MutateError> {
    usize::try_from(offset as i64 + by).map_err(|_| {
        MutateError::InternalConsistency(format!("offset {offset} shifted below zero by {by}"))
    })
}
