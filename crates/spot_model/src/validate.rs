use std::collections::HashSet;

use crate::error::FieldSetError;
use crate::fieldset::FieldSet;

/// Checks every structural invariant of `fields` against `text`.
///
/// Rejects: empty names, duplicate ids, empty or out-of-range positions,
/// offsets that split a UTF-8 character, and own-positions that are
/// unsorted or overlapping. Overlaps between *different* fields pass:
/// they are detector noise, resolved downstream by a deterministic
/// tie-break.
///
/// Content is never inspected: `current_value` may disagree with the
/// text at any occurrence.
pub fn validate(fields: &FieldSet, text: &str) -> Result<(), FieldSetError> {
    let text_len = text.len();
    let mut seen_ids = HashSet::with_capacity(fields.len());

    for field in fields {
        if !seen_ids.insert(field.id) {
            return Err(FieldSetError::MalformedField {
                field_id: field.id,
                detail: "duplicate field id in set".into(),
            });
        }
        if field.name.trim().is_empty() {
            return Err(FieldSetError::MalformedField {
                field_id: field.id,
                detail: "empty field name".into(),
            });
        }

        let mut prev_end: Option<usize> = None;
        for pos in &field.positions {
            if pos.start >= pos.end {
                return Err(out_of_bounds(field.id, pos.start, pos.end, "empty range"));
            }
            if pos.end > text_len {
                return Err(out_of_bounds(
                    field.id,
                    pos.start,
                    pos.end,
                    &format!("past end of {text_len}-byte text"),
                ));
            }
            if !text.is_char_boundary(pos.start) || !text.is_char_boundary(pos.end) {
                return Err(out_of_bounds(
                    field.id,
                    pos.start,
                    pos.end,
                    "offset splits a UTF-8 character",
                ));
            }
            if let Some(end) = prev_end {
                // Covers both overlap and out-of-order in one check:
                // sorted disjoint positions have strictly increasing ends.
                if pos.start < end {
                    return Err(FieldSetError::MalformedField {
                        field_id: field.id,
                        detail: format!(
                            "positions overlap or are unsorted near {}..{}",
                            pos.start, pos.end
                        ),
                    });
                }
            }
            prev_end = Some(pos.end);
        }
    }

    Ok(())
}

fn out_of_bounds(
    field_id: crate::field::FieldId,
    start: usize,
    end: usize,
    detail: &str,
) -> FieldSetError {
    FieldSetError::OutOfBounds {
        field_id,
        start,
        end,
        detail: detail.to_string(),
    }
}
