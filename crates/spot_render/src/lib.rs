//! Presentation adapter: maps range-index segments to display
//! primitives, and user selections back to fields.
//!
//! Holds no state of its own. Every function recomputes from the current
//! `(Document, FieldSet)` pair, so a caller that swapped in a new
//! snapshot gets a consistent view by construction.

use serde::Serialize;

use spot_index::{OwnershipMap, segments};
use spot_model::{FieldId, FieldSet, FieldType};

/// One renderable run of text: either plain, or an occurrence of the
/// labeled field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub field_id: Option<FieldId>,
    /// Owning field's name, for badges and tooltips.
    pub label: Option<String>,
}

/// A legend row: the field list a UI shows beside the highlighted view.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub id: FieldId,
    pub name: String,
    pub field_type: FieldType,
    pub current_value: Option<String>,
    pub occurrences: usize,
}

/// Renders the whole text as styled spans, in document order.
///
/// Concatenating `text` over the result reproduces the input exactly;
/// spans inherit the ownership tie-break of the underlying index.
pub fn styled_spans(text: &str, fields: &FieldSet, ownership: &OwnershipMap) -> Vec<StyledSpan> {
    segments(text, ownership)
        .map(|segment| StyledSpan {
            text: segment.text.to_string(),
            field_id: segment.field_id,
            label: segment
                .field_id
                .and_then(|id| fields.get(id))
                .map(|f| f.name.clone()),
        })
        .collect()
}

/// The field list in set order.
pub fn legend(fields: &FieldSet) -> Vec<LegendEntry> {
    fields
        .iter()
        .map(|f| LegendEntry {
            id: f.id,
            name: f.name.clone(),
            field_type: f.field_type.clone(),
            current_value: f.current_value.clone(),
            occurrences: f.positions.len(),
        })
        .collect()
}

/// The field under a single caret position, if any.
pub fn field_at(ownership: &OwnershipMap, byte: usize) -> Option<FieldId> {
    ownership.owner_at(byte)
}

/// Maps a selection to a field id when the whole selection lies inside
/// occurrences of one field; anything mixed or partially plain is None.
///
/// This is the "click/drag to confirm a field" interaction: a sloppy
/// selection spanning two fields should not silently pick one of them.
pub fn field_for_selection(
    text: &str,
    ownership: &OwnershipMap,
    start: usize,
    end: usize,
) -> Option<FieldId> {
    let selection = text.get(start..end)?;
    if selection.is_empty() {
        return field_at(ownership, start);
    }

    let mut owner: Option<FieldId> = None;
    for (idx, _) in selection.char_indices() {
        match (owner, ownership.owner_at(start + idx)) {
            (_, None) => return None,
            (None, Some(id)) => owner = Some(id),
            (Some(prev), Some(id)) if prev != id => return None,
            _ => {}
        }
    }
    owner
}

#[cfg(test)]
mod tests {
    use super::*;
    use spot_model::{Field, FieldPosition, FieldSet, FieldType};

    fn sample() -> (&'static str, FieldSet) {
        let text = "Dear John, welcome to Acme.";
        let mut fields = FieldSet::new();
        fields.add(Field::new(
            "name",
            FieldType::TEXT,
            vec![FieldPosition::new(5, 9)],
        ));
        fields.add(Field::new(
            "company",
            FieldType::TEXT,
            vec![FieldPosition::new(22, 26)],
        ));
        (text, fields)
    }

    #[test]
    fn spans_carry_field_labels() {
        let (text, fields) = sample();
        let ownership = OwnershipMap::build(&fields);
        let spans = styled_spans(text, &fields, &ownership);

        let rebuilt: String = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt, text);

        let labels: Vec<Option<&str>> = spans.iter().map(|s| s.label.as_deref()).collect();
        assert_eq!(
            labels,
            vec![None, Some("name"), None, Some("company"), None]
        );
    }

    #[test]
    fn legend_follows_set_order() {
        let (_, fields) = sample();
        let rows = legend(&fields);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "name");
        assert_eq!(rows[1].name, "company");
        assert_eq!(rows[0].occurrences, 1);
    }

    #[test]
    fn selection_inside_one_field_resolves() {
        let (text, fields) = sample();
        let ownership = OwnershipMap::build(&fields);
        let name_id = fields.by_name("name").unwrap().id;

        assert_eq!(field_for_selection(text, &ownership, 5, 9), Some(name_id));
        assert_eq!(field_for_selection(text, &ownership, 6, 8), Some(name_id));
    }

    #[test]
    fn selection_spanning_plain_text_is_none() {
        let (text, fields) = sample();
        let ownership = OwnershipMap::build(&fields);

        assert_eq!(field_for_selection(text, &ownership, 3, 9), None);
        assert_eq!(field_for_selection(text, &ownership, 5, 12), None);
    }

    #[test]
    fn selection_spanning_two_fields_is_none() {
        let text = "aabb";
        let mut fields = FieldSet::new();
        fields.add(Field::new(
            "a",
            FieldType::TEXT,
            vec![FieldPosition::new(0, 2)],
        ));
        fields.add(Field::new(
            "b",
            FieldType::TEXT,
            vec![FieldPosition::new(2, 4)],
        ));
        let ownership = OwnershipMap::build(&fields);
        assert_eq!(field_for_selection(text, &ownership, 1, 3), None);
    }

    #[test]
    fn caret_lookup_matches_ownership() {
        let (_, fields) = sample();
        let ownership = OwnershipMap::build(&fields);
        let name_id = fields.by_name("name").unwrap().id;

        assert_eq!(field_at(&ownership, 5), Some(name_id));
        assert_eq!(field_at(&ownership, 4), None);
    }

    #[test]
    fn out_of_range_selection_is_none() {
        let (text, fields) = sample();
        let ownership = OwnershipMap::build(&fields);
        assert_eq!(field_for_selection(text, &ownership, 10, 999), None);
    }
}
