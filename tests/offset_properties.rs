//! Property tests for the mutation and segmenting invariants.

use proptest::prelude::*;

use spotedit::{
    Document, Field, FieldEdit, FieldPosition, FieldSet, FieldType, OwnershipMap, apply_edits,
    segments, validate,
};

/// ASCII text plus a set of disjoint, non-empty ranges into it.
/// ASCII keeps every offset a char boundary, so the generator can cut
/// anywhere; multi-byte alignment has its own directed tests.
fn text_with_ranges() -> impl Strategy<Value = (String, Vec<(usize, usize)>)> {
    "[a-zA-Z0-9 .,:-]{20,200}".prop_flat_map(|text| {
        let len = text.len();
        proptest::collection::btree_set(0..=len, 0..10).prop_map(move |cuts| {
            let cuts: Vec<usize> = cuts.into_iter().collect();
            let ranges = cuts.chunks_exact(2).map(|c| (c[0], c[1])).collect();
            (text.clone(), ranges)
        })
    })
}

fn one_field_per_range(text: &str, ranges: &[(usize, usize)]) -> FieldSet {
    let mut fields = FieldSet::new();
    for (i, &(start, end)) in ranges.iter().enumerate() {
        fields.add(
            Field::new(
                format!("field_{i}"),
                FieldType::TEXT,
                vec![FieldPosition::new(start, end)],
            )
            .with_value(&text[start..end]),
        );
    }
    fields
}

proptest! {
    /// Replacing every field with its own current text is a no-op on the
    /// bytes, and every range still points at the same content.
    #[test]
    fn round_trip_identity((text, ranges) in text_with_ranges()) {
        let fields = one_field_per_range(&text, &ranges);
        let doc = Document::new(text.clone());

        let batch: Vec<FieldEdit> = fields
            .iter()
            .map(|f| FieldEdit {
                field_id: f.id,
                new_value: text[f.positions[0].start..f.positions[0].end].to_string(),
            })
            .collect();

        let (new_doc, new_fields) = apply_edits(&doc, &fields, &batch).unwrap();
        prop_assert_eq!(&new_doc.text, &text);
        prop_assert_eq!(new_doc.version, 1);
        for (old, new) in fields.iter().zip(new_fields.iter()) {
            prop_assert_eq!(&old.positions, &new.positions);
        }
    }

    /// After any batch over a prefix of the fields, every untouched
    /// field's new range holds exactly the content its old range held.
    #[test]
    fn untouched_content_is_preserved(
        (text, ranges) in text_with_ranges(),
        replacement in "[a-z]{0,30}",
    ) {
        prop_assume!(ranges.len() >= 2);
        let fields = one_field_per_range(&text, &ranges);
        let doc = Document::new(text.clone());

        // Edit every other field, leave the rest untouched.
        let batch: Vec<FieldEdit> = fields
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 0)
            .map(|(_, f)| FieldEdit {
                field_id: f.id,
                new_value: replacement.clone(),
            })
            .collect();

        let (new_doc, new_fields) = apply_edits(&doc, &fields, &batch).unwrap();

        for (i, (old, new)) in fields.iter().zip(new_fields.iter()).enumerate() {
            if i % 2 == 0 {
                continue;
            }
            let before = &text[old.positions[0].start..old.positions[0].end];
            let after = &new_doc.text[new.positions[0].start..new.positions[0].end];
            prop_assert_eq!(before, after);
        }
    }

    /// A single shrinking write at offset p shifts every later position
    /// left by exactly the shrink amount and leaves earlier ones alone.
    #[test]
    fn length_delta_propagates_exactly(
        (text, ranges) in text_with_ranges(),
        target in 0usize..10,
        shrink_to in 0usize..5,
    ) {
        prop_assume!(!ranges.is_empty());
        let target = target % ranges.len();
        let fields = one_field_per_range(&text, &ranges);
        let doc = Document::new(text.clone());

        let edited = fields.iter().nth(target).unwrap();
        let old_pos = edited.positions[0];
        prop_assume!(shrink_to < old_pos.len());
        let replacement = "x".repeat(shrink_to);
        let k = old_pos.len() - shrink_to;

        let batch = vec![FieldEdit { field_id: edited.id, new_value: replacement }];
        let (_, new_fields) = apply_edits(&doc, &fields, &batch).unwrap();

        for (old, new) in fields.iter().zip(new_fields.iter()) {
            if old.id == edited.id {
                continue;
            }
            let before = old.positions[0];
            let after = new.positions[0];
            if before.start >= old_pos.end {
                prop_assert_eq!(after.start, before.start - k);
                prop_assert_eq!(after.end, before.end - k);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }

    /// Concatenating segments reproduces the text exactly, for any set,
    /// including overlapping fields.
    #[test]
    fn segments_cover_everything((text, ranges) in text_with_ranges()) {
        let fields = one_field_per_range(&text, &ranges);
        prop_assert!(validate(&fields, &text).is_ok());

        let ownership = OwnershipMap::build(&fields);
        let rebuilt: String = segments(&text, &ownership).map(|s| s.text).collect();
        prop_assert_eq!(rebuilt, text);
    }

    /// Segment boundaries never split a segment into same-owner
    /// neighbors: consecutive segments always differ in owner.
    #[test]
    fn segments_are_maximal((text, ranges) in text_with_ranges()) {
        let fields = one_field_per_range(&text, &ranges);
        let ownership = OwnershipMap::build(&fields);

        let owners: Vec<_> = segments(&text, &ownership).map(|s| s.field_id).collect();
        for pair in owners.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
    }
}
