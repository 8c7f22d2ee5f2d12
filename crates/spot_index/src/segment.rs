use serde::Serialize;

use spot_model::FieldId;

use crate::ownership::OwnershipMap;

/// A maximal run of characters owned by one field or by none.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub field_id: Option<FieldId>,
}

/// Lazy iterator over the segments of `text`.
///
/// Yields chunks in document order with no gaps: concatenating the
/// yielded `text` values reproduces the input exactly. Adjacent
/// characters with the same owner (including no owner) coalesce into one
/// chunk. Clone it to restart from the beginning.
pub fn segments<'a>(text: &'a str, ownership: &'a OwnershipMap) -> Segments<'a> {
    Segments {
        text,
        ownership,
        cursor: 0,
    }
}

#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    ownership: &'a OwnershipMap,
    cursor: usize,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.cursor >= self.text.len() {
            return None;
        }

        let start = self.cursor;
        // Ownership is keyed by byte, but runs extend one whole character
        // at a time; a char belongs to whoever owns its first byte.
        let owner = self.ownership.owner_at(start);
        let mut end = start;
        for (idx, ch) in self.text[start..].char_indices() {
            if self.ownership.owner_at(start + idx) != owner {
                break;
            }
            end = start + idx + ch.len_utf8();
        }

        self.cursor = end;
        Some(Segment {
            text: &self.text[start..end],
            field_id: owner,
        })
    }
}
