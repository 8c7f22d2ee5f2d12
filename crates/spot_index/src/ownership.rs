use fxhash::FxHashMap;

use spot_model::{FieldId, FieldSet};

/// Per-byte ownership lookup for every byte touched by a field range.
///
/// Built in field-set order; when ranges of different fields overlap the
/// later insertion overwrites, so the later field owns the contested
/// bytes. This is the single deterministic tie-break the whole render
/// path relies on.
#[derive(Debug, Clone, Default)]
pub struct OwnershipMap {
    by_byte: FxHashMap<usize, FieldId>,
}

impl OwnershipMap {
    /// Indexes every occurrence of every field.
    ///
    /// O(total field coverage) time and memory; lookups are O(1).
    pub fn build(fields: &FieldSet) -> Self {
        let mut by_byte =
            FxHashMap::with_capacity_and_hasher(coverage_hint(fields), Default::default());
        for field in fields {
            for pos in &field.positions {
                for byte in pos.start..pos.end {
                    by_byte.insert(byte, field.id);
                }
            }
        }
        Self { by_byte }
    }

    /// The field owning `byte`, if any.
    pub fn owner_at(&self, byte: usize) -> Option<FieldId> {
        self.by_byte.get(&byte).copied()
    }

    /// Number of bytes owned by some field.
    pub fn covered_bytes(&self) -> usize {
        self.by_byte.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_byte.is_empty()
    }
}

fn coverage_hint(fields: &FieldSet) -> usize {
    fields.iter().map(|f| f.coverage()).sum()
}
