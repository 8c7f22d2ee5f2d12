use serde::{Deserialize, Serialize};

/// An immutable, versioned document text.
///
/// The version counter increases monotonically: every mutation produces a
/// new `Document` with `version + 1`, even when the replacement text is
/// byte-identical to what it replaced. Callers that hold a `(Document,
/// FieldSet)` pair must swap both together; field offsets are only valid
/// against the exact version they were produced for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// Full text content.
    pub text: String,
    /// Monotonic snapshot counter, starting at 0 for freshly loaded text.
    pub version: u64,
}

impl Document {
    /// Wraps freshly loaded text as version 0.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            version: 0,
        }
    }

    /// Produces the successor snapshot carrying `text`.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            version: self.version + 1,
        }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
