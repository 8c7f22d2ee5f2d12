//! Range index over a field set: per-byte ownership plus a lazy segment
//! iterator for renderers.
//!
//! [`OwnershipMap::build`] answers "which field owns byte i" for every
//! byte touched by any field range. [`segments`] turns that into maximal
//! runs of same-owner text covering the whole string, in order, with no
//! gaps: the one sequence any highlighting view consumes.
//!
//! ## Tie-break
//!
//! Positions are inserted in field-set order and later fields win on
//! overlap. Given the same set, the winner is identical across runs;
//! overlapping detections are a data-quality problem surfaced at intake,
//! not an error mid-render.
//!
//! ## Scaling
//!
//! The dense per-byte map costs O(total field coverage) memory and makes
//! segmenting O(text length) with constant-time lookups. For very large
//! documents or very many fields a sorted-range binary search or
//! interval tree should replace it; at template sizes the dense map wins
//! on simplicity.

mod ownership;
mod segment;

pub use crate::ownership::OwnershipMap;
pub use crate::segment::{Segment, Segments, segments};
