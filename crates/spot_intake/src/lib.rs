//! Intake layer for AI-detected fields.
//! Accepts the untrusted wire shape a field detector produces, sanitizes
//! it, and builds a structurally valid [`FieldSet`] ready for indexing
//! and mutation.
//!
//! Detector output cannot be fully trusted: positions run past the end
//! of the text, split multi-byte characters, overlap each other, and
//! names arrive empty or padded with control characters. The policy here
//! is lenient per entry and strict in aggregate: a bad position or a
//! bad field is dropped and reported, never silently repaired, and the
//! resulting set always passes [`spot_model::validate`].
//!
//! Overlaps *between* fields are legal in the model (the index layer
//! tie-breaks them deterministically) but almost always detection noise,
//! so they are reported as hints for the human confirmation step rather
//! than resolved here.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, info, warn};
use uuid::Uuid;

use spot_model::{Field, FieldId, FieldPosition, FieldSet, FieldType, validate};

/// Runtime configuration for intake behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Whether to strip ASCII control characters from field names.
    pub strip_control_chars: bool,
    /// Names longer than this many bytes drop the field.
    pub max_name_bytes: usize,
    /// Upper bound on confirmed fields; None means unbounded.
    pub max_fields: Option<usize>,
    /// Namespace UUID used to deterministically derive field ids.
    pub field_id_namespace: Uuid,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            strip_control_chars: true,
            max_name_bytes: 200,
            max_fields: None,
            field_id_namespace: Uuid::NAMESPACE_OID,
        }
    }
}

/// One field as the detector reported it. Nothing here is trusted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectedField {
    pub name: String,
    /// Open category tag; unknown tags pass through unchanged.
    pub field_type: String,
    /// Candidate `(start, end)` byte ranges into the document text.
    pub positions: Vec<(usize, usize)>,
    pub current_value: Option<String>,
    /// Free-form detector metadata, preserved on the confirmed field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Value>,
}

/// The full detector report for one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetectionReport {
    pub fields: Vec<DetectedField>,
    /// Timestamp supplied by the detector; defaults to now when absent.
    pub detected_at: Option<DateTime<Utc>>,
}

/// Why a detected field or one of its positions was discarded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DropReason {
    /// Name empty (or empty after sanitization).
    EmptyName,
    NameTooLong { max: usize },
    /// Empty range, range past the text end, or offset inside a
    /// multi-byte character.
    InvalidPosition { start: usize, end: usize },
    /// Position overlaps an earlier position of the same field; the
    /// earlier one is kept.
    SelfOverlap { start: usize, end: usize },
    /// Every candidate position was invalid.
    NoUsablePositions,
}

/// One discarded field or position, for the confirmation UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DroppedEntry {
    pub field_name: String,
    pub reason: DropReason,
}

/// A byte range claimed by two different confirmed fields. Legal, but
/// worth a human look before the template is saved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OverlapHint {
    pub first: FieldId,
    pub second: FieldId,
    pub start: usize,
    pub end: usize,
}

/// Confirmed intake result: a valid field set plus diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub fields: FieldSet,
    pub dropped: Vec<DroppedEntry>,
    pub overlaps: Vec<OverlapHint>,
    pub detected_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("document text is empty")]
    EmptyDocument,
    #[error("detector reported {got} fields, limit is {limit}")]
    FieldLimitExceeded { limit: usize, got: usize },
}

/// Sanitizes a detector report into a valid field set.
///
/// Per-entry failures drop the entry and continue; only an empty
/// document or a blown field limit fails the whole intake.
pub fn confirm_fields(
    text: &str,
    report: DetectionReport,
    cfg: &IntakeConfig,
) -> Result<IntakeOutcome, IntakeError> {
    let started = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "spot_intake.confirm",
        detected = report.fields.len(),
        text_len = text.len()
    );
    let _guard = span.enter();

    match confirm_inner(text, report, cfg) {
        Ok(outcome) => {
            info!(
                kept = outcome.fields.len(),
                dropped = outcome.dropped.len(),
                overlaps = outcome.overlaps.len(),
                elapsed_micros = started.elapsed().as_micros() as u64,
                "intake_success"
            );
            Ok(outcome)
        }
        Err(err) => {
            warn!(error = %err, "intake_failure");
            Err(err)
        }
    }
}

fn confirm_inner(
    text: &str,
    report: DetectionReport,
    cfg: &IntakeConfig,
) -> Result<IntakeOutcome, IntakeError> {
    if text.trim().is_empty() {
        return Err(IntakeError::EmptyDocument);
    }
    if let Some(limit) = cfg.max_fields {
        if report.fields.len() > limit {
            return Err(IntakeError::FieldLimitExceeded {
                limit,
                got: report.fields.len(),
            });
        }
    }

    let mut fields = FieldSet::new();
    let mut dropped = Vec::new();

    for (index, detected) in report.fields.into_iter().enumerate() {
        if let Some(field) = sanitize_field(text, detected, index, cfg, &mut dropped) {
            fields.add(field);
        }
    }

    let overlaps = cross_field_overlaps(&fields);

    // The contract of this layer: whatever survives sanitization always
    // validates. Anything else is a bug in the sanitizer itself.
    debug_assert!(validate(&fields, text).is_ok());

    Ok(IntakeOutcome {
        fields,
        dropped,
        overlaps,
        detected_at: report.detected_at.unwrap_or_else(Utc::now),
    })
}

fn sanitize_field(
    text: &str,
    detected: DetectedField,
    index: usize,
    cfg: &IntakeConfig,
    dropped: &mut Vec<DroppedEntry>,
) -> Option<Field> {
    let raw_name = detected.name;
    let name = sanitize_name(&raw_name, cfg.strip_control_chars);
    if name.is_empty() {
        warn!(field = %raw_name, "field_dropped_empty_name");
        dropped.push(DroppedEntry {
            field_name: raw_name,
            reason: DropReason::EmptyName,
        });
        return None;
    }
    if name.len() > cfg.max_name_bytes {
        warn!(field = %name, max = cfg.max_name_bytes, "field_dropped_name_too_long");
        dropped.push(DroppedEntry {
            field_name: name,
            reason: DropReason::NameTooLong {
                max: cfg.max_name_bytes,
            },
        });
        return None;
    }

    let mut positions: Vec<FieldPosition> = Vec::with_capacity(detected.positions.len());
    let mut candidates = detected.positions;
    candidates.sort_unstable();
    for (start, end) in candidates {
        if start >= end
            || end > text.len()
            || !text.is_char_boundary(start)
            || !text.is_char_boundary(end)
        {
            warn!(field = %name, start, end, "position_dropped_invalid");
            dropped.push(DroppedEntry {
                field_name: name.clone(),
                reason: DropReason::InvalidPosition { start, end },
            });
            continue;
        }
        if let Some(prev) = positions.last() {
            if start < prev.end {
                warn!(field = %name, start, end, "position_dropped_self_overlap");
                dropped.push(DroppedEntry {
                    field_name: name.clone(),
                    reason: DropReason::SelfOverlap { start, end },
                });
                continue;
            }
        }
        positions.push(FieldPosition { start, end });
    }

    if positions.is_empty() {
        warn!(field = %name, "field_dropped_no_usable_positions");
        dropped.push(DroppedEntry {
            field_name: name,
            reason: DropReason::NoUsablePositions,
        });
        return None;
    }

    Some(Field {
        id: derive_field_id(cfg, &name, index),
        name,
        field_type: FieldType::new(detected.field_type),
        positions,
        current_value: detected.current_value,
        attributes: detected.attributes,
    })
}

/// Deterministic id: the same report confirmed twice yields the same
/// ids, which keeps retries and test fixtures stable.
fn derive_field_id(cfg: &IntakeConfig, name: &str, index: usize) -> FieldId {
    let mut material = Vec::with_capacity(name.len() + 9);
    material.extend_from_slice(name.as_bytes());
    material.push(0);
    material.extend_from_slice(&index.to_be_bytes());
    FieldId(Uuid::new_v5(&cfg.field_id_namespace, &material))
}

fn sanitize_name(raw: &str, strip_control: bool) -> String {
    let filtered: String = if strip_control {
        raw.chars().filter(|c| !c.is_control()).collect()
    } else {
        raw.to_string()
    };
    filtered.trim().to_string()
}

/// Pairwise overlap scan across fields, in position order. Quadratic in
/// the worst case but bounded by actual collisions in practice.
fn cross_field_overlaps(fields: &FieldSet) -> Vec<OverlapHint> {
    let mut spans: Vec<(FieldPosition, FieldId)> = Vec::new();
    for field in fields {
        for pos in &field.positions {
            spans.push((*pos, field.id));
        }
    }
    spans.sort_unstable_by_key(|(pos, _)| (pos.start, pos.end));

    let mut hints = Vec::new();
    for (i, (pos, id)) in spans.iter().enumerate() {
        for (other, other_id) in spans[i + 1..].iter() {
            if other.start >= pos.end {
                break;
            }
            if id != other_id {
                hints.push(OverlapHint {
                    first: *id,
                    second: *other_id,
                    start: other.start,
                    end: pos.end.min(other.end),
                });
            }
        }
    }
    hints
}
