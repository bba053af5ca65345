//! Data model for records, field views, decisions, and pass reports.

use serde::{Deserialize, Serialize};

// =============================================================================
// RECORDS
// =============================================================================

/// One exercise record located in the corpus.
///
/// A record is an opaque text span `[start_offset, end_offset)` covering the
/// full `'<id>': '''…''',` construct. Records are rediscovered on every run
/// and never persisted independently; they exist only for the duration of
/// one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedRecord {
    /// Identifier token from the record header. Never modified by any pass.
    pub id: String,
    /// Starting byte offset of the span in the corpus (inclusive).
    pub start_offset: usize,
    /// Ending byte offset of the span in the corpus (exclusive).
    pub end_offset: usize,
    /// Full span text, header and fences included.
    pub span: String,
    /// Byte range of the body (between the fences) within `span`.
    pub body_start: usize,
    /// End of the body range within `span` (exclusive).
    pub body_end: usize,
}

impl LocatedRecord {
    /// The JSON-like body between the record's fences.
    pub fn body(&self) -> &str {
        &self.span[self.body_start..self.body_end]
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// Whether the span is empty (never true for a located record).
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

/// Read projection over a record's scalar fields.
///
/// Absence (`None`) is a valid state, distinct from any value: the
/// classification tiers must be able to tell "field missing" apart from
/// "field present with value X".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldView {
    /// `"category"` field, if present.
    pub category: Option<String>,
    /// `"name"` field, if present.
    pub name: Option<String>,
    /// `"tracksWeight"` field, if present.
    pub tracks_weight: Option<bool>,
    /// `"youtubeQuery"` field, if present.
    pub youtube_query: Option<String>,
    /// Whether the body carries an explicit `"weight"` field.
    pub has_weight_field: bool,
}

// =============================================================================
// DECISIONS
// =============================================================================

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The flag is already stored; the span must pass through byte-identical.
    AlreadyPresent,
    /// Store `tracksWeight: true`.
    SetTrue,
    /// Store `tracksWeight: false`.
    SetFalse,
}

impl Decision {
    /// Build a decision from a boolean verdict.
    pub fn from_verdict(verdict: bool) -> Self {
        if verdict {
            Decision::SetTrue
        } else {
            Decision::SetFalse
        }
    }

    /// The boolean to store, or `None` for [`Decision::AlreadyPresent`].
    pub fn verdict(&self) -> Option<bool> {
        match self {
            Decision::AlreadyPresent => None,
            Decision::SetTrue => Some(true),
            Decision::SetFalse => Some(false),
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::AlreadyPresent => write!(f, "already_present"),
            Decision::SetTrue => write!(f, "set_true"),
            Decision::SetFalse => write!(f, "set_false"),
        }
    }
}

// =============================================================================
// AUDIT REPORTS
// =============================================================================

/// One audit finding: a stored flag that disagrees with the rule set.
///
/// `current` is `None` when the record has no stored flag at all, so that an
/// empty audit report means the apply pass would change nothing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Discrepancy {
    pub id: String,
    pub current: Option<bool>,
    pub expected: bool,
}

// =============================================================================
// PASS SUMMARIES
// =============================================================================

/// A record the pass runner skipped, with the reason it was skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: String,
    pub reason: String,
}

/// Which rewrite pass is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassMode {
    /// Insert or correct the flag everywhere the rules call for it,
    /// respecting stored values (the idempotent default pass).
    Apply,
    /// Rewrite only the ids on the force lists, overriding stored values.
    ForceFix,
    /// Regenerate stored search queries from record names.
    RegenQueries,
}

impl std::fmt::Display for PassMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassMode::Apply => write!(f, "apply"),
            PassMode::ForceFix => write!(f, "force-fix"),
            PassMode::RegenQueries => write!(f, "regen-queries"),
        }
    }
}

/// Counters and skip reasons for one rewrite pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassSummary {
    pub mode: PassMode,
    /// Well-formed records discovered by the locator.
    pub records_seen: usize,
    /// Records whose span was rewritten.
    pub changed: usize,
    /// Records returned byte-identical.
    pub unchanged: usize,
    /// Records excluded from mutation, with reasons (malformed spans the
    /// locator rejected are counted here too).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRecord>,
}

impl PassSummary {
    /// Start an empty summary for `mode`.
    pub fn new(mode: PassMode) -> Self {
        Self {
            mode,
            records_seen: 0,
            changed: 0,
            unchanged: 0,
            skipped: Vec::new(),
        }
    }

    /// Record a skipped record with its reason.
    pub fn skip(&mut self, id: impl Into<String>, reason: impl Into<String>) {
        self.skipped.push(SkippedRecord {
            id: id.into(),
            reason: reason.into(),
        });
    }

    /// Whether the pass produced no changes at all.
    pub fn is_noop(&self) -> bool {
        self.changed == 0
    }
}
