//! Structured logging schema and field name constants for repmark.
//!
//! All crates use these constants for consistent structured logging fields,
//! so pass output can be filtered and aggregated by standardized field names
//! across every stage of a run.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Fatal configuration or I/O failure, run aborted before any write |
//! | WARN  | Record skipped (malformed span or field), pass continues |
//! | INFO  | Pass lifecycle (start, commit) and summary counts |
//! | DEBUG | Per-record decisions and rewrites |
//! | TRACE | Per-field extraction detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Component within the pipeline.
/// Values: "locator", "extractor", "classifier", "mutator", "audit", "pass"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "locate", "extract", "classify", "mutate", "commit"
pub const OPERATION: &str = "op";

/// Pass mode being run.
/// Values: "apply", "force-fix", "regen-queries", "audit"
pub const MODE: &str = "mode";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Record identifier being operated on.
pub const RECORD_ID: &str = "record_id";

/// Field name within a record ("tracksWeight", "youtubeQuery", …).
pub const FIELD: &str = "field";

/// Corpus file path.
pub const CORPUS_PATH: &str = "corpus_path";

// ─── Decision fields ───────────────────────────────────────────────────────

/// Classification decision for a record.
/// Values: "already_present", "set_true", "set_false"
pub const DECISION: &str = "decision";

/// Stored flag value found in a record.
pub const CURRENT: &str = "current";

/// Flag value the rule set derives for a record.
pub const EXPECTED: &str = "expected";

/// Reason a record was skipped or a run aborted.
pub const REASON: &str = "reason";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Well-formed records discovered by the locator.
pub const RECORDS_SEEN: &str = "records_seen";

/// Records whose span was rewritten.
pub const CHANGED: &str = "changed";

/// Records returned byte-identical.
pub const UNCHANGED: &str = "unchanged";

/// Records excluded from the pass.
pub const SKIPPED: &str = "skipped";

/// Audit findings reported.
pub const DISCREPANCIES: &str = "discrepancies";
