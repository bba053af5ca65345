//! Discrepancy reporting: re-checks stored flags against the rule set.
//!
//! The audit pass never trusts a stored flag. It re-derives the expected
//! verdict for every record with the idempotence guard disabled, so stale
//! values written by earlier tooling surface instead of being waved through.
//! Purely observational; no record text is produced.

use repmark_core::{expected_verdict, Discrepancy, LocatedRecord, RuleSet, SkippedRecord};
use serde::Serialize;
use tracing::{debug, warn};

use crate::field_extraction;

/// Report produced by one audit run.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    /// Records examined against the rule set (after any category filter).
    pub records_seen: usize,
    /// Stored flags that disagree with the rules, including records missing
    /// the flag entirely (`current: None`).
    pub discrepancies: Vec<Discrepancy>,
    /// Records whose fields could not be extracted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedRecord>,
}

impl AuditReport {
    /// Whether an apply pass over the same records would change nothing.
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Re-derives the expected flag for every record and reports disagreements.
///
/// `category` restricts the audit to records whose `"category"` field equals
/// the filter exactly; records outside it (or without a category) are passed
/// over without being counted.
pub fn audit(records: &[LocatedRecord], rules: &RuleSet, category: Option<&str>) -> AuditReport {
    let mut report = AuditReport {
        records_seen: 0,
        discrepancies: Vec::new(),
        skipped: Vec::new(),
    };

    for record in records {
        let view = match field_extraction::extract(record) {
            Ok(view) => view,
            Err(e) => {
                warn!(record_id = %record.id, reason = %e, "Skipping unauditable record");
                report.skipped.push(SkippedRecord {
                    id: record.id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        if let Some(filter) = category {
            if view.category.as_deref() != Some(filter) {
                continue;
            }
        }

        report.records_seen += 1;
        let expected = expected_verdict(&record.id, &view, rules);
        if view.tracks_weight != Some(expected) {
            debug!(
                record_id = %record.id,
                current = ?view.tracks_weight,
                expected,
                "Stored flag disagrees with rule set"
            );
            report.discrepancies.push(Discrepancy {
                id: record.id.clone(),
                current: view.tracks_weight,
                expected,
            });
        }
    }

    report
}
