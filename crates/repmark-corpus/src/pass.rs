//! Pass orchestration: locate, classify, rewrite, reassemble.
//!
//! A pass walks the corpus once, rewrites record spans in discovery order,
//! and splices the results back between the untouched inter-record text.
//! Per-record failures are recovered by passing the span through
//! byte-identical and recording the skip; only configuration errors abort.

use repmark_core::{
    classify, classify_forced, LocatedRecord, PassMode, PassSummary, Result, RuleSet,
};
use tracing::{debug, info, warn};

use crate::audit::{self, AuditReport};
use crate::field_extraction;
use crate::locator;
use crate::mutation;
use crate::query_rewrite;

/// Result of one rewrite pass: the full corpus text plus its summary.
#[derive(Debug, Clone)]
pub struct PassOutcome {
    /// The rewritten corpus, ready to commit.
    pub corpus: String,
    pub summary: PassSummary,
}

impl PassOutcome {
    /// Whether the rewritten corpus is byte-identical to the input.
    pub fn is_noop(&self) -> bool {
        self.summary.is_noop()
    }
}

/// Runs one rewrite pass over the corpus text.
///
/// The rule set is validated before any text is examined, so a conflicting
/// override list aborts with nothing rewritten. Bytes outside record spans
/// always survive unchanged.
pub fn run_pass(corpus: &str, rules: &RuleSet, mode: PassMode) -> Result<PassOutcome> {
    rules.validate()?;

    let located = locator::locate(corpus);
    let mut summary = PassSummary::new(mode);
    summary.records_seen = located.records.len();

    for skipped in located.skipped {
        warn!(record_id = %skipped.id, reason = %skipped.reason, "Skipping malformed record");
        summary.skipped.push(skipped);
    }

    let mut rewritten = String::with_capacity(corpus.len() + located.records.len() * 32);
    let mut cursor = 0usize;

    for record in &located.records {
        rewritten.push_str(&corpus[cursor..record.start_offset]);
        match rewrite_record(record, rules, mode) {
            Ok(new_span) => {
                if new_span == record.span {
                    summary.unchanged += 1;
                } else {
                    debug!(record_id = %record.id, mode = %mode, "Rewrote record");
                    summary.changed += 1;
                }
                rewritten.push_str(&new_span);
            }
            Err(e) => {
                warn!(record_id = %record.id, reason = %e, "Skipping record");
                summary.skip(record.id.clone(), e.to_string());
                rewritten.push_str(&record.span);
            }
        }
        cursor = record.end_offset;
    }
    rewritten.push_str(&corpus[cursor..]);

    info!(
        mode = %mode,
        records_seen = summary.records_seen,
        changed = summary.changed,
        unchanged = summary.unchanged,
        skipped = summary.skipped.len(),
        "Pass complete"
    );

    Ok(PassOutcome {
        corpus: rewritten,
        summary,
    })
}

/// Runs the observational audit over the corpus text.
pub fn run_audit(corpus: &str, rules: &RuleSet, category: Option<&str>) -> Result<AuditReport> {
    rules.validate()?;

    let located = locator::locate(corpus);
    let mut report = audit::audit(&located.records, rules, category);
    for skipped in located.skipped {
        warn!(record_id = %skipped.id, reason = %skipped.reason, "Skipping malformed record");
        report.skipped.push(skipped);
    }

    info!(
        records_seen = report.records_seen,
        discrepancies = report.discrepancies.len(),
        skipped = report.skipped.len(),
        "Audit complete"
    );

    Ok(report)
}

fn rewrite_record(record: &LocatedRecord, rules: &RuleSet, mode: PassMode) -> Result<String> {
    let view = field_extraction::extract(record)?;
    let span = match mode {
        PassMode::Apply => {
            let decision = classify(&record.id, &view, rules);
            mutation::mutate(record, decision)
        }
        PassMode::ForceFix => match classify_forced(&record.id, &view, rules) {
            Some(decision) => mutation::mutate(record, decision),
            None => record.span.clone(),
        },
        PassMode::RegenQueries => query_rewrite::rewrite_query(record, &view, &rules.query_suffix),
    };
    Ok(span)
}
