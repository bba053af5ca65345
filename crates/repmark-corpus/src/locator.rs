//! Record location in a raw corpus.
//!
//! A record is recognized by its fence grammar:
//!
//! ```text
//! 'exercise_id': '''
//! { ...json-like body... }
//! ''',
//! ```
//!
//! i.e. a single-quoted identifier token, a colon, an opening `'''` fence, a
//! body, a matching closing fence, and a trailing comma. This is tolerant
//! scanning over an append-only text blob, not strict parsing: malformed
//! spans are stepped over and reported in the skip list, never fatal, and the
//! scan resumes right after the offending opening fence so one bad record
//! cannot hide the rest of the corpus.

use once_cell::sync::Lazy;
use regex::Regex;

use repmark_core::models::{LocatedRecord, SkippedRecord};

/// Opening grammar: identifier token, colon delimiter, opening fence.
static RECORD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"'([a-z0-9_]+)':\s*'''").unwrap());

const FENCE: &str = "'''";
const SEPARATOR: char = ',';

/// Outcome of scanning a corpus for records.
#[derive(Debug, Clone, Default)]
pub struct LocateOutcome {
    /// Well-formed records in left-to-right order, non-overlapping, covering
    /// every well-formed record exactly once.
    pub records: Vec<LocatedRecord>,
    /// Malformed spans the scan stepped over, with reasons.
    pub skipped: Vec<SkippedRecord>,
}

/// Scan `corpus` for fenced records. Read-only; no side effects.
pub fn locate(corpus: &str) -> LocateOutcome {
    let mut outcome = LocateOutcome::default();
    let mut cursor = 0;

    while let Some(caps) = RECORD_OPEN.captures(&corpus[cursor..]) {
        let open = caps.get(0).expect("regex match has a whole-match group");
        let id = caps.get(1).expect("regex match has an id group").as_str();
        let start_offset = cursor + open.start();
        let body_start = cursor + open.end();

        let Some(fence_rel) = corpus[body_start..].find(FENCE) else {
            outcome.skipped.push(SkippedRecord {
                id: id.to_string(),
                reason: "unterminated fence".to_string(),
            });
            cursor = body_start;
            continue;
        };
        let body_end = body_start + fence_rel;
        let after_fence = body_end + FENCE.len();

        if !corpus[after_fence..].starts_with(SEPARATOR) {
            outcome.skipped.push(SkippedRecord {
                id: id.to_string(),
                reason: "closing fence without trailing separator".to_string(),
            });
            cursor = body_start;
            continue;
        }

        let end_offset = after_fence + SEPARATOR.len_utf8();
        outcome.records.push(LocatedRecord {
            id: id.to_string(),
            start_offset,
            end_offset,
            span: corpus[start_offset..end_offset].to_string(),
            body_start: body_start - start_offset,
            body_end: body_end - start_offset,
        });
        cursor = end_offset;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RECORDS: &str = r#"
final exercises = {
  'goblet_squat': '''
{
  "id": "goblet_squat",
  "category": "strength"
}
''',
  'plank': '''
{
  "id": "plank",
  "category": "core"
}
''',
};
"#;

    #[test]
    fn test_locates_records_in_order() {
        let outcome = locate(TWO_RECORDS);
        assert!(outcome.skipped.is_empty());
        let ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["goblet_squat", "plank"]);
    }

    #[test]
    fn test_spans_are_exact_and_non_overlapping() {
        let outcome = locate(TWO_RECORDS);
        let mut last_end = 0;
        for record in &outcome.records {
            assert!(record.start_offset >= last_end, "spans must not overlap");
            assert_eq!(
                &TWO_RECORDS[record.start_offset..record.end_offset],
                record.span
            );
            assert!(record.span.starts_with(&format!("'{}':", record.id)));
            assert!(record.span.ends_with("''',"));
            last_end = record.end_offset;
        }
    }

    #[test]
    fn test_body_excludes_fences() {
        let outcome = locate(TWO_RECORDS);
        let body = outcome.records[0].body();
        assert!(body.contains("\"category\": \"strength\""));
        assert!(!body.contains(FENCE));
    }

    #[test]
    fn test_zero_records() {
        let outcome = locate("no records in here");
        assert!(outcome.records.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_unterminated_fence_is_skipped_not_fatal() {
        let corpus = "'broken': '''\n{ \"id\": \"broken\" }\n";
        let outcome = locate(corpus);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].id, "broken");
        assert_eq!(outcome.skipped[0].reason, "unterminated fence");
    }

    #[test]
    fn test_bad_record_does_not_hide_later_ones() {
        let corpus = "\
'broken': '''
{ \"id\": \"broken\" }
'plank': '''
{
  \"id\": \"plank\"
}
''',
";
        let outcome = locate(corpus);
        // The scan resumes after broken's opening fence and still finds plank.
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "plank");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].id, "broken");
    }

    #[test]
    fn test_missing_separator_is_skipped() {
        let corpus = "'no_comma': '''\n{ \"id\": \"no_comma\" }\n'''\n'ok': '''\n{}\n''',";
        let outcome = locate(corpus);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "ok");
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(
            outcome.skipped[0].reason,
            "closing fence without trailing separator"
        );
    }

    #[test]
    fn test_id_charset_is_restricted() {
        // Uppercase and hyphenated tokens are not record headers.
        let corpus = "'Goblet': '''\n{}\n''',\n'ok_2': '''\n{}\n''',";
        let outcome = locate(corpus);
        let ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["ok_2"]);
    }

    #[test]
    fn test_apostrophe_in_body_is_tolerated() {
        let corpus = "'farmers_walk': '''\n{\n  \"name\": \"Farmer's Walk\"\n}\n''',";
        let outcome = locate(corpus);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].body().contains("Farmer's Walk"));
    }
}
