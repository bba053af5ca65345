//! Span mutation: inserting or correcting the weight-tracking flag.
//!
//! Mutation produces a new span for exactly one record; splicing spans back
//! into the corpus is the pass runner's job. The contract that matters here
//! is byte fidelity: an [`AlreadyPresent`](Decision::AlreadyPresent) decision
//! returns the span unchanged, and every line the rewrite does not touch is
//! reproduced exactly.

use once_cell::sync::Lazy;
use regex::Regex;

use repmark_core::defaults::{FALLBACK_INDENT, TRACKS_WEIGHT_FIELD};
use repmark_core::models::{Decision, LocatedRecord};

const FENCE: &str = "'''";

static FLAG_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"("{TRACKS_WEIGHT_FIELD}"\s*:\s*)(true|false)"#
    ))
    .unwrap()
});

/// Rewrite one record span according to `decision`.
///
/// A stored flag with a different value is replaced in place (the force-fix
/// correction path); a missing flag is inserted as a new field line
/// immediately before the record's closing-brace line. A record never
/// contains the flag twice after mutation.
pub fn mutate(record: &LocatedRecord, decision: Decision) -> String {
    let Some(verdict) = decision.verdict() else {
        return record.span.clone();
    };

    if FLAG_LITERAL.is_match(&record.span) {
        correct_in_place(&record.span, verdict)
    } else {
        insert_flag(record, verdict)
    }
}

/// Replace the stored boolean literal, leaving the rest of the span intact.
fn correct_in_place(span: &str, verdict: bool) -> String {
    FLAG_LITERAL
        .replace(span, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], verdict)
        })
        .into_owned()
}

/// Insert a flag line before the closing-brace line, repairing the previous
/// line's trailing comma if it is missing.
fn insert_flag(record: &LocatedRecord, verdict: bool) -> String {
    // split('\n') rather than lines(): the rejoin must be byte-exact for
    // every line the insert does not touch.
    let mut lines: Vec<String> = record.span.split('\n').map(str::to_string).collect();

    let Some(close_idx) = closing_brace_line(&lines) else {
        return insert_flag_inline(record, verdict);
    };

    if close_idx > 0 {
        let prev = lines[close_idx - 1].trim_end();
        if !prev.is_empty() && !prev.ends_with(',') && !prev.ends_with('{') {
            lines[close_idx - 1] = format!("{prev},");
        }
    }

    let indent = infer_indent(&lines);
    lines.insert(
        close_idx,
        format!("{indent}\"{TRACKS_WEIGHT_FIELD}\": {verdict}"),
    );
    lines.join("\n")
}

/// The record body's final closing-brace line: the last line containing `}`
/// that is not a fence line.
fn closing_brace_line(lines: &[String]) -> Option<usize> {
    lines
        .iter()
        .rposition(|line| line.contains('}') && !line.contains(FENCE))
}

/// Leading whitespace of the first indented field line in the body, falling
/// back to two spaces when the body has none.
fn infer_indent(lines: &[String]) -> String {
    for line in lines {
        let trimmed = line.trim_start();
        if trimmed.starts_with('"') && trimmed.len() < line.len() {
            return line[..line.len() - trimmed.len()].to_string();
        }
    }
    FALLBACK_INDENT.to_string()
}

/// Insertion for bodies whose closing brace shares a line with a fence
/// (single-line records): splice the field in before the final `}`.
fn insert_flag_inline(record: &LocatedRecord, verdict: bool) -> String {
    let span = &record.span;
    let body = record.body();
    let Some(brace_rel) = body.rfind('}') else {
        // No object to extend; leave the span untouched.
        return span.clone();
    };
    let before_brace = body[..brace_rel].trim_end();
    let separator = if before_brace.is_empty() || before_brace.ends_with('{') {
        ""
    } else {
        ", "
    };
    // Splice right after the last non-whitespace byte so the whitespace run
    // before the brace stays where it was.
    let at = record.body_start + before_brace.len();
    format!(
        "{}{}\"{}\": {}{}",
        &span[..at],
        separator,
        TRACKS_WEIGHT_FIELD,
        verdict,
        &span[at..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(span: &str) -> LocatedRecord {
        let body_start = span.find(FENCE).unwrap() + FENCE.len();
        let body_end = span.rfind(FENCE).unwrap();
        LocatedRecord {
            id: "test_record".to_string(),
            start_offset: 0,
            end_offset: span.len(),
            span: span.to_string(),
            body_start,
            body_end,
        }
    }

    const NO_FLAG: &str = "'test_record': '''\n{\n  \"id\": \"test_record\",\n  \"category\": \"strength\"\n}\n''',";

    #[test]
    fn test_already_present_is_byte_identical() {
        let rec = record("'test_record': '''\n{\n  \"tracksWeight\": true\n}\n''',");
        assert_eq!(mutate(&rec, Decision::AlreadyPresent), rec.span);
    }

    #[test]
    fn test_insert_repairs_missing_comma() {
        let rec = record(NO_FLAG);
        let out = mutate(&rec, Decision::SetTrue);
        assert_eq!(
            out,
            "'test_record': '''\n{\n  \"id\": \"test_record\",\n  \"category\": \"strength\",\n  \"tracksWeight\": true\n}\n''',"
        );
    }

    #[test]
    fn test_insert_keeps_existing_comma() {
        let rec = record("'test_record': '''\n{\n  \"id\": \"test_record\",\n}\n''',");
        let out = mutate(&rec, Decision::SetFalse);
        assert_eq!(
            out,
            "'test_record': '''\n{\n  \"id\": \"test_record\",\n  \"tracksWeight\": false\n}\n''',"
        );
    }

    #[test]
    fn test_insert_infers_four_space_indent() {
        let rec = record("'test_record': '''\n{\n    \"id\": \"test_record\"\n}\n''',");
        let out = mutate(&rec, Decision::SetTrue);
        assert!(out.contains("\n    \"tracksWeight\": true\n"));
    }

    #[test]
    fn test_insert_falls_back_to_two_spaces() {
        let rec = record("'test_record': '''\n{\n}\n''',");
        let out = mutate(&rec, Decision::SetTrue);
        assert_eq!(out, "'test_record': '''\n{\n  \"tracksWeight\": true\n}\n''',");
    }

    #[test]
    fn test_empty_object_gets_no_comma() {
        let rec = record("'test_record': '''\n{\n}\n''',");
        let out = mutate(&rec, Decision::SetTrue);
        assert!(!out.contains("{,"));
    }

    #[test]
    fn test_correction_flips_literal_only() {
        let span = "'test_record': '''\n{\n  \"name\": \"Plank\",\n  \"tracksWeight\": true\n}\n''',";
        let rec = record(span);
        let out = mutate(&rec, Decision::SetFalse);
        assert_eq!(out, span.replace("true", "false"));
        // Flipping back restores the original bytes.
        let rec_back = record(&out);
        assert_eq!(mutate(&rec_back, Decision::SetTrue), span);
    }

    #[test]
    fn test_correction_with_same_value_is_identical() {
        let span = "'test_record': '''\n{\n  \"tracksWeight\": false\n}\n''',";
        let rec = record(span);
        assert_eq!(mutate(&rec, Decision::SetFalse), span);
    }

    #[test]
    fn test_single_line_record_inline_insert() {
        let rec = record("'test_record': '''{\"id\": \"test_record\"}''',");
        let out = mutate(&rec, Decision::SetTrue);
        assert_eq!(
            out,
            "'test_record': '''{\"id\": \"test_record\", \"tracksWeight\": true}''',"
        );
    }

    #[test]
    fn test_single_line_empty_object() {
        let rec = record("'test_record': '''{}''',");
        let out = mutate(&rec, Decision::SetTrue);
        assert_eq!(out, "'test_record': '''{\"tracksWeight\": true}''',");
    }

    #[test]
    fn test_brace_on_fence_line_uses_inline_path() {
        let rec = record("'test_record': '''\n{\n  \"id\": \"test_record\"\n}''',");
        let out = mutate(&rec, Decision::SetFalse);
        assert_eq!(
            out,
            "'test_record': '''\n{\n  \"id\": \"test_record\", \"tracksWeight\": false\n}''',"
        );
    }

    #[test]
    fn test_no_object_in_body_is_untouched() {
        let rec = record("'test_record': '''just text''',");
        assert_eq!(mutate(&rec, Decision::SetTrue), rec.span);
    }
}
