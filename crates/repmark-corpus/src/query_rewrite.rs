//! Search-query regeneration for located records.
//!
//! Rewrites the value of an existing `youtubeQuery` field to the canonical
//! form derived from the record's display name. Records without a name or
//! without the field are returned untouched; the pass never inserts the
//! field into records that lack it.

use once_cell::sync::Lazy;
use regex::Regex;
use repmark_core::defaults::YOUTUBE_QUERY_FIELD;
use repmark_core::{FieldView, LocatedRecord};

/// Matches the full query literal: key prefix, current value, closing quote.
static QUERY_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"("{YOUTUBE_QUERY_FIELD}"\s*:\s*")((?:[^"\\]|\\.)*)(")"#
    ))
    .unwrap()
});

/// Returns the record span with its query value regenerated from the
/// display name, or a byte-identical copy when the record carries no
/// name or no query field.
pub fn rewrite_query(record: &LocatedRecord, view: &FieldView, suffix: &str) -> String {
    let (Some(name), Some(_)) = (view.name.as_deref(), view.youtube_query.as_deref()) else {
        return record.span.clone();
    };

    let new_query = canonical_query(name, suffix);
    QUERY_LITERAL
        .replace(&record.span, |caps: &regex::Captures| {
            format!("{}{}{}", &caps[1], new_query, &caps[3])
        })
        .into_owned()
}

/// Canonical query text: lowercased display name followed by the suffix.
pub fn canonical_query(name: &str, suffix: &str) -> String {
    format!("{} {}", name.to_lowercase(), suffix)
}
