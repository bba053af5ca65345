//! Tolerant field extraction from record bodies.
//!
//! Each target field is captured by a narrow pattern: the field-name token in
//! double quotes, a colon, then a scalar literal (quoted string or boolean).
//! The value part of every pattern is optional, which is what separates the
//! two non-success states: no match at all means the field is absent (a valid
//! state, `None` in the view), while a match with the value group missing
//! means the field token is there but nothing parseable follows — a
//! [`MalformedField`](repmark_core::Error::MalformedField) error.
//!
//! String values are captured in their raw escaped form; bodies are never
//! required to be valid JSON as a whole.

use once_cell::sync::Lazy;
use regex::Regex;

use repmark_core::defaults::{TRACKS_WEIGHT_FIELD, WEIGHT_FIELD, YOUTUBE_QUERY_FIELD};
use repmark_core::error::{Error, Result};
use repmark_core::models::{FieldView, LocatedRecord};

static CATEGORY_VALUE: Lazy<Regex> = Lazy::new(|| string_value_pattern("category"));
static NAME_VALUE: Lazy<Regex> = Lazy::new(|| string_value_pattern("name"));
static QUERY_VALUE: Lazy<Regex> = Lazy::new(|| string_value_pattern(YOUTUBE_QUERY_FIELD));

static FLAG_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#""{TRACKS_WEIGHT_FIELD}"\s*:\s*(?:(true|false)\b)?"#
    ))
    .unwrap()
});

static FLAG_TOKEN: Lazy<Regex> = Lazy::new(|| field_token_pattern(TRACKS_WEIGHT_FIELD));
static QUERY_TOKEN: Lazy<Regex> = Lazy::new(|| field_token_pattern(YOUTUBE_QUERY_FIELD));

/// The weight-marker check is case-insensitive; the legacy passes matched it
/// against a lowercased body.
static WEIGHT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r#"(?i)"{WEIGHT_FIELD}"\s*:"#)).unwrap());

fn string_value_pattern(field: &str) -> Regex {
    // Captures the raw escaped text between the value quotes; an unescaped
    // quote ends the literal.
    Regex::new(&format!(r#""{field}"\s*:\s*(?:"((?:[^"\\]|\\.)*)")?"#)).unwrap()
}

fn field_token_pattern(field: &str) -> Regex {
    Regex::new(&format!(r#""{field}"\s*:"#)).unwrap()
}

/// Project a record's scalar fields into a [`FieldView`].
///
/// Extraction is all-or-nothing: any unparseable or duplicated target field
/// fails the whole record, which downstream passes then leave untouched. The
/// duplicate check covers the two fields passes rewrite — a record carrying
/// `tracksWeight` or `youtubeQuery` twice has no authoritative occurrence to
/// correct.
pub fn extract(record: &LocatedRecord) -> Result<FieldView> {
    let body = record.body();
    let id = record.id.as_str();

    reject_duplicates(body, TRACKS_WEIGHT_FIELD, id, &FLAG_TOKEN)?;
    reject_duplicates(body, YOUTUBE_QUERY_FIELD, id, &QUERY_TOKEN)?;

    Ok(FieldView {
        category: string_field(body, "category", id, &CATEGORY_VALUE)?,
        name: string_field(body, "name", id, &NAME_VALUE)?,
        tracks_weight: bool_field(body, TRACKS_WEIGHT_FIELD, id, &FLAG_VALUE)?,
        youtube_query: string_field(body, YOUTUBE_QUERY_FIELD, id, &QUERY_VALUE)?,
        has_weight_field: WEIGHT_TOKEN.is_match(body),
    })
}

fn string_field(body: &str, field: &str, id: &str, pattern: &Regex) -> Result<Option<String>> {
    let Some(caps) = pattern.captures(body) else {
        return Ok(None);
    };
    match caps.get(1) {
        Some(value) => Ok(Some(value.as_str().to_string())),
        None => Err(malformed(id, field, "no string literal after the colon")),
    }
}

fn bool_field(body: &str, field: &str, id: &str, pattern: &Regex) -> Result<Option<bool>> {
    let Some(caps) = pattern.captures(body) else {
        return Ok(None);
    };
    match caps.get(1) {
        Some(value) => Ok(Some(value.as_str() == "true")),
        None => Err(malformed(id, field, "no boolean literal after the colon")),
    }
}

fn reject_duplicates(body: &str, field: &str, id: &str, token: &Regex) -> Result<()> {
    if token.find_iter(body).count() > 1 {
        return Err(Error::DuplicateField {
            id: id.to_string(),
            field: field.to_string(),
        });
    }
    Ok(())
}

fn malformed(id: &str, field: &str, reason: &str) -> Error {
    Error::MalformedField {
        id: id.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
