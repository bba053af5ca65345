//! Rule-set configuration for classification passes.
//!
//! A [`RuleSet`] bundles every knob the classification tiers consult: the
//! no-weight category list, the lexical no-weight patterns, the
//! weighted-variant markers, the two curated force lists, and the suffix used
//! when regenerating search queries. Every field defaults to the built-in
//! tables in [`crate::defaults`]; a JSON file supplied via `--config` may
//! override any subset of them.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};

/// Classification rules plus override lists.
///
/// # Example
/// ```
/// use repmark_core::RuleSet;
///
/// let rules = RuleSet::default();
/// assert!(rules.no_weight_categories.contains("warmup"));
/// assert!(rules.force_true.contains("goblet_squat"));
/// rules.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Categories whose records never track weight (tier 3).
    pub no_weight_categories: HashSet<String>,

    /// Substrings of an id or name that mark a record as no-weight (tier 4).
    pub no_weight_name_patterns: HashSet<String>,

    /// Substrings of an id or name that mark an explicitly weighted
    /// variant (tier 5).
    pub weighted_variant_markers: HashSet<String>,

    /// Ids curated as weight-tracking, overriding every heuristic tier.
    pub force_true: HashSet<String>,

    /// Ids curated as never weight-tracking, overriding every heuristic tier.
    pub force_false: HashSet<String>,

    /// Suffix appended to a lowercased record name when regenerating the
    /// stored search query.
    pub query_suffix: String,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            no_weight_categories: string_set(defaults::NO_WEIGHT_CATEGORIES),
            no_weight_name_patterns: string_set(defaults::NO_WEIGHT_NAME_PATTERNS),
            weighted_variant_markers: string_set(defaults::WEIGHTED_VARIANT_MARKERS),
            force_true: string_set(defaults::FORCE_TRUE_IDS),
            force_false: string_set(defaults::FORCE_FALSE_IDS),
            query_suffix: defaults::QUERY_SUFFIX.to_string(),
        }
    }
}

impl RuleSet {
    /// Load a rule set from a JSON file, falling back to the built-in tables
    /// for any field the file omits.
    ///
    /// The result is validated before it is returned, so a conflicting
    /// override list aborts here, before any pass runs.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let rules: RuleSet = serde_json::from_str(&text)?;
        rules.validate()?;
        tracing::debug!(
            config_path = %path.display(),
            force_true = rules.force_true.len(),
            force_false = rules.force_false.len(),
            "Loaded rule overrides"
        );
        Ok(rules)
    }

    /// Check the invariant that the force lists are disjoint.
    ///
    /// An id appearing in both lists has no single authoritative verdict, so
    /// this is a fatal configuration error rather than something a pass could
    /// resolve per record.
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.force_true.intersection(&self.force_false).next() {
            return Err(Error::ConflictingOverride(id.clone()));
        }
        Ok(())
    }

    /// Whether `id` appears on either force list.
    pub fn is_forced(&self, id: &str) -> bool {
        self.force_true.contains(id) || self.force_false.contains(id)
    }
}

fn string_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_builtin_tables() {
        let rules = RuleSet::default();
        assert_eq!(
            rules.no_weight_categories.len(),
            defaults::NO_WEIGHT_CATEGORIES.len()
        );
        assert_eq!(
            rules.no_weight_name_patterns.len(),
            defaults::NO_WEIGHT_NAME_PATTERNS.len()
        );
        assert_eq!(rules.force_true.len(), defaults::FORCE_TRUE_IDS.len());
        assert_eq!(rules.force_false.len(), defaults::FORCE_FALSE_IDS.len());
        assert_eq!(rules.query_suffix, defaults::QUERY_SUFFIX);
        assert!(rules.weighted_variant_markers.contains("weighted_"));
    }

    #[test]
    fn test_default_validates() {
        RuleSet::default().validate().unwrap();
    }

    #[test]
    fn test_conflicting_override_is_fatal() {
        let mut rules = RuleSet::default();
        rules.force_true.insert("dips".to_string());
        let err = rules.validate().unwrap_err();
        match err {
            Error::ConflictingOverride(id) => assert_eq!(id, "dips"),
            other => panic!("expected ConflictingOverride, got {other:?}"),
        }
    }

    #[test]
    fn test_is_forced() {
        let rules = RuleSet::default();
        assert!(rules.is_forced("goblet_squat"));
        assert!(rules.is_forced("plank"));
        assert!(!rules.is_forced("mystery_exercise"));
    }

    #[test]
    fn test_partial_json_keeps_defaults_for_omitted_fields() {
        let rules: RuleSet =
            serde_json::from_str(r#"{"query_suffix": "basketball"}"#).unwrap();
        assert_eq!(rules.query_suffix, "basketball");
        // Untouched fields keep the built-in tables.
        assert!(rules.no_weight_categories.contains("conditioning"));
        assert!(rules.force_false.contains("wall_sit"));
    }

    #[test]
    fn test_json_overrides_replace_whole_field() {
        let rules: RuleSet =
            serde_json::from_str(r#"{"force_true": ["front_squat"]}"#).unwrap();
        assert_eq!(rules.force_true.len(), 1);
        assert!(rules.force_true.contains("front_squat"));
        // Defaults for force_true are gone, other lists untouched.
        assert!(!rules.force_true.contains("goblet_squat"));
        assert!(rules.force_false.contains("plank"));
    }

    #[test]
    fn test_from_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"no_weight_categories": ["cooldown"], "query_suffix": "drills"}}"#
        )
        .unwrap();
        let rules = RuleSet::from_file(file.path()).unwrap();
        assert!(rules.no_weight_categories.contains("cooldown"));
        assert_eq!(rules.no_weight_categories.len(), 1);
        assert_eq!(rules.query_suffix, "drills");
    }

    #[test]
    fn test_from_file_missing_is_config_error() {
        let err = RuleSet::from_file(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file_invalid_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = RuleSet::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_from_file_rejects_conflicting_lists() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"force_true": ["dips"], "force_false": ["dips"]}}"#
        )
        .unwrap();
        let err = RuleSet::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConflictingOverride(_)));
    }

    #[test]
    fn test_serialization_round_trip() {
        let rules = RuleSet::default();
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
