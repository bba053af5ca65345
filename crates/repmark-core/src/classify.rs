//! Ordered-tier classification of records.
//!
//! One rule table, evaluated top-down with first match winning:
//!
//! 1. Flag already stored → [`Decision::AlreadyPresent`]
//! 2. Id on a force list → forced verdict
//! 3. Category in the no-weight set → false
//! 4. Id or name carries a no-weight lexical pattern → false
//! 5. Weighted-variant marker or explicit weight field → true
//! 6. Category is strength or power → true
//! 7. Category is core or prevention → false
//! 8. Default → true
//!
//! The precedence encodes "explicit curation > category defaults > lexical
//! heuristics > blanket default": a manual override is never clobbered by
//! substring matching, and category is a stronger no-weight signal than the
//! name patterns.

use crate::config::RuleSet;
use crate::defaults::{BODYWEIGHT_DEFAULT_CATEGORY_SET, WEIGHTED_CATEGORY_SET};
use crate::models::{Decision, FieldView};

/// Classify one record for the default apply pass.
///
/// Tier 1 short-circuits on a stored flag, whatever its value, which is what
/// makes the apply pass idempotent: a second run sees the flags the first run
/// wrote and leaves every span byte-identical.
pub fn classify(id: &str, view: &FieldView, rules: &RuleSet) -> Decision {
    if view.tracks_weight.is_some() {
        return Decision::AlreadyPresent;
    }
    Decision::from_verdict(expected_verdict(id, view, rules))
}

/// Derive the verdict the rule set expects, ignoring any stored flag.
///
/// This is the tier-2-through-8 evaluation shared by [`classify`] and the
/// audit re-check, which recomputes from category and name regardless of what
/// is currently stored.
pub fn expected_verdict(id: &str, view: &FieldView, rules: &RuleSet) -> bool {
    // Tier 2: explicit curation wins over every heuristic.
    if rules.force_false.contains(id) {
        return false;
    }
    if rules.force_true.contains(id) {
        return true;
    }

    // Tier 3: no-weight categories.
    if let Some(category) = view.category.as_deref() {
        if rules.no_weight_categories.contains(category) {
            return false;
        }
    }

    // Tiers 4 and 5 match lowercased id and name only, not the whole body,
    // so a description mentioning "sprint" cannot flip a squat.
    let id_lower = id.to_lowercase();
    let name_lower = view
        .name
        .as_deref()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let matches_any = |patterns: &std::collections::HashSet<String>| {
        patterns
            .iter()
            .any(|p| id_lower.contains(p.as_str()) || name_lower.contains(p.as_str()))
    };

    // Tier 4: lexical no-weight patterns.
    if matches_any(&rules.no_weight_name_patterns) {
        return false;
    }

    // Tier 5: explicitly weighted variants.
    if matches_any(&rules.weighted_variant_markers) || view.has_weight_field {
        return true;
    }

    // Tiers 6 and 7: fixed category defaults.
    if let Some(category) = view.category.as_deref() {
        if WEIGHTED_CATEGORY_SET.contains(category) {
            return true;
        }
        if BODYWEIGHT_DEFAULT_CATEGORY_SET.contains(category) {
            return false;
        }
    }

    // Tier 8: default-positive policy.
    true
}

/// Classify one record for the force-fix pass.
///
/// The force lists are the sole authority here: a listed id is rewritten to
/// its forced verdict even when a flag is already stored (tier 1 is bypassed
/// for listed ids only), while an unlisted record returns `None` and passes
/// through byte-identical.
pub fn classify_forced(id: &str, view: &FieldView, rules: &RuleSet) -> Option<Decision> {
    let forced = if rules.force_false.contains(id) {
        false
    } else if rules.force_true.contains(id) {
        true
    } else {
        return None;
    };

    if view.tracks_weight == Some(forced) {
        Some(Decision::AlreadyPresent)
    } else {
        Some(Decision::from_verdict(forced))
    }
}
