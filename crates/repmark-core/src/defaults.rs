//! Centralized default rule tables for repmark.
//!
//! **This module is the single source of truth** for the built-in
//! classification tables. `RuleSet::default()` and the classification tiers
//! reference these constants instead of defining their own copies — the
//! legacy curation scripts each kept a private copy of these lists and
//! drifted apart, which is the failure mode this crate exists to stop.

use once_cell::sync::Lazy;
use std::collections::HashSet;

// =============================================================================
// CATEGORY TIERS
// =============================================================================

/// Categories whose exercises never track weight (bodyweight-only work).
pub const NO_WEIGHT_CATEGORIES: &[&str] = &[
    "conditioning",
    "warmup",
    "recovery",
    "flexibility",
    "balance",
    "technique",
    "agility",
    "speed",
];

/// Categories that track weight unless an earlier tier says otherwise.
pub const WEIGHTED_CATEGORIES: &[&str] = &["strength", "power"];

/// Categories that default to bodyweight unless explicitly weighted.
pub const BODYWEIGHT_DEFAULT_CATEGORIES: &[&str] = &["core", "prevention"];

/// Fixed-tier set for the weighted-category check.
pub static WEIGHTED_CATEGORY_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| WEIGHTED_CATEGORIES.iter().copied().collect());

/// Fixed-tier set for the bodyweight-default category check.
pub static BODYWEIGHT_DEFAULT_CATEGORY_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BODYWEIGHT_DEFAULT_CATEGORIES.iter().copied().collect());

// =============================================================================
// LEXICAL PATTERNS
// =============================================================================

/// Substrings of an id or name that mark a movement as no-weight.
///
/// Underscore and hyphen spellings are both listed because the corpus mixes
/// snake_case ids with human-readable names.
pub const NO_WEIGHT_NAME_PATTERNS: &[&str] = &[
    "bodyweight",
    "jump",
    "burpee",
    "plank",
    "push_up",
    "push-up",
    "pull_up",
    "pull-up",
    "intervals",
    "sprint",
    "skate",
    "stretch",
    "mobility",
    "foam_roll",
];

/// Substrings of an id or name that mark an explicitly weighted variant.
pub const WEIGHTED_VARIANT_MARKERS: &[&str] = &["weighted_"];

// =============================================================================
// CURATED OVERRIDES
// =============================================================================

/// Ids curated as weight-tracking regardless of what the heuristics say.
pub const FORCE_TRUE_IDS: &[&str] = &[
    "walking_lunge",
    "reverse_lunge",
    "lateral_lunge",
    "split_squat",
    "split_squat_heavy",
    "single_leg_rdl",
    "goblet_squat",
    "calf_raise",
    "standing_calf_raise",
    "dumbbell_row",
    "one_arm_dumbbell_row",
    "dumbbell_bench_press",
    "incline_dumbbell_press",
    "overhead_press",
    "arnold_press",
    "lateral_raise",
    "front_raise",
    "face_pulls",
    "shrugs",
    "bicep_curls",
    "hammer_curls",
    "tricep_extensions",
    "skull_crushers",
];

/// Ids curated as never weight-tracking regardless of the heuristics.
pub const FORCE_FALSE_IDS: &[&str] = &[
    "plank",
    "side_plank",
    "bird_dog",
    "dead_bug",
    "hollow_hold",
    "superman_hold",
    "push_up",
    "push_ups",
    "pull_up",
    "pull_ups",
    "chin_up",
    "chin_ups",
    "dips",
    "inverted_row",
    "pike_push_ups",
    "wall_sit",
    "glute_bridge",
    "single_leg_bridge",
    "leg_raise",
    "hanging_leg_raise",
];

// =============================================================================
// FIELD NAMES AND FORMATTING
// =============================================================================

/// Record field holding the weight-tracking flag.
pub const TRACKS_WEIGHT_FIELD: &str = "tracksWeight";

/// Record field holding the derived video search query.
pub const YOUTUBE_QUERY_FIELD: &str = "youtubeQuery";

/// Record field whose presence marks a weighted variant.
pub const WEIGHT_FIELD: &str = "weight";

/// Suffix appended to a lowercased exercise name when regenerating queries.
pub const QUERY_SUFFIX: &str = "hockey";

/// Indentation used when a record body has no indented field line to infer
/// its convention from.
pub const FALLBACK_INDENT: &str = "  ";
