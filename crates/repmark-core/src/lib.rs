//! # repmark-core
//!
//! Core types, classification rules, and configuration for repmark.
//!
//! This crate provides the data model, the ordered-tier classification
//! engine, and the rule-set configuration that the corpus-processing crates
//! build on.

pub mod classify;
pub mod config;
pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;

// Re-export commonly used types at crate root
pub use classify::{classify, classify_forced, expected_verdict};
pub use config::RuleSet;
pub use error::{Error, Result};
pub use models::{
    Decision, Discrepancy, FieldView, LocatedRecord, PassMode, PassSummary, SkippedRecord,
};
