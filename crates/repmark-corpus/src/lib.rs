//! # repmark-corpus
//!
//! Corpus processing for repmark: record location, field extraction, span
//! mutation, auditing, query regeneration, and pass orchestration.
//!
//! This crate provides:
//! - Tolerant scanning of fenced records in a raw text corpus
//! - Regex-based field extraction into a per-record view
//! - Idempotent insertion and correction of the weight-tracking flag
//! - An observational audit that re-checks stored flags against the rules
//! - Regeneration of stored search queries from record names
//! - Single-shot passes with atomic whole-file commits
//!
//! ## Example
//!
//! ```
//! use repmark_core::{PassMode, RuleSet};
//! use repmark_corpus::run_pass;
//!
//! let corpus = "'goblet_squat': '''\n{\n  \"category\": \"strength\",\n  \"name\": \"Goblet Squat\"\n}\n''',\n";
//! let outcome = run_pass(corpus, &RuleSet::default(), PassMode::Apply)?;
//! assert!(outcome.corpus.contains("\"tracksWeight\": true"));
//! # Ok::<(), repmark_core::Error>(())
//! ```

pub mod audit;
pub mod corpus_file;
pub mod field_extraction;
pub mod locator;
pub mod mutation;
pub mod pass;
pub mod query_rewrite;

// Re-export core types
pub use repmark_core::*;

// Re-export the pass surface
pub use audit::AuditReport;
pub use corpus_file::{commit_corpus, read_corpus};
pub use locator::{locate, LocateOutcome};
pub use pass::{run_audit, run_pass, PassOutcome};
