//! Error types for repmark.

use thiserror::Error;

/// Result type alias using repmark's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for repmark operations.
///
/// Per-record variants (`MalformedRecord`, `MalformedField`,
/// `DuplicateField`) are recovered locally: the pass runner skips the
/// offending record and keeps going, so one bad record never blocks the rest
/// of the corpus. Configuration and I/O variants abort the whole run before
/// anything is written.
#[derive(Error, Debug)]
pub enum Error {
    /// A record fence opened but never closed, or closed without its
    /// trailing field separator.
    #[error("Malformed record '{id}': {reason}")]
    MalformedRecord { id: String, reason: String },

    /// A field is present in a record body but cannot be parsed.
    #[error("Malformed field '{field}' in record '{id}': {reason}")]
    MalformedField {
        id: String,
        field: String,
        reason: String,
    },

    /// The target field appears more than once in a record body, so there is
    /// no authoritative occurrence to correct.
    #[error("Duplicate field '{field}' in record '{id}'")]
    DuplicateField { id: String, field: String },

    /// An id is listed in both force lists.
    #[error("Conflicting override: '{0}' appears in both force_true and force_false")]
    ConflictingOverride(String),

    /// Configuration file unreadable or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Corpus read or commit failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the pass runner recovers from this error by skipping the
    /// record (`true`) or must abort the run (`false`).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::MalformedRecord { .. }
                | Error::MalformedField { .. }
                | Error::DuplicateField { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
