use std::io;

use thiserror::Error;

use crate::types::{Curie, Prefix};

/// Error type for record validation, table IO, prefix resolution, and fetch failures.
#[derive(Debug, Error)]
pub enum SynonymError {
    /// A CURIE without a prefix, an identifier, or with whitespace.
    #[error("malformed CURIE '{curie}': expected '<prefix>:<identifier>'")]
    MalformedReference { curie: String },
    /// A date cell that is not `YYYY-MM-DD`.
    #[error("malformed date '{value}': expected YYYY-MM-DD")]
    MalformedDate { value: String },
    /// A matcher term was requested for an unnamed reference.
    #[error("reference '{curie}' has no name; a name is required for matcher terms")]
    MissingName { curie: Curie },
    /// A prefix with no URI in the overrides, built-ins, or authority.
    #[error("prefix '{prefix}' could not be resolved to a URI: {reason}")]
    UnresolvedPrefix { prefix: Prefix, reason: String },
    /// A remote table could not be fetched.
    #[error("failed fetching '{url}': {reason}")]
    Fetch { url: String, reason: String },
    /// A record or stop word that breaks a persistence invariant.
    #[error("invalid record for text '{text}': {reason}")]
    InvalidRecord { text: String, reason: String },
    /// A data row with more cells than the header.
    #[error("row on line {line} has {found} cells but the header declares {expected}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// Integrity checks reported issues.
    #[error("lint failed with {} issue(s)", issues.len())]
    Lint { issues: Vec<String> },
    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Malformed JSON input.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SynonymError {
    pub(crate) fn invalid(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            text: text.into(),
            reason: reason.into(),
        }
    }
}
