//! Error types for concierge-core.

use std::path::PathBuf;

use thiserror::Error;

/// Validation and parsing failures for activities and tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Empty, non-alphanumeric, or already-registered tag name.
    #[error("invalid tag '{name}': {reason}")]
    InvalidTag { name: String, reason: String },

    /// Ease or reward outside the inclusive `0..=10` range.
    #[error("{field} score must be an integer between 0 and 10, inclusive (got {value})")]
    InvalidScore { field: &'static str, value: i64 },

    /// Activity name that cannot act as a record key.
    #[error("invalid activity name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Description containing characters reserved by the record format.
    #[error("invalid description: {reason}")]
    InvalidDescription { reason: String },

    /// A data-file line that does not match the record grammar.
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },
}

impl ModelError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}

/// Storage failures raised by load, save and backup.
///
/// A missing data file is not an error; see
/// [`LoadReport::source_missing`](crate::store::LoadReport) and
/// [`BackupOutcome::SourceMissing`](crate::store::BackupOutcome).
#[derive(Debug, Error)]
pub enum StoreError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`StoreError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source,
    }
}
