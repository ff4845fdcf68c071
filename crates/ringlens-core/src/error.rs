//! Error types for ringlens.

use thiserror::Error;

/// Result type alias using `AnalysisError`.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that can occur while ingesting or analyzing a transaction batch.
///
/// Row-level malformed data is never an error: bad rows are skipped during
/// ingest. These variants cover dataset-level structural failures and
/// unexpected internal failures, both of which abort the run — the system
/// never emits a partial report.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A required logical column has no matching header in the input.
    /// Raised before any row is processed.
    #[error("missing required column '{field}' (headers found: {found:?})")]
    Schema {
        /// Logical field name (e.g. `sender_id`).
        field: String,
        /// Headers present in the input.
        found: Vec<String>,
    },

    /// Zero rows survived parsing.
    #[error("no parseable transactions in input")]
    EmptyDataset,

    /// File-level input failure (unreadable CSV, bad encoding).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Unexpected failure during detection.
    #[error("internal error: {0}")]
    Internal(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Create a schema error for a missing logical field.
    #[must_use]
    pub fn schema(field: impl Into<String>, found: Vec<String>) -> Self {
        AnalysisError::Schema {
            field: field.into(),
            found,
        }
    }

    /// Create an invalid-input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        AnalysisError::Internal(msg.into())
    }

    /// Returns true if this failure is attributable to the input dataset
    /// rather than the engine itself.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::Schema { .. }
                | AnalysisError::EmptyDataset
                | AnalysisError::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_message() {
        let err = AnalysisError::schema("sender_id", vec!["foo".into(), "bar".into()]);
        let msg = err.to_string();
        assert!(msg.contains("sender_id"));
        assert!(msg.contains("foo"));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_internal_not_input_error() {
        let err = AnalysisError::internal("boom");
        assert!(!err.is_input_error());
    }
}
