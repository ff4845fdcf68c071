//! # Ringlens Ingest
//!
//! CSV ingest for the analysis pipeline. Headers are matched against
//! per-field alias tables (case-insensitive, whitespace-trimmed), rows
//! with missing or malformed values are skipped silently, and a batch
//! that yields zero parseable rows is a hard error.

#![warn(missing_docs)]

pub mod columns;
pub mod reader;

pub use columns::{ColumnMap, LogicalField};
pub use reader::{read_transactions, read_transactions_from_path};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::columns::{ColumnMap, LogicalField};
    pub use crate::reader::{read_transactions, read_transactions_from_path};
}
