//! # Ringlens Core
//!
//! Shared building blocks for the ringlens fraud-ring detection pipeline:
//! - Transaction and pattern-label types
//! - The `TxGraph` account graph built from a transaction batch
//! - Detector metadata and the `Detector` trait
//! - The `AnalysisError` error type
//!
//! All state in this crate is built fresh per analysis invocation; nothing
//! here is shared or reused across runs.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detector;
pub mod error;
pub mod graph;
pub mod types;

pub use detector::{Detector, DetectorMetadata};
pub use error::{AnalysisError, Result};
pub use graph::{Account, Edge, NeighborSet, TxGraph};
pub use types::{Pattern, Transaction};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::detector::{Detector, DetectorMetadata};
    pub use crate::error::{AnalysisError, Result};
    pub use crate::graph::{Account, Edge, NeighborSet, TxGraph};
    pub use crate::types::{Pattern, Transaction};
}
