//! # Ringlens Engine
//!
//! Fuses detector output into the final report:
//! - `ScoringEngine` - per-account suspicion scores and fraud-ring grouping
//! - `GraphPayloadBuilder` - typed node/link structure for visualization
//! - `analyze` - the full single-invocation pipeline
//!
//! One invocation builds all state fresh and discards it with the returned
//! report; the pipeline is synchronous and CPU-bound, so independent
//! requests can run it concurrently on their own inputs.

#![warn(missing_docs)]

pub mod payload;
pub mod report;
pub mod scoring;
pub mod types;

pub use payload::GraphPayloadBuilder;
pub use report::analyze;
pub use scoring::{ScoringEngine, ScoringOutcome};
pub use types::{
    Analysis, AnalysisReport, AnalysisSummary, FraudRing, GraphLink, GraphNode, GraphPayload,
    LinkClass, NodeClass, RingPatternType, SuspicionRecord,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::payload::GraphPayloadBuilder;
    pub use crate::report::analyze;
    pub use crate::scoring::{ScoringEngine, ScoringOutcome};
    pub use crate::types::*;
}
