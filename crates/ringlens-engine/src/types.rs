//! Report and payload types.
//!
//! These types define the output contract: a report is either complete and
//! valid or the run fails with an error — never partial.

use serde::Serialize;

/// Ring id value used when an account belongs to no ring.
pub const NO_RING: &str = "NONE";

/// A flagged account with its fused suspicion score.
#[derive(Debug, Clone, Serialize)]
pub struct SuspicionRecord {
    /// Account id.
    pub account_id: String,
    /// Fused suspicion score in [0, 100], rounded to 1 decimal.
    pub suspicion_score: f64,
    /// Detected pattern labels, sorted.
    pub detected_patterns: Vec<String>,
    /// Ring id (`RING_NNN`) or `"NONE"`.
    pub ring_id: String,
}

/// Pattern family a fraud ring was grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RingPatternType {
    /// Members of one detected cycle.
    Cycle,
    /// All flagged structuring accounts not already ringed.
    Smurfing,
    /// All flagged shell accounts not already ringed.
    Shell,
}

/// A group of accounts jointly flagged for one fraud pattern.
#[derive(Debug, Clone, Serialize)]
pub struct FraudRing {
    /// Sequential ring id (`RING_001`, `RING_002`, ...), unique and
    /// strictly increasing in assignment order across the whole run.
    pub ring_id: String,
    /// Pattern family.
    pub pattern_type: RingPatternType,
    /// Member account ids, sorted and unique.
    pub member_accounts: Vec<String>,
    /// Ring risk score in [0, 100], rounded to 1 decimal.
    pub risk_score: f64,
}

/// Run-level counters reported alongside the findings.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    /// Total accounts in the graph.
    pub total_accounts_analyzed: usize,
    /// Accounts carrying at least one pattern.
    pub suspicious_accounts_flagged: usize,
    /// Rings compiled.
    pub fraud_rings_detected: usize,
    /// Wall-clock processing time, rounded to 2 decimals.
    pub processing_time_seconds: f64,
}

/// The analysis half of the report.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Flagged accounts, sorted descending by suspicion score.
    pub suspicious_accounts: Vec<SuspicionRecord>,
    /// Compiled rings, sorted descending by risk score.
    pub fraud_rings: Vec<FraudRing>,
    /// Run-level counters.
    pub summary: AnalysisSummary,
}

/// Node classification for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeClass {
    /// No pattern detected.
    Safe,
    /// Carries a nonzero suspicion score but belongs to no ring.
    Suspicious,
    /// Member of at least one fraud ring.
    Fraud,
}

/// Link classification for visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkClass {
    /// Neither endpoint is suspicious.
    Normal,
    /// At least one endpoint is suspicious.
    Suspicious,
    /// Both endpoints are ring members.
    Fraud,
}

/// A visualization node.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    /// Account id.
    pub id: String,
    /// Node classification.
    #[serde(rename = "type")]
    pub class: NodeClass,
    /// Suspicion score (0 for safe nodes).
    pub risk_score: f64,
    /// Ring id or `"NONE"`.
    pub ring_id: String,
    /// Detected pattern labels, sorted.
    pub detected_patterns: Vec<String>,
    /// Transactions the account participated in.
    pub tx_count: u32,
    /// Total sent, rounded to 2 decimals.
    pub total_sent: f64,
    /// Total received, rounded to 2 decimals.
    pub total_received: f64,
}

/// A visualization link; one per transaction, duplicates preserved.
#[derive(Debug, Clone, Serialize)]
pub struct GraphLink {
    /// Sending account id.
    pub source: String,
    /// Receiving account id.
    pub target: String,
    /// Transfer amount.
    pub amount: f64,
    /// Link classification.
    #[serde(rename = "type")]
    pub class: LinkClass,
}

/// The typed node/link structure for visualization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphPayload {
    /// Nodes in graph insertion order.
    pub nodes: Vec<GraphNode>,
    /// Links in transaction order.
    pub links: Vec<GraphLink>,
}

/// The complete report for one analysis invocation.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Scores, rings, and summary.
    pub analysis: Analysis,
    /// Visualization payload.
    pub graph: GraphPayload,
}
