//! Visualization payload assembly.
//!
//! Projects the transaction graph and the scoring outcome into the typed
//! node/link structure consumed by front-end renderers.

use crate::types::{
    FraudRing, GraphLink, GraphNode, GraphPayload, LinkClass, NodeClass, SuspicionRecord, NO_RING,
};
use ringlens_core::detector::{Detector, DetectorMetadata};
use ringlens_core::graph::TxGraph;
use std::collections::{HashMap, HashSet};

/// Builds the visualization payload from a scored graph.
#[derive(Debug, Clone)]
pub struct GraphPayloadBuilder {
    metadata: DetectorMetadata,
}

impl Default for GraphPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphPayloadBuilder {
    /// Create a new payload builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("engine/graph-payload")
                .with_description("Typed node/link assembly for visualization"),
        }
    }

    /// Assemble nodes and links.
    ///
    /// Nodes come out in graph insertion order, links in transaction
    /// order with one link per transaction, duplicate edges preserved.
    /// A node is `fraud` when it belongs to a ring, `suspicious` when it
    /// carries a score but no ring, and `safe` otherwise. A link is
    /// `fraud` when both endpoints are ring members, `suspicious` when
    /// at least one endpoint is flagged, and `normal` otherwise.
    #[must_use]
    pub fn compute(
        graph: &TxGraph,
        records: &[SuspicionRecord],
        rings: &[FraudRing],
    ) -> GraphPayload {
        let by_account: HashMap<&str, &SuspicionRecord> = records
            .iter()
            .map(|r| (r.account_id.as_str(), r))
            .collect();
        let ring_members: HashSet<&str> = rings
            .iter()
            .flat_map(|r| r.member_accounts.iter().map(String::as_str))
            .collect();

        let nodes = graph
            .account_ids()
            .filter_map(|id| {
                let account = graph.account(id)?;
                let record = by_account.get(id.as_str()).copied();
                let class = if ring_members.contains(id.as_str()) {
                    NodeClass::Fraud
                } else if record.is_some() {
                    NodeClass::Suspicious
                } else {
                    NodeClass::Safe
                };
                Some(GraphNode {
                    id: id.clone(),
                    class,
                    risk_score: record.map_or(0.0, |r| r.suspicion_score),
                    ring_id: record.map_or_else(|| NO_RING.to_string(), |r| r.ring_id.clone()),
                    detected_patterns: record
                        .map(|r| r.detected_patterns.clone())
                        .unwrap_or_default(),
                    tx_count: account.tx_count,
                    total_sent: round2(account.sent_total),
                    total_received: round2(account.received_total),
                })
            })
            .collect();

        let links = graph
            .edges()
            .iter()
            .map(|edge| {
                let src_ringed = ring_members.contains(edge.source.as_str());
                let dst_ringed = ring_members.contains(edge.target.as_str());
                let class = if src_ringed && dst_ringed {
                    LinkClass::Fraud
                } else if src_ringed
                    || dst_ringed
                    || by_account.contains_key(edge.source.as_str())
                    || by_account.contains_key(edge.target.as_str())
                {
                    LinkClass::Suspicious
                } else {
                    LinkClass::Normal
                };
                GraphLink {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    amount: edge.amount,
                    class,
                }
            })
            .collect();

        GraphPayload { nodes, links }
    }
}

impl Detector for GraphPayloadBuilder {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
