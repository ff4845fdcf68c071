//! Legitimacy classification for hub accounts.
//!
//! High-volume accounts whose structural profile resembles payroll or
//! merchant traffic would otherwise dominate every heuristic, so they are
//! identified once per run and excluded from all downstream detectors.

use ringlens_core::detector::{Detector, DetectorMetadata};
use ringlens_core::graph::TxGraph;
use std::collections::HashSet;

/// Distinct-neighbor count on the busy side of a payroll/merchant hub.
const HUB_FAN_THRESHOLD: usize = 20;
/// Maximum distinct-neighbor count on the quiet side of a hub.
const HUB_QUIET_SIDE_MAX: usize = 3;
/// Transaction count qualifying a generic high-volume hub.
const HUB_TX_COUNT: u32 = 100;
/// Combined distinct degree qualifying a generic high-volume hub.
const HUB_TOTAL_DEGREE: usize = 80;

/// Flags high-volume hub accounts (payroll/merchant-like) so the pattern
/// detectors skip them. Their edges remain in the graph for visualization.
#[derive(Debug, Clone)]
pub struct LegitimacyClassifier {
    metadata: DetectorMetadata,
}

impl Default for LegitimacyClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LegitimacyClassifier {
    /// Create a new classifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("detect/legitimacy")
                .with_description("Payroll/merchant hub exclusion filter"),
        }
    }

    /// Classify every account in the graph.
    ///
    /// An account is legitimate when any of the following holds:
    /// - distinct out-neighbors >= 20 and distinct in-neighbors <= 3
    ///   (payroll-shaped fan-out)
    /// - distinct in-neighbors >= 20 and distinct out-neighbors <= 3
    ///   (merchant-shaped fan-in)
    /// - tx_count >= 100 and distinct in + out neighbors >= 80
    ///   (generic high-volume hub)
    #[must_use]
    pub fn compute(graph: &TxGraph) -> HashSet<String> {
        let mut legitimate = HashSet::new();

        for id in graph.account_ids() {
            let fan_out = graph.out_neighbors(id).len();
            let fan_in = graph.in_neighbors(id).len();

            let payroll_shaped = fan_out >= HUB_FAN_THRESHOLD && fan_in <= HUB_QUIET_SIDE_MAX;
            let merchant_shaped = fan_in >= HUB_FAN_THRESHOLD && fan_out <= HUB_QUIET_SIDE_MAX;
            let high_volume_hub = graph
                .account(id)
                .is_some_and(|a| a.tx_count >= HUB_TX_COUNT)
                && fan_in + fan_out >= HUB_TOTAL_DEGREE;

            if payroll_shaped || merchant_shaped || high_volume_hub {
                legitimate.insert(id.clone());
            }
        }

        legitimate
    }
}

impl Detector for LegitimacyClassifier {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringlens_core::types::Transaction;

    fn tx(id: u64, sender: &str, receiver: &str) -> Transaction {
        Transaction {
            id,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount: 100.0,
            timestamp: id as i64 * 60,
        }
    }

    #[test]
    fn test_payroll_shaped_account_is_legitimate() {
        // PAY sends to 20 distinct employees, receives from one funder.
        let mut txs = vec![tx(0, "FUNDER", "PAY")];
        for i in 0..20 {
            txs.push(tx(i + 1, "PAY", &format!("EMP{i}")));
        }
        let graph = TxGraph::from_transactions(&txs);
        let legit = LegitimacyClassifier::compute(&graph);

        assert!(legit.contains("PAY"));
        assert!(!legit.contains("FUNDER"));
    }

    #[test]
    fn test_merchant_shaped_account_is_legitimate() {
        let mut txs = Vec::new();
        for i in 0..25 {
            txs.push(tx(i, &format!("CUST{i}"), "SHOP"));
        }
        txs.push(tx(100, "SHOP", "BANK"));
        let graph = TxGraph::from_transactions(&txs);
        let legit = LegitimacyClassifier::compute(&graph);

        assert!(legit.contains("SHOP"));
    }

    #[test]
    fn test_wide_fan_out_with_wide_fan_in_is_not_payroll() {
        // 20 receivers but also 5 distinct senders: fails the quiet-side
        // condition and none of the hub rules.
        let mut txs = Vec::new();
        for i in 0..20 {
            txs.push(tx(i, "MIX", &format!("R{i}")));
        }
        for i in 0..5 {
            txs.push(tx(100 + i, &format!("S{i}"), "MIX"));
        }
        let graph = TxGraph::from_transactions(&txs);
        let legit = LegitimacyClassifier::compute(&graph);

        assert!(!legit.contains("MIX"));
    }

    #[test]
    fn test_high_volume_hub() {
        // 50 distinct senders and 50 distinct receivers, 100 transactions.
        let mut txs = Vec::new();
        for i in 0..50 {
            txs.push(tx(i, &format!("S{i}"), "HUB"));
            txs.push(tx(100 + i, "HUB", &format!("R{i}")));
        }
        let graph = TxGraph::from_transactions(&txs);
        let legit = LegitimacyClassifier::compute(&graph);

        assert!(legit.contains("HUB"));
    }

    #[test]
    fn test_quiet_account_is_not_legitimate() {
        let graph = TxGraph::from_transactions(&[tx(1, "A", "B"), tx(2, "B", "C")]);
        let legit = LegitimacyClassifier::compute(&graph);
        assert!(legit.is_empty());
    }
}
