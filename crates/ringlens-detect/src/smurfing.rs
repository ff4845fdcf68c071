//! Fan-in/fan-out structuring (smurfing) detection.
//!
//! Structuring spreads transfers across many counterparties to stay under
//! reporting thresholds. Fan-in collectors additionally concentrate those
//! transfers in time, so the fan-in rule carries a temporal-density check.
//! Fan-out has no temporal check: distributors commonly drip funds out
//! over long horizons, and the asymmetry is a deliberate heuristic choice.

use ringlens_core::detector::{Detector, DetectorMetadata};
use ringlens_core::graph::TxGraph;
use std::collections::HashSet;

/// Distinct counterparties needed to flag either direction.
const FAN_THRESHOLD: usize = 10;
/// Sliding-window width for the fan-in density check, in hours.
const DENSITY_WINDOW_HOURS: i64 = 72;
/// Events required inside one window for the density check to pass.
const DENSITY_MIN_EVENTS: usize = 5;

/// Flagged structuring accounts, by direction.
#[derive(Debug, Clone, Default)]
pub struct SmurfingResult {
    /// Accounts receiving from >= 10 distinct senders with a dense window.
    pub fan_in: Vec<String>,
    /// Accounts sending to >= 10 distinct receivers.
    pub fan_out: Vec<String>,
    /// Order-preserving deduplicated union of both directions.
    pub accounts: Vec<String>,
}

/// Fan-in/fan-out structuring detector.
#[derive(Debug, Clone)]
pub struct SmurfingDetector {
    metadata: DetectorMetadata,
}

impl Default for SmurfingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SmurfingDetector {
    /// Create a new smurfing detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("detect/smurfing")
                .with_description("Fan-in/fan-out structuring with temporal density"),
        }
    }

    /// Flag structuring accounts among the non-legitimate population.
    #[must_use]
    pub fn compute(graph: &TxGraph, legitimate: &HashSet<String>) -> SmurfingResult {
        let mut result = SmurfingResult::default();
        let mut union_seen: HashSet<String> = HashSet::new();

        for id in graph.account_ids() {
            if legitimate.contains(id) {
                continue;
            }

            if graph.in_neighbors(id).len() >= FAN_THRESHOLD && Self::has_dense_window(graph, id) {
                result.fan_in.push(id.clone());
            }
            if graph.out_neighbors(id).len() >= FAN_THRESHOLD {
                result.fan_out.push(id.clone());
            }
        }

        for id in result.fan_in.iter().chain(result.fan_out.iter()) {
            if union_seen.insert(id.clone()) {
                result.accounts.push(id.clone());
            }
        }

        result
    }

    /// Temporal-density check over every timestamp the account
    /// participated in (as sender or receiver): some window of at most
    /// 72 hours must contain at least 5 events. Two-pointer sliding
    /// window over the sorted timestamps, O(n) after the sort.
    fn has_dense_window(graph: &TxGraph, id: &str) -> bool {
        let Some(account) = graph.account(id) else {
            return false;
        };
        if account.timestamps.len() < DENSITY_MIN_EVENTS {
            return false;
        }

        let mut timestamps = account.timestamps.clone();
        timestamps.sort_unstable();

        let window_seconds = DENSITY_WINDOW_HOURS * 3600;
        let mut left = 0;
        for right in 0..timestamps.len() {
            while timestamps[right] - timestamps[left] > window_seconds {
                left += 1;
            }
            if right - left + 1 >= DENSITY_MIN_EVENTS {
                return true;
            }
        }
        false
    }
}

impl Detector for SmurfingDetector {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringlens_core::types::Transaction;

    const HOUR: i64 = 3600;

    fn tx(id: u64, sender: &str, receiver: &str, timestamp: i64) -> Transaction {
        Transaction {
            id,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount: 100.0,
            timestamp,
        }
    }

    #[test]
    fn test_fan_in_with_dense_window_flagged() {
        // 12 distinct senders, all inside a 12-hour burst.
        let txs: Vec<_> = (0..12)
            .map(|i| tx(i, &format!("S{i}"), "COLLECTOR", i as i64 * HOUR))
            .collect();
        let graph = TxGraph::from_transactions(&txs);
        let result = SmurfingDetector::compute(&graph, &HashSet::new());

        assert_eq!(result.fan_in, vec!["COLLECTOR"]);
        assert!(result.fan_out.is_empty());
        assert_eq!(result.accounts, vec!["COLLECTOR"]);
    }

    #[test]
    fn test_fan_in_spread_out_not_flagged() {
        // 12 distinct senders spread one week apart: no 72-hour window
        // ever holds 5 events.
        let txs: Vec<_> = (0..12)
            .map(|i| tx(i, &format!("S{i}"), "COLLECTOR", i as i64 * 7 * 24 * HOUR))
            .collect();
        let graph = TxGraph::from_transactions(&txs);
        let result = SmurfingDetector::compute(&graph, &HashSet::new());

        assert!(result.fan_in.is_empty());
    }

    #[test]
    fn test_fan_out_has_no_temporal_check() {
        // 10 distinct receivers spread over months still flag.
        let txs: Vec<_> = (0..10)
            .map(|i| tx(i, "SPRAYER", &format!("R{i}"), i as i64 * 30 * 24 * HOUR))
            .collect();
        let graph = TxGraph::from_transactions(&txs);
        let result = SmurfingDetector::compute(&graph, &HashSet::new());

        assert_eq!(result.fan_out, vec!["SPRAYER"]);
        assert!(result.fan_in.is_empty());
    }

    #[test]
    fn test_below_threshold_not_flagged() {
        let txs: Vec<_> = (0..9)
            .map(|i| tx(i, &format!("S{i}"), "ALMOST", i as i64 * HOUR))
            .collect();
        let graph = TxGraph::from_transactions(&txs);
        let result = SmurfingDetector::compute(&graph, &HashSet::new());

        assert!(result.accounts.is_empty());
    }

    #[test]
    fn test_duplicate_senders_count_once() {
        // 12 transfers from only 6 distinct senders: under threshold.
        let txs: Vec<_> = (0..12)
            .map(|i| tx(i, &format!("S{}", i % 6), "COLLECTOR", i as i64 * HOUR))
            .collect();
        let graph = TxGraph::from_transactions(&txs);
        let result = SmurfingDetector::compute(&graph, &HashSet::new());

        assert!(result.fan_in.is_empty());
    }

    #[test]
    fn test_both_directions_deduplicated_in_union() {
        let mut txs: Vec<_> = (0..10)
            .map(|i| tx(i, &format!("S{i}"), "BOTH", i as i64 * HOUR))
            .collect();
        for i in 0..10 {
            txs.push(tx(100 + i, "BOTH", &format!("R{i}"), (12 + i as i64) * HOUR));
        }
        let graph = TxGraph::from_transactions(&txs);
        let result = SmurfingDetector::compute(&graph, &HashSet::new());

        assert_eq!(result.fan_in, vec!["BOTH"]);
        assert_eq!(result.fan_out, vec!["BOTH"]);
        assert_eq!(result.accounts, vec!["BOTH"]);
    }

    #[test]
    fn test_legitimate_account_excluded() {
        let txs: Vec<_> = (0..12)
            .map(|i| tx(i, &format!("S{i}"), "COLLECTOR", i as i64 * HOUR))
            .collect();
        let graph = TxGraph::from_transactions(&txs);
        let legitimate: HashSet<String> = HashSet::from(["COLLECTOR".to_string()]);
        let result = SmurfingDetector::compute(&graph, &legitimate);

        assert!(result.accounts.is_empty());
    }
}
