//! Bounded simple-cycle enumeration.
//!
//! Money returning to its origin through a short chain of intermediaries
//! is the strongest laundering indicator in the pipeline. This detector
//! enumerates distinct simple directed cycles of length 3 to 5 whose
//! members are all non-legitimate.

use ringlens_core::detector::{Detector, DetectorMetadata};
use ringlens_core::graph::TxGraph;
use std::collections::HashSet;

/// Minimum cycle length reported.
const MIN_CYCLE_LEN: usize = 3;
/// Maximum path length explored (and maximum cycle length).
const MAX_CYCLE_LEN: usize = 5;

/// Bounded-depth simple directed cycle detector.
///
/// Worst case is exponential in branching factor bounded by depth 5;
/// callers needing hard latency bounds on dense graphs should impose an
/// explicit node or path budget before invoking the pipeline.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    metadata: DetectorMetadata,
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleDetector {
    /// Create a new cycle detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("detect/cycles")
                .with_description("Bounded simple directed cycle enumeration (length 3-5)"),
        }
    }

    /// Enumerate distinct cycles among non-legitimate accounts.
    ///
    /// Uses an iterative explicit-stack depth-first search from each
    /// non-legitimate start account, following out-neighbors, never
    /// revisiting a node already on the current path, closing a cycle when
    /// a neighbor equals the start and the path holds at least 3 nodes.
    ///
    /// Cycles are deduplicated by their sorted member-id set, not by edge
    /// sequence: two traversals over the same member set count once, with
    /// the first discovery defining the reported node order.
    #[must_use]
    pub fn compute(graph: &TxGraph, legitimate: &HashSet<String>) -> Vec<Vec<String>> {
        let mut cycles: Vec<Vec<String>> = Vec::new();
        let mut seen: HashSet<Vec<String>> = HashSet::new();

        for start in graph.account_ids() {
            if legitimate.contains(start) {
                continue;
            }
            // A cycle member needs both an inbound and an outbound edge.
            if graph.out_neighbors(start).is_empty() || graph.in_neighbors(start).is_empty() {
                continue;
            }

            let mut stack: Vec<Vec<String>> = vec![vec![start.clone()]];
            while let Some(path) = stack.pop() {
                let Some(current) = path.last() else {
                    continue;
                };
                for neighbor in graph.out_neighbors(current).iter() {
                    if neighbor == start {
                        if path.len() >= MIN_CYCLE_LEN {
                            let mut key = path.clone();
                            key.sort();
                            if seen.insert(key) {
                                cycles.push(path.clone());
                            }
                        }
                    } else if path.len() < MAX_CYCLE_LEN
                        && !legitimate.contains(neighbor)
                        && !path.contains(neighbor)
                    {
                        let mut next = path.clone();
                        next.push(neighbor.clone());
                        stack.push(next);
                    }
                }
            }
        }

        cycles
    }
}

impl Detector for CycleDetector {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(edges: &[(&str, &str)]) -> TxGraph {
        let txs: Vec<_> = edges
            .iter()
            .enumerate()
            .map(|(i, (s, r))| ringlens_core::types::Transaction {
                id: i as u64,
                sender: s.to_string(),
                receiver: r.to_string(),
                amount: 100.0,
                timestamp: i as i64 * 60,
            })
            .collect();
        TxGraph::from_transactions(&txs)
    }

    #[test]
    fn test_triangle_found_once() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let cycles = CycleDetector::compute(&graph, &HashSet::new());

        assert_eq!(cycles.len(), 1);
        let mut members = cycles[0].clone();
        members.sort();
        assert_eq!(members, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_two_cycle_is_too_short() {
        let graph = graph_of(&[("A", "B"), ("B", "A")]);
        let cycles = CycleDetector::compute(&graph, &HashSet::new());
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_four_and_five_cycles_found() {
        let graph = graph_of(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "A"),
            ("P", "Q"),
            ("Q", "R"),
            ("R", "S"),
            ("S", "T"),
            ("T", "P"),
        ]);
        let cycles = CycleDetector::compute(&graph, &HashSet::new());

        let lens: Vec<usize> = cycles.iter().map(Vec::len).collect();
        assert!(lens.contains(&4));
        assert!(lens.contains(&5));
        assert_eq!(cycles.len(), 2);
    }

    #[test]
    fn test_six_cycle_exceeds_cap() {
        let graph = graph_of(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
            ("E", "F"),
            ("F", "A"),
        ]);
        let cycles = CycleDetector::compute(&graph, &HashSet::new());
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_dedup_by_member_set_not_edge_sequence() {
        // Both orientations over {A, B, C} exist; the member set is the
        // same so only one cycle is reported.
        let graph = graph_of(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("A", "C"),
            ("C", "B"),
            ("B", "A"),
        ]);
        let cycles = CycleDetector::compute(&graph, &HashSet::new());
        assert_eq!(cycles.len(), 1);
    }

    #[test]
    fn test_legitimate_member_blocks_cycle() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "A")]);
        let legitimate: HashSet<String> = ["B".to_string()].into();
        let cycles = CycleDetector::compute(&graph, &legitimate);
        assert!(cycles.is_empty());
    }

    #[test]
    fn test_shared_node_between_two_cycles() {
        let graph = graph_of(&[
            ("A", "B"),
            ("B", "C"),
            ("C", "A"),
            ("C", "D"),
            ("D", "E"),
            ("E", "C"),
        ]);
        let cycles = CycleDetector::compute(&graph, &HashSet::new());
        assert_eq!(cycles.len(), 2);
    }
}
