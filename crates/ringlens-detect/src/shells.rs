//! Shell-chain detection.
//!
//! A shell chain is a sequence of low-activity pass-through accounts used
//! to obscure the origin of funds: money enters at one end, hops through
//! accounts that barely transact otherwise, and exits at the other end.

use ringlens_core::detector::{Detector, DetectorMetadata};
use ringlens_core::graph::TxGraph;
use std::collections::{HashSet, VecDeque};

/// Minimum transaction count of a potential shell account.
const SHELL_TX_MIN: u32 = 2;
/// Maximum transaction count of a potential shell account.
const SHELL_TX_MAX: u32 = 3;
/// Minimum path length (in nodes) for a qualifying chain.
const MIN_CHAIN_LEN: usize = 4;
/// Maximum path length (in nodes) explored.
const MAX_CHAIN_LEN: usize = 5;

/// Low-activity pass-through chain detector.
#[derive(Debug, Clone)]
pub struct ShellChainDetector {
    metadata: DetectorMetadata,
}

impl Default for ShellChainDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellChainDetector {
    /// Create a new shell-chain detector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("detect/shell-chains")
                .with_description("Low-activity pass-through chain detection"),
        }
    }

    /// Mark shell accounts among the non-legitimate population.
    ///
    /// A potential shell is non-legitimate with a transaction count in
    /// [2,3]. From every non-legitimate account, paths are expanded
    /// breadth-first along out-neighbors without revisiting a node on the
    /// current path, extended beyond a node only when that node is a
    /// potential shell, and capped at 5 nodes. Whenever a path reaches 4
    /// nodes and every interior node is a potential shell, all interior
    /// nodes are marked. Marking is idempotent; the returned list is
    /// deduplicated in marking order.
    #[must_use]
    pub fn compute(graph: &TxGraph, legitimate: &HashSet<String>) -> Vec<String> {
        let candidates: HashSet<&String> = graph
            .account_ids()
            .filter(|id| {
                !legitimate.contains(*id)
                    && graph
                        .account(id)
                        .is_some_and(|a| (SHELL_TX_MIN..=SHELL_TX_MAX).contains(&a.tx_count))
            })
            .collect();

        let mut marked: Vec<String> = Vec::new();
        let mut marked_seen: HashSet<String> = HashSet::new();

        for start in graph.account_ids() {
            if legitimate.contains(start) {
                continue;
            }

            let mut queue: VecDeque<Vec<&String>> = VecDeque::from([vec![start]]);
            while let Some(path) = queue.pop_front() {
                let Some(&current) = path.last() else {
                    continue;
                };
                for neighbor in graph.out_neighbors(current).iter() {
                    if path.contains(&neighbor) {
                        continue;
                    }
                    let mut next = path.clone();
                    next.push(neighbor);

                    if next.len() >= MIN_CHAIN_LEN {
                        let interior = &next[1..next.len() - 1];
                        if interior.iter().all(|id| candidates.contains(*id)) {
                            for id in interior {
                                if marked_seen.insert((*id).clone()) {
                                    marked.push((*id).clone());
                                }
                            }
                        }
                    }
                    if next.len() < MAX_CHAIN_LEN && candidates.contains(&neighbor) {
                        queue.push_back(next);
                    }
                }
            }
        }

        marked
    }
}

impl Detector for ShellChainDetector {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringlens_core::types::Transaction;

    fn graph_of(edges: &[(&str, &str)]) -> TxGraph {
        let txs: Vec<_> = edges
            .iter()
            .enumerate()
            .map(|(i, (s, r))| Transaction {
                id: i as u64,
                sender: s.to_string(),
                receiver: r.to_string(),
                amount: 500.0,
                timestamp: i as i64 * 60,
            })
            .collect();
        TxGraph::from_transactions(&txs)
    }

    #[test]
    fn test_chain_interiors_marked() {
        // A -> B -> C -> D -> E: B, C, D each have tx_count 2.
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")]);
        let marked = ShellChainDetector::compute(&graph, &HashSet::new());

        let set: HashSet<_> = marked.iter().map(String::as_str).collect();
        assert_eq!(set, HashSet::from(["B", "C", "D"]));
    }

    #[test]
    fn test_busy_interior_disqualifies_its_chains() {
        // Same chain but D carries 6 transactions: the 5-node chain no
        // longer qualifies and D is never marked. B and C still qualify
        // as interiors of the 4-node prefix A -> B -> C -> D.
        let mut edges = vec![("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")];
        for _ in 0..4 {
            edges.push(("X", "D"));
        }
        let graph = graph_of(&edges);
        assert_eq!(graph.account("D").unwrap().tx_count, 6);

        let marked = ShellChainDetector::compute(&graph, &HashSet::new());
        let set: HashSet<_> = marked.iter().map(String::as_str).collect();
        assert_eq!(set, HashSet::from(["B", "C"]));
    }

    #[test]
    fn test_short_chain_not_marked() {
        // A -> B -> C: only 3 nodes, below the chain minimum.
        let graph = graph_of(&[("A", "B"), ("B", "C")]);
        let marked = ShellChainDetector::compute(&graph, &HashSet::new());
        assert!(marked.is_empty());
    }

    #[test]
    fn test_endpoints_never_marked() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")]);
        let marked = ShellChainDetector::compute(&graph, &HashSet::new());
        assert!(!marked.contains(&"A".to_string()));
        assert!(!marked.contains(&"E".to_string()));
    }

    #[test]
    fn test_legitimate_interior_blocks_chain() {
        let graph = graph_of(&[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E")]);
        let legitimate: HashSet<String> = HashSet::from(["C".to_string()]);
        let marked = ShellChainDetector::compute(&graph, &legitimate);
        assert!(marked.is_empty());
    }

    #[test]
    fn test_marking_is_idempotent_across_overlapping_paths() {
        // Two starts reach the same interior nodes; each appears once.
        let graph = graph_of(&[
            ("A", "B"),
            ("Z", "B"),
            ("B", "C"),
            ("C", "D"),
            ("D", "E"),
        ]);
        let marked = ShellChainDetector::compute(&graph, &HashSet::new());
        let mut sorted = marked.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), marked.len());
    }
}
