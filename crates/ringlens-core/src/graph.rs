//! Account graph built from a transaction batch.
//!
//! `TxGraph` converts a flat transaction list into account nodes with
//! per-account aggregates, directed distinct-neighbor adjacency, and a
//! multi-edge list. Degree thresholds downstream count distinct neighbors,
//! never raw transaction counts, so adjacency is deduplicated while the
//! edge list preserves duplicates between the same pair.

use crate::types::Transaction;
use std::collections::{HashMap, HashSet};

/// An insertion-ordered set of distinct neighbor ids.
///
/// Hash-set membership with first-seen iteration order. Report output must
/// be deterministic for identical input, so every traversal in the
/// pipeline iterates neighbors in the order they first appeared.
#[derive(Debug, Clone, Default)]
pub struct NeighborSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl NeighborSet {
    /// Insert a neighbor id; duplicates are ignored.
    pub fn insert(&mut self, id: &str) {
        if self.seen.insert(id.to_string()) {
            self.order.push(id.to_string());
        }
    }

    /// Distinct neighbor count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if there are no neighbors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Membership test.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    /// Iterate neighbor ids in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }
}

/// Per-account aggregates accumulated from the transaction batch.
#[derive(Debug, Clone)]
pub struct Account {
    /// Account id.
    pub id: String,
    /// Number of transactions this account participated in (either side).
    pub tx_count: u32,
    /// Total amount sent.
    pub sent_total: f64,
    /// Total amount received.
    pub received_total: f64,
    /// Timestamps of every transaction the account participated in,
    /// in input order (sorted on demand by consumers).
    pub timestamps: Vec<i64>,
}

impl Account {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            tx_count: 0,
            sent_total: 0.0,
            received_total: 0.0,
            timestamps: Vec::new(),
        }
    }
}

/// A directed edge in the account graph. Duplicates between the same
/// account pair are preserved.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Sending account id.
    pub source: String,
    /// Receiving account id.
    pub target: String,
    /// Transfer amount.
    pub amount: f64,
    /// Timestamp (Unix epoch seconds).
    pub timestamp: i64,
}

/// The account graph for one analysis run.
///
/// Accounts are held in first-seen order; all iteration over accounts and
/// neighbors is deterministic for identical input.
#[derive(Debug, Clone, Default)]
pub struct TxGraph {
    accounts: HashMap<String, Account>,
    order: Vec<String>,
    out_adj: HashMap<String, NeighborSet>,
    in_adj: HashMap<String, NeighborSet>,
    edges: Vec<Edge>,
}

impl TxGraph {
    /// Build the graph from a validated transaction sequence. O(T).
    ///
    /// No transaction is rejected here; validation is ingest's job.
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut graph = TxGraph::default();
        for tx in transactions {
            graph.add_transaction(tx);
        }
        graph
    }

    fn add_transaction(&mut self, tx: &Transaction) {
        {
            let sender = self.account_entry(&tx.sender);
            sender.tx_count += 1;
            sender.sent_total += tx.amount;
            sender.timestamps.push(tx.timestamp);
        }
        {
            let receiver = self.account_entry(&tx.receiver);
            receiver.tx_count += 1;
            receiver.received_total += tx.amount;
            receiver.timestamps.push(tx.timestamp);
        }

        self.out_adj
            .entry(tx.sender.clone())
            .or_default()
            .insert(&tx.receiver);
        self.in_adj
            .entry(tx.receiver.clone())
            .or_default()
            .insert(&tx.sender);

        self.edges.push(Edge {
            source: tx.sender.clone(),
            target: tx.receiver.clone(),
            amount: tx.amount,
            timestamp: tx.timestamp,
        });
    }

    /// Get-or-create accessor over the keyed account container.
    fn account_entry(&mut self, id: &str) -> &mut Account {
        if !self.accounts.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.accounts
            .entry(id.to_string())
            .or_insert_with(|| Account::new(id))
    }

    /// Number of accounts in the graph.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.order.len()
    }

    /// Account ids in first-seen order.
    pub fn account_ids(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    /// Look up an account by id.
    #[must_use]
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.get(id)
    }

    /// Distinct out-neighbors (receivers) of an account.
    #[must_use]
    pub fn out_neighbors(&self, id: &str) -> &NeighborSet {
        self.out_adj.get(id).unwrap_or(Self::empty_set())
    }

    /// Distinct in-neighbors (senders) of an account.
    #[must_use]
    pub fn in_neighbors(&self, id: &str) -> &NeighborSet {
        self.in_adj.get(id).unwrap_or(Self::empty_set())
    }

    /// Distinct in-degree plus distinct out-degree.
    #[must_use]
    pub fn total_degree(&self, id: &str) -> usize {
        self.in_neighbors(id).len() + self.out_neighbors(id).len()
    }

    /// All edges in input order, duplicates preserved.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    fn empty_set() -> &'static NeighborSet {
        static EMPTY: std::sync::OnceLock<NeighborSet> = std::sync::OnceLock::new();
        EMPTY.get_or_init(NeighborSet::default)
    }
}
