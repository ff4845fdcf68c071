//! The full analysis pipeline for one transaction batch.

use crate::payload::GraphPayloadBuilder;
use crate::scoring::ScoringEngine;
use crate::types::{Analysis, AnalysisReport, AnalysisSummary};
use ringlens_core::detector::Detector;
use ringlens_core::error::{AnalysisError, Result};
use ringlens_core::graph::TxGraph;
use ringlens_core::types::Transaction;
use ringlens_detect::{CycleDetector, LegitimacyClassifier, ShellChainDetector, SmurfingDetector};
use std::time::Instant;
use tracing::{debug, info};

/// Run the complete pipeline over a validated transaction batch.
///
/// Builds the graph, classifies legitimate hubs, runs the three pattern
/// detectors, fuses scores, compiles rings, and assembles the report.
/// All state is local to the call; the report is either complete or the
/// run fails with an error.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyDataset`] when the batch is empty.
pub fn analyze(transactions: &[Transaction]) -> Result<AnalysisReport> {
    if transactions.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    let started = Instant::now();

    let graph = TxGraph::from_transactions(transactions);
    debug!(
        accounts = graph.account_count(),
        edges = graph.edges().len(),
        "graph built"
    );

    let legitimate = LegitimacyClassifier::compute(&graph);
    debug!(
        detector = %LegitimacyClassifier::new().metadata(),
        legitimate = legitimate.len(),
        "legitimacy classified"
    );

    let cycles = CycleDetector::compute(&graph, &legitimate);
    debug!(
        detector = %CycleDetector::new().metadata(),
        cycles = cycles.len(),
        "cycle detection done"
    );

    let smurfing = SmurfingDetector::compute(&graph, &legitimate);
    debug!(
        detector = %SmurfingDetector::new().metadata(),
        fan_in = smurfing.fan_in.len(),
        fan_out = smurfing.fan_out.len(),
        "smurfing detection done"
    );

    let shells = ShellChainDetector::compute(&graph, &legitimate);
    debug!(
        detector = %ShellChainDetector::new().metadata(),
        shells = shells.len(),
        "shell-chain detection done"
    );

    let outcome = ScoringEngine::compute(&graph, &cycles, &smurfing, &shells);
    let payload = GraphPayloadBuilder::compute(
        &graph,
        &outcome.suspicious_accounts,
        &outcome.fraud_rings,
    );

    let summary = AnalysisSummary {
        total_accounts_analyzed: graph.account_count(),
        suspicious_accounts_flagged: outcome.suspicious_accounts.len(),
        fraud_rings_detected: outcome.fraud_rings.len(),
        processing_time_seconds: round2(started.elapsed().as_secs_f64()),
    };
    info!(
        accounts = summary.total_accounts_analyzed,
        flagged = summary.suspicious_accounts_flagged,
        rings = summary.fraud_rings_detected,
        seconds = summary.processing_time_seconds,
        "analysis complete"
    );

    Ok(AnalysisReport {
        analysis: Analysis {
            suspicious_accounts: outcome.suspicious_accounts,
            fraud_rings: outcome.fraud_rings,
            summary,
        },
        graph: payload,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
