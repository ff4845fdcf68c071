//! Multi-signal suspicion scoring and ring compilation.
//!
//! Fuses the three detector outputs into per-account scores, then groups
//! flagged accounts into rings with a run-wide sequential id counter.

use crate::types::{FraudRing, RingPatternType, SuspicionRecord, NO_RING};
use ringlens_core::detector::{Detector, DetectorMetadata};
use ringlens_core::graph::{Account, TxGraph};
use ringlens_core::types::Pattern;
use ringlens_detect::smurfing::SmurfingResult;
use std::collections::{BTreeSet, HashMap};

/// Event rate (events per hour) above which the velocity bonus applies.
const VELOCITY_RATE_PER_HOUR: f64 = 2.0;
/// Score added by the velocity bonus.
const VELOCITY_BONUS: f64 = 15.0;
/// Score added when an account shows two or more pattern root categories.
const DIVERSITY_BONUS: f64 = 10.0;

/// Ring risk bonus per pattern family.
const CYCLE_RING_BONUS: f64 = 20.0;
const SMURFING_RING_BONUS: f64 = 15.0;
const SHELL_RING_BONUS: f64 = 10.0;

/// Minimum scored members for a cycle to become a ring.
const MIN_CYCLE_RING_MEMBERS: usize = 3;

/// Scores and rings produced by one scoring pass.
#[derive(Debug, Clone, Default)]
pub struct ScoringOutcome {
    /// Flagged accounts, sorted descending by score (stable).
    pub suspicious_accounts: Vec<SuspicionRecord>,
    /// Rings, sorted descending by risk score (stable).
    pub fraud_rings: Vec<FraudRing>,
}

/// Fuses detected patterns into account scores and ring groupings.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    metadata: DetectorMetadata,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringEngine {
    /// Create a new scoring engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            metadata: DetectorMetadata::new("engine/scoring")
                .with_description("Multi-signal score fusion and ring compilation"),
        }
    }

    /// Base score contribution of one pattern instance.
    #[must_use]
    pub const fn base_score(pattern: Pattern) -> f64 {
        match pattern {
            Pattern::Cycle3 => 40.0,
            Pattern::Cycle4 => 35.0,
            Pattern::Cycle5 => 30.0,
            Pattern::FanInSmurfing => 25.0,
            Pattern::FanOutSmurfing => 25.0,
            Pattern::ShellChain => 20.0,
            // Never accumulated as a base pattern; applied as a bonus.
            Pattern::HighVelocity => 0.0,
        }
    }

    /// Score all flagged accounts and compile rings.
    ///
    /// Accounts with zero patterns never appear in the output. Detector
    /// inputs already exclude legitimate accounts, so no legitimate
    /// account can gain a score here.
    #[must_use]
    pub fn compute(
        graph: &TxGraph,
        cycles: &[Vec<String>],
        smurfing: &SmurfingResult,
        shells: &[String],
    ) -> ScoringOutcome {
        let mut scores: HashMap<String, f64> = HashMap::new();
        let mut patterns: HashMap<String, BTreeSet<Pattern>> = HashMap::new();

        let add = |scores: &mut HashMap<String, f64>,
                   patterns: &mut HashMap<String, BTreeSet<Pattern>>,
                   id: &String,
                   pattern: Pattern| {
            *scores.entry(id.clone()).or_default() += Self::base_score(pattern);
            patterns.entry(id.clone()).or_default().insert(pattern);
        };

        // Cycle membership accumulates once per cycle the account is in.
        for cycle in cycles {
            let Some(pattern) = Pattern::cycle(cycle.len()) else {
                continue;
            };
            for member in cycle {
                add(&mut scores, &mut patterns, member, pattern);
            }
        }
        for id in &smurfing.fan_in {
            add(&mut scores, &mut patterns, id, Pattern::FanInSmurfing);
        }
        for id in &smurfing.fan_out {
            add(&mut scores, &mut patterns, id, Pattern::FanOutSmurfing);
        }
        for id in shells {
            add(&mut scores, &mut patterns, id, Pattern::ShellChain);
        }

        // Bonuses apply only to pattern-bearing accounts.
        for (id, labels) in &mut patterns {
            let Some(score) = scores.get_mut(id) else {
                continue;
            };
            if let Some(account) = graph.account(id) {
                if Self::event_rate(account) > VELOCITY_RATE_PER_HOUR {
                    *score += VELOCITY_BONUS;
                    labels.insert(Pattern::HighVelocity);
                }
            }
            let roots: BTreeSet<&str> = labels.iter().map(Pattern::root).collect();
            if roots.len() >= 2 {
                *score += DIVERSITY_BONUS;
            }
            *score = round1(score.clamp(0.0, 100.0));
        }

        let mut fraud_rings = Self::compile_rings(&scores, cycles, smurfing, shells);

        // Earliest ring containing an account wins its ring_id.
        let mut assignment: HashMap<&str, &str> = HashMap::new();
        for ring in &fraud_rings {
            for member in &ring.member_accounts {
                assignment
                    .entry(member.as_str())
                    .or_insert(ring.ring_id.as_str());
            }
        }

        let mut suspicious_accounts: Vec<SuspicionRecord> = graph
            .account_ids()
            .filter_map(|id| {
                let labels = patterns.get(id)?;
                let mut detected: Vec<String> =
                    labels.iter().map(|p| p.as_label().to_string()).collect();
                detected.sort();
                Some(SuspicionRecord {
                    account_id: id.clone(),
                    suspicion_score: scores[id],
                    detected_patterns: detected,
                    ring_id: assignment
                        .get(id.as_str())
                        .map_or_else(|| NO_RING.to_string(), |rid| (*rid).to_string()),
                })
            })
            .collect();

        // Stable sorts: ties keep discovery order.
        suspicious_accounts.sort_by(|a, b| {
            b.suspicion_score
                .partial_cmp(&a.suspicion_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        fraud_rings.sort_by(|a, b| {
            b.risk_score
                .partial_cmp(&a.risk_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ScoringOutcome {
            suspicious_accounts,
            fraud_rings,
        }
    }

    /// Compile rings in fixed order: one ring per qualifying cycle in
    /// discovery order, then one smurfing ring, then one shell ring.
    fn compile_rings(
        scores: &HashMap<String, f64>,
        cycles: &[Vec<String>],
        smurfing: &SmurfingResult,
        shells: &[String],
    ) -> Vec<FraudRing> {
        let mut rings: Vec<FraudRing> = Vec::new();
        let mut ringed: std::collections::HashSet<String> = std::collections::HashSet::new();
        let mut counter = 0u32;

        for cycle in cycles {
            let mut members: Vec<String> = cycle
                .iter()
                .filter(|m| scores.get(*m).copied().unwrap_or(0.0) > 0.0)
                .cloned()
                .collect();
            if members.len() < MIN_CYCLE_RING_MEMBERS {
                continue;
            }
            members.sort();
            members.dedup();
            counter += 1;
            let risk = ring_risk(scores, &members, CYCLE_RING_BONUS);
            ringed.extend(members.iter().cloned());
            rings.push(FraudRing {
                ring_id: ring_id(counter),
                pattern_type: RingPatternType::Cycle,
                member_accounts: members,
                risk_score: risk,
            });
        }

        let mut smurf_members: Vec<String> = smurfing
            .accounts
            .iter()
            .filter(|id| !ringed.contains(*id))
            .cloned()
            .collect();
        if !smurf_members.is_empty() {
            smurf_members.sort();
            smurf_members.dedup();
            counter += 1;
            let risk = ring_risk(scores, &smurf_members, SMURFING_RING_BONUS);
            ringed.extend(smurf_members.iter().cloned());
            rings.push(FraudRing {
                ring_id: ring_id(counter),
                pattern_type: RingPatternType::Smurfing,
                member_accounts: smurf_members,
                risk_score: risk,
            });
        }

        let mut shell_members: Vec<String> = shells
            .iter()
            .filter(|id| !ringed.contains(*id))
            .cloned()
            .collect();
        if !shell_members.is_empty() {
            shell_members.sort();
            shell_members.dedup();
            counter += 1;
            let risk = ring_risk(scores, &shell_members, SHELL_RING_BONUS);
            rings.push(FraudRing {
                ring_id: ring_id(counter),
                pattern_type: RingPatternType::Shell,
                member_accounts: shell_members,
                risk_score: risk,
            });
        }

        rings
    }

    /// Events per hour over the account's active span; spans under one
    /// hour are treated as one hour.
    fn event_rate(account: &Account) -> f64 {
        if account.timestamps.is_empty() {
            return 0.0;
        }
        let min = account.timestamps.iter().min().copied().unwrap_or(0);
        let max = account.timestamps.iter().max().copied().unwrap_or(0);
        let span_hours = (max - min) as f64 / 3600.0;
        account.timestamps.len() as f64 / span_hours.max(1.0)
    }
}

impl Detector for ScoringEngine {
    fn metadata(&self) -> &DetectorMetadata {
        &self.metadata
    }
}

fn ring_id(counter: u32) -> String {
    format!("RING_{counter:03}")
}

fn ring_risk(scores: &HashMap<String, f64>, members: &[String], bonus: f64) -> f64 {
    let sum: f64 = members
        .iter()
        .map(|m| scores.get(m).copied().unwrap_or(0.0))
        .sum();
    let mean = sum / members.len() as f64;
    round1(mean + bonus).clamp(0.0, 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
