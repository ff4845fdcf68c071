//! Core transaction and pattern-label types.

use serde::Serialize;
use std::fmt;

/// A validated financial transaction.
///
/// Produced once by ingest and never mutated. Account ids are opaque
/// strings; timestamps are Unix epoch seconds.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Transaction id (resolved from the input when present, else the
    /// surviving-row ordinal).
    pub id: u64,
    /// Sending account id.
    pub sender: String,
    /// Receiving account id.
    pub receiver: String,
    /// Transfer amount (non-negative).
    pub amount: f64,
    /// Timestamp (Unix epoch seconds).
    pub timestamp: i64,
}

/// A detected fraud pattern label.
///
/// Labels render in the output contract as lowercase snake-case strings;
/// the text before the first underscore is the pattern's root category,
/// used for the scoring diversity bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pattern {
    /// Member of a length-3 directed cycle.
    Cycle3,
    /// Member of a length-4 directed cycle.
    Cycle4,
    /// Member of a length-5 directed cycle.
    Cycle5,
    /// Fan-in structuring: many distinct senders in a dense time window.
    FanInSmurfing,
    /// Fan-out structuring: many distinct receivers.
    FanOutSmurfing,
    /// Interior node of a low-activity pass-through chain.
    ShellChain,
    /// Unusually high event rate.
    HighVelocity,
}

impl Pattern {
    /// Pattern label for a cycle of the given length (3 to 5).
    #[must_use]
    pub fn cycle(len: usize) -> Option<Self> {
        match len {
            3 => Some(Pattern::Cycle3),
            4 => Some(Pattern::Cycle4),
            5 => Some(Pattern::Cycle5),
            _ => None,
        }
    }

    /// The label string as rendered in reports.
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            Pattern::Cycle3 => "cycle_length_3",
            Pattern::Cycle4 => "cycle_length_4",
            Pattern::Cycle5 => "cycle_length_5",
            Pattern::FanInSmurfing => "fan_in_smurfing",
            Pattern::FanOutSmurfing => "fan_out_smurfing",
            Pattern::ShellChain => "shell_chain",
            Pattern::HighVelocity => "high_velocity",
        }
    }

    /// Root category: the label text before the first underscore.
    #[must_use]
    pub fn root(&self) -> &'static str {
        let label = self.as_label();
        label.split('_').next().unwrap_or(label)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl Serialize for Pattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_label())
    }
}
