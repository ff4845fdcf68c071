//! Header resolution against per-field alias tables.

use ringlens_core::error::{AnalysisError, Result};

/// Logical fields a transaction row must (or may) provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalField {
    /// Sending account id. Required.
    SenderId,
    /// Receiving account id. Required.
    ReceiverId,
    /// Transfer amount. Required.
    Amount,
    /// Transaction timestamp. Required.
    Timestamp,
    /// Transaction id. Optional; rows without it get an ordinal id.
    TransactionId,
}

impl LogicalField {
    /// Canonical field name used in schema errors.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            LogicalField::SenderId => "sender_id",
            LogicalField::ReceiverId => "receiver_id",
            LogicalField::Amount => "amount",
            LogicalField::Timestamp => "timestamp",
            LogicalField::TransactionId => "transaction_id",
        }
    }

    /// Accepted header spellings, matched case-insensitively after
    /// trimming whitespace.
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            LogicalField::SenderId => {
                &["sender_id", "from", "from_account", "source", "source_id"]
            }
            LogicalField::ReceiverId => {
                &["receiver_id", "to", "to_account", "target", "target_id"]
            }
            LogicalField::Amount => {
                &["amount", "value", "txn_amount", "transaction_amount"]
            }
            LogicalField::Timestamp => {
                &["timestamp", "time", "datetime", "txn_time", "transaction_time"]
            }
            LogicalField::TransactionId => &["transaction_id", "txn_id", "tx_id", "id"],
        }
    }

    fn resolve(self, headers: &[String]) -> Option<usize> {
        headers.iter().position(|header| {
            let header = header.trim();
            self.aliases()
                .iter()
                .any(|alias| header.eq_ignore_ascii_case(alias))
        })
    }
}

/// Resolved column indices for one CSV header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    /// Sender column index.
    pub sender: usize,
    /// Receiver column index.
    pub receiver: usize,
    /// Amount column index.
    pub amount: usize,
    /// Timestamp column index.
    pub timestamp: usize,
    /// Transaction-id column index, when present.
    pub transaction_id: Option<usize>,
}

impl ColumnMap {
    /// Resolve the four required fields (and the optional id field)
    /// against a header row. The first header matching any alias of a
    /// field wins; a required field with no match is a schema error.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let required = |field: LogicalField| {
            field
                .resolve(headers)
                .ok_or_else(|| AnalysisError::schema(field.name(), headers.to_vec()))
        };

        Ok(Self {
            sender: required(LogicalField::SenderId)?,
            receiver: required(LogicalField::ReceiverId)?,
            amount: required(LogicalField::Amount)?,
            timestamp: required(LogicalField::Timestamp)?,
            transaction_id: LogicalField::TransactionId.resolve(headers),
        })
    }
}
