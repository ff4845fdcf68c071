//! CSV reading and row normalization.

use crate::columns::ColumnMap;
use chrono::{DateTime, NaiveDateTime};
use ringlens_core::error::{AnalysisError, Result};
use ringlens_core::types::Transaction;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Explicit timestamp formats tried in order before RFC 3339.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Read and normalize transactions from a CSV file.
///
/// # Errors
///
/// Fails with [`AnalysisError::Io`] when the file cannot be opened, plus
/// everything [`read_transactions`] can fail with.
pub fn read_transactions_from_path(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path)?;
    read_transactions(file)
}

/// Read and normalize transactions from any CSV source.
///
/// Headers are resolved through the alias tables; rows with an empty
/// sender or receiver, a non-finite or negative amount, or an
/// unparseable timestamp are skipped. Rows carrying an integer
/// transaction id keep it; all others get their ordinal position.
///
/// # Errors
///
/// Fails with [`AnalysisError::Schema`] when a required column is
/// missing, [`AnalysisError::InvalidInput`] when the CSV itself is
/// malformed, and [`AnalysisError::EmptyDataset`] when no row survives.
pub fn read_transactions(source: impl Read) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AnalysisError::invalid_input(format!("unreadable CSV header: {e}")))?
        .iter()
        .map(ToString::to_string)
        .collect();
    let columns = ColumnMap::resolve(&headers)?;

    let mut transactions = Vec::new();
    let mut skipped = 0usize;
    for (row_index, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| AnalysisError::invalid_input(format!("unreadable CSV row: {e}")))?;
        match parse_row(&record, &columns, row_index as u64) {
            Some(tx) => transactions.push(tx),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = transactions.len(), "skipped malformed rows");
    }
    if transactions.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }
    Ok(transactions)
}

/// Normalize one row; `None` means the row is skipped.
fn parse_row(record: &csv::StringRecord, columns: &ColumnMap, ordinal: u64) -> Option<Transaction> {
    let sender = record.get(columns.sender)?.trim();
    let receiver = record.get(columns.receiver)?.trim();
    if sender.is_empty() || receiver.is_empty() {
        return None;
    }

    let amount: f64 = record.get(columns.amount)?.trim().parse().ok()?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }

    let timestamp = parse_timestamp(record.get(columns.timestamp)?.trim())?;

    let id = columns
        .transaction_id
        .and_then(|i| record.get(i))
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(ordinal);

    Some(Transaction {
        id,
        sender: sender.to_string(),
        receiver: receiver.to_string(),
        amount,
        timestamp,
    })
}

/// Parse a timestamp as epoch seconds, trying the explicit formats in
/// order and falling back to RFC 3339. Formats without an offset are
/// read as UTC.
fn parse_timestamp(raw: &str) -> Option<i64> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp());
        }
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> Result<Vec<Transaction>> {
        read_transactions(csv.as_bytes())
    }

    #[test]
    fn test_canonical_csv_parses() {
        let txs = read(
            "transaction_id,sender_id,receiver_id,amount,timestamp\n\
             7,A,B,100.50,2024-01-15 10:30:00\n\
             8,B,C,25.00,2024-01-15 11:00:00\n",
        )
        .unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, 7);
        assert_eq!(txs[0].sender, "A");
        assert_eq!(txs[0].receiver, "B");
        assert_eq!(txs[0].amount, 100.50);
        assert_eq!(txs[1].timestamp - txs[0].timestamp, 1800);
    }

    #[test]
    fn test_aliased_headers_parse() {
        let txs = read(
            "From,To,Value,Time\n\
             A,B,10,2024-01-15T10:30:00\n",
        )
        .unwrap();
        assert_eq!(txs.len(), 1);
        // No id column: ordinal position is used.
        assert_eq!(txs[0].id, 0);
    }

    #[test]
    fn test_all_timestamp_formats_accepted() {
        let txs = read(
            "from,to,amount,timestamp\n\
             A,B,1,2024-01-15 10:30:00\n\
             A,B,1,2024-01-15T10:30:00\n\
             A,B,1,2024/01/15 10:30:00\n\
             A,B,1,2024-01-15 10:30\n\
             A,B,1,2024-01-15T10:30:00+00:00\n",
        )
        .unwrap();

        assert_eq!(txs.len(), 5);
        assert!(txs.iter().all(|t| t.timestamp == txs[0].timestamp));
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let txs = read(
            "from,to,amount,timestamp\n\
             A,B,100,2024-01-15 10:30:00\n\
             ,B,100,2024-01-15 10:30:00\n\
             A,,100,2024-01-15 10:30:00\n\
             A,B,not-a-number,2024-01-15 10:30:00\n\
             A,B,-5,2024-01-15 10:30:00\n\
             A,B,100,yesterday\n\
             C,D,50,2024-01-15 12:00:00\n",
        )
        .unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].sender, "A");
        assert_eq!(txs[1].sender, "C");
    }

    #[test]
    fn test_non_integer_id_falls_back_to_ordinal() {
        let txs = read(
            "id,from,to,amount,timestamp\n\
             tx-abc,A,B,10,2024-01-15 10:30:00\n\
             42,B,C,10,2024-01-15 10:31:00\n",
        )
        .unwrap();

        assert_eq!(txs[0].id, 0);
        assert_eq!(txs[1].id, 42);
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let err = read("from,to,amount\nA,B,10\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn test_all_rows_bad_is_empty_dataset() {
        let err = read(
            "from,to,amount,timestamp\n\
             ,B,100,2024-01-15 10:30:00\n\
             A,B,bad,2024-01-15 10:30:00\n",
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }

    #[test]
    fn test_zero_amount_kept() {
        let txs = read("from,to,amount,timestamp\nA,B,0,2024-01-15 10:30:00\n").unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, 0.0);
    }
}
