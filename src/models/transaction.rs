use chrono::{DateTime, Datelike, NaiveDateTime};
use tracing::warn;

use crate::models::{RecordError, TransactionType};
use crate::types::Amount;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single row of the transaction log exactly as the store holds it.
///
/// Every field is kept as text and may be empty, so rows written by hand or
/// exported from a spreadsheet still load and get judged by
/// [`Transaction::try_from`] rather than failing the whole read.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LogRecord {
    pub timestamp: String,
    pub transaction_type: String,
    pub category: String,
    pub amount: String
}

/// A validated, immutable money movement.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transaction {
    pub timestamp: NaiveDateTime,
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: Amount
}

impl Transaction {
    pub fn new(timestamp: NaiveDateTime, transaction_type: TransactionType, category: &str, amount: Amount) -> Self {
        Self {
            timestamp,
            transaction_type,
            category: category.trim().to_string(),
            amount
        }
    }

    /// True when this transaction falls in the same calendar month and year as `now`.
    pub fn in_month_of(&self, now: NaiveDateTime) -> bool {
        self.timestamp.year() == now.year() && self.timestamp.month() == now.month()
    }

    pub fn to_record(&self) -> LogRecord {
        LogRecord {
            timestamp: self.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            transaction_type: self.transaction_type.to_string(),
            category: self.category.clone(),
            amount: self.amount.to_string()
        }
    }
}

impl TryFrom<LogRecord> for Transaction {
    type Error = RecordError;

    fn try_from(record: LogRecord) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&record.timestamp)?;
        let transaction_type = record.transaction_type.parse()?;

        let category = record.category.trim();
        if category.is_empty() {
            return Err(RecordError::MissingCategory);
        }

        let amount = record.amount.parse::<Amount>()
            .map_err(|source| RecordError::InvalidAmount { value: record.amount.clone(), source })?;

        Ok(Transaction::new(timestamp, transaction_type, category, amount))
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, RecordError> {
    let value = value.trim();

    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|parsed| parsed.naive_local()))
        .map_err(|_| RecordError::InvalidTimestamp { value: value.to_string() })
}

/// Converts a raw log snapshot into typed transactions.
///
/// Malformed rows are skipped and logged; one bad historical row must never
/// take reporting down with it.
pub fn parse_log(records: Vec<LogRecord>) -> Vec<Transaction> {
    let mut transactions = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        match Transaction::try_from(record) {
            Ok(transaction) => transactions.push(transaction),
            Err(error) => warn!("Skipping ledger row [{}]: {error}", index + 1)
        }
    }

    transactions
}
