use thiserror::Error;

use crate::config::{CapTable, CategoryCap};
use crate::models::TransactionType;
use crate::storage::StoreError;
use crate::types::{Amount, AmountError};

/// A historical row that cannot be turned into a [`crate::models::Transaction`].
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed record: invalid timestamp [{value}]")]
    InvalidTimestamp {
        value: String
    },
    #[error("Malformed record: unknown transaction type [{value}]")]
    UnknownType {
        value: String
    },
    #[error("Malformed record: missing category")]
    MissingCategory,
    #[error("Malformed record: invalid amount [{value}]: {source}")]
    InvalidAmount {
        value: String,
        source: AmountError
    },
    #[error("Malformed record: totals overflow")]
    Overflow
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount for {transaction_type} [{category}]: {source}")]
    InvalidAmount {
        transaction_type: TransactionType,
        category: String,
        source: AmountError
    },
    #[error("Category cannot be empty for {transaction_type}")]
    MissingCategory {
        transaction_type: TransactionType
    },
    #[error("[{category}] is not a reimbursable category. Valid categories: {names}", names = .valid.join(", "))]
    InvalidCategory {
        category: String,
        valid: Vec<String>
    },
    #[error("The monthly reimbursement cap of {cap} for [{category}] is already used up")]
    CapExhausted {
        category: String,
        cap: Amount
    },
    #[error("The ledger is unavailable right now, please try again")]
    StoreUnavailable(#[from] StoreError),
    #[error("The ledger is shutting down, please try again")]
    Stopped
}

impl LedgerError {
    pub fn invalid_amount(transaction_type: TransactionType, category: &str, source: AmountError) -> Self {
        Self::InvalidAmount {
            transaction_type,
            category: category.to_string(),
            source
        }
    }

    pub fn invalid_category(category: &str, caps: &CapTable) -> Self {
        Self::InvalidCategory {
            category: category.to_string(),
            valid: caps.names().map(str::to_string).collect()
        }
    }

    pub fn cap_exhausted(cap: &CategoryCap) -> Self {
        Self::CapExhausted {
            category: cap.category.clone(),
            cap: cap.limit
        }
    }
}
