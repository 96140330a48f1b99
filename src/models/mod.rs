mod errors;
mod totals;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use errors::{LedgerError, RecordError};
pub use totals::{CategoryTotal, LedgerTotals};
pub use transaction::{parse_log, LogRecord, Transaction, TIMESTAMP_FORMAT};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Reimbursement
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Reimbursement
    ];

    /// Direction this type moves the balance in.
    pub fn sign(self) -> i64 {
        match self {
            TransactionType::Income | TransactionType::Reimbursement => 1,
            TransactionType::Expense => -1
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
            TransactionType::Reimbursement => "Reimbursement"
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = RecordError;

    //NOTE: Older ledgers were kept with Spanish section names, those rows are still valid history.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "income" | "ingreso" | "ingresos" => Ok(TransactionType::Income),
            "expense" | "gasto" | "gastos" => Ok(TransactionType::Expense),
            "reimbursement" | "reintegro" | "reintegros" => Ok(TransactionType::Reimbursement),
            _ => Err(RecordError::UnknownType { value: value.to_string() })
        }
    }
}
