use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::{LedgerTotals, Transaction, TransactionType};

/// Balance followed by all-time totals per type and category.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GeneralReport {
    pub totals: LedgerTotals
}

impl GeneralReport {
    pub fn build(transactions: &[Transaction]) -> Self {
        Self {
            totals: LedgerTotals::fold(transactions)
        }
    }
}

impl Display for GeneralReport {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Balance: {}", self.totals.balance)?;

        for transaction_type in TransactionType::ALL {
            write!(formatter, "\n\n{transaction_type}:")?;

            for total in self.totals.categories(transaction_type) {
                write!(formatter, "\n  {}: {}", total.category, total.amount)?;
            }

            write!(formatter, "\n  Total: {}", self.totals.type_total(transaction_type))?;
        }

        Ok(())
    }
}
