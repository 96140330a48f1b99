use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::{CategoryTotal, LedgerTotals, Transaction, TransactionType};

/// Expense totals only, without income or reimbursements.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ExpenseReport {
    pub categories: Vec<CategoryTotal>,
    pub total: i64
}

impl ExpenseReport {
    pub fn build(transactions: &[Transaction]) -> Self {
        let totals = LedgerTotals::fold(transactions);

        Self {
            categories: totals.categories(TransactionType::Expense).cloned().collect(),
            total: totals.type_total(TransactionType::Expense)
        }
    }
}

impl Display for ExpenseReport {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Expenses:")?;

        for total in &self.categories {
            write!(formatter, "\n  {}: {}", total.category, total.amount)?;
        }

        write!(formatter, "\n  Total: {}", self.total)
    }
}
