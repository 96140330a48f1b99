use std::collections::HashMap;

use tracing::warn;

use crate::models::{RecordError, Transaction, TransactionType};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CategoryTotal {
    pub transaction_type: TransactionType,
    pub category: String,
    pub amount: i64
}

/// Balance and all-time totals folded from the whole transaction log.
///
/// Never stored; rebuilt from a log snapshot every time it is needed so it
/// cannot drift from what the log actually says.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct LedgerTotals {
    /// Income minus expenses plus reimbursements.
    pub balance: i64,
    /// Per (type, category) totals in order of first appearance.
    categories: Vec<CategoryTotal>,
    index: HashMap<(TransactionType, String), usize>,
    type_totals: HashMap<TransactionType, i64>
}

impl LedgerTotals {
    pub fn fold(transactions: &[Transaction]) -> Self {
        let mut totals = LedgerTotals::default();

        for transaction in transactions {
            if let Err(error) = totals.add(transaction) {
                warn!("Skipping {} [{}] of {} at {}: {error}", transaction.transaction_type, transaction.category, transaction.amount, transaction.timestamp);
            }
        }

        totals
    }

    /// Totals per category for one transaction type, in first-seen order.
    pub fn categories(&self, transaction_type: TransactionType) -> impl Iterator<Item = &CategoryTotal> {
        self.categories.iter().filter(move |total| total.transaction_type == transaction_type)
    }

    pub fn type_total(&self, transaction_type: TransactionType) -> i64 {
        self.type_totals.get(&transaction_type).copied().unwrap_or(0)
    }

    fn add(&mut self, transaction: &Transaction) -> Result<(), RecordError> {
        let amount = transaction.amount.get();
        let key = (transaction.transaction_type, transaction.category.clone());
        let slot = self.index.get(&key).copied();

        // Work out every new value before touching state so an overflow leaves no partial update.
        let balance = self.balance.checked_add(transaction.transaction_type.sign() * amount)
            .ok_or(RecordError::Overflow)?;
        let type_total = self.type_total(transaction.transaction_type).checked_add(amount)
            .ok_or(RecordError::Overflow)?;
        let category_total = slot.map_or(0, |position| self.categories[position].amount).checked_add(amount)
            .ok_or(RecordError::Overflow)?;

        self.balance = balance;
        self.type_totals.insert(transaction.transaction_type, type_total);

        match slot {
            Some(position) => self.categories[position].amount = category_total,
            None => {
                self.index.insert(key, self.categories.len());
                self.categories.push(CategoryTotal {
                    transaction_type: transaction.transaction_type,
                    category: transaction.category.clone(),
                    amount: category_total
                });
            }
        }

        Ok(())
    }
}
