use chrono::NaiveDateTime;

use crate::config::{CapTable, CategoryCap};
use crate::models::{LedgerError, Transaction, TransactionType};
use crate::types::Amount;

/// A reimbursement request the cap allows, possibly for less than was asked.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CapGrant {
    /// Configured spelling of the category.
    pub category: String,
    pub requested: Amount,
    pub credited: Amount,
    pub cap: Amount,
    /// Headroom left this month once `credited` is recorded.
    pub remaining: i64
}

impl CapGrant {
    pub fn is_partial(&self) -> bool {
        self.credited < self.requested
    }
}

/// Sum of reimbursements for `cap`'s category in the calendar month of `now`.
///
/// The monthly window is derived from timestamps on every read, there is no reset job.
pub fn monthly_reimbursed(transactions: &[Transaction], cap: &CategoryCap, now: NaiveDateTime) -> i64 {
    let category = cap.category.to_lowercase();

    transactions.iter()
        .filter(|transaction| transaction.transaction_type == TransactionType::Reimbursement)
        .filter(|transaction| transaction.in_month_of(now))
        .filter(|transaction| transaction.category.to_lowercase() == category)
        .fold(0i64, |used, transaction| used.saturating_add(transaction.amount.get()))
}

/// Cap minus this month's reimbursements. Negative when the cap was lowered after use.
pub fn remaining_cap(transactions: &[Transaction], cap: &CategoryCap, now: NaiveDateTime) -> i64 {
    cap.limit.get().saturating_sub(monthly_reimbursed(transactions, cap, now))
}

/// Decides how much of `requested` can be credited to `category` this month.
///
/// # Errors
/// - `InvalidCategory` if the category has no configured cap.
/// - `CapExhausted` if no headroom is left. Any positive headroom is granted,
///   clamped to what remains (partial fill).
pub fn grant(caps: &CapTable, category: &str, requested: Amount, transactions: &[Transaction], now: NaiveDateTime) -> Result<CapGrant, LedgerError> {
    let cap = caps.resolve(category)
        .ok_or_else(|| LedgerError::invalid_category(category, caps))?;

    let Ok(available) = Amount::try_from(remaining_cap(transactions, cap, now)) else {
        return Err(LedgerError::cap_exhausted(cap));
    };

    let credited = requested.min(available);

    Ok(CapGrant {
        category: cap.category.clone(),
        requested,
        credited,
        cap: cap.limit,
        remaining: available.get() - credited.get()
    })
}
