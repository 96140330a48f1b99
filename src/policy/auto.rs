use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::config::Settings;
use crate::types::Amount;

/// A reimbursement derived from a qualifying expense, not yet checked against the cap.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AutoRequest {
    pub category: String,
    pub amount: Amount
}

/// `floor(expense * fraction)`, or `None` when that rounds down to nothing.
pub fn candidate_amount(expense: Amount, fraction: Decimal) -> Option<Amount> {
    Decimal::from(expense.get())
        .checked_mul(fraction)
        .map(|value| value.floor())
        .and_then(|value| value.to_i64())
        .and_then(|value| Amount::try_from(value).ok())
}

/// Builds the automatic reimbursement request for an expense, if its category is reimbursable.
pub fn auto_request(settings: &Settings, category: &str, expense: Amount) -> Option<AutoRequest> {
    let cap = settings.caps.resolve(category)?;
    let amount = candidate_amount(expense, settings.reimbursement_fraction)?;

    Some(AutoRequest {
        category: cap.category.clone(),
        amount
    })
}

/// How much more can be spent and still be fully reimbursed at `fraction`.
pub fn spend_headroom(remaining: i64, fraction: Decimal) -> i64 {
    if remaining <= 0 {
        return 0;
    }

    Decimal::from(remaining)
        .checked_div(fraction)
        .map(|value| value.floor())
        .and_then(|value| value.to_i64())
        .unwrap_or(i64::MAX)
}
