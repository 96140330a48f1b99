use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;

use crate::config::Settings;
use crate::models::Transaction;
use crate::policy::{monthly_reimbursed, remaining_cap, spend_headroom};
use crate::types::Amount;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AvailabilityLine {
    pub category: String,
    pub cap: Amount,
    pub used: i64,
    pub remaining: i64,
    /// Spending that would still be reimbursed in full at the configured fraction.
    pub spend_headroom: i64
}

/// Remaining reimbursement headroom per configured category for one calendar month.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AvailabilityReport {
    pub year: i32,
    pub month: u32,
    pub fraction: Decimal,
    pub lines: Vec<AvailabilityLine>
}

impl AvailabilityReport {
    /// `now` decides the month; callers pass the current time, never a remembered one.
    pub fn build(transactions: &[Transaction], settings: &Settings, now: NaiveDateTime) -> Self {
        let lines = settings.caps.iter()
            .map(|cap| {
                let remaining = remaining_cap(transactions, cap, now);

                AvailabilityLine {
                    category: cap.category.clone(),
                    cap: cap.limit,
                    used: monthly_reimbursed(transactions, cap, now),
                    remaining,
                    spend_headroom: spend_headroom(remaining, settings.reimbursement_fraction)
                }
            })
            .collect();

        Self {
            year: now.year(),
            month: now.month(),
            fraction: settings.reimbursement_fraction,
            lines
        }
    }
}

impl Display for AvailabilityReport {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let percent = (self.fraction * Decimal::ONE_HUNDRED).normalize();

        write!(formatter, "Reimbursements for {:04}-{:02} ({percent}% of eligible expenses):", self.year, self.month)?;

        for line in &self.lines {
            write!(
                formatter,
                "\n  {}: {} of {} left, spend up to {}",
                line.category,
                line.remaining.max(0),
                line.cap,
                line.spend_headroom
            )?;
        }

        Ok(())
    }
}
