use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::{LedgerError, Transaction};
use crate::policy::CapGrant;
use crate::reports::{AvailabilityReport, ExpenseReport, GeneralReport};

/// A recorded income, with the balance re-derived right after the append.
#[derive(Debug)]
pub struct Receipt {
    pub transaction: Transaction,
    pub balance: i64
}

/// A recorded expense and, for reimbursable categories, the automatic reimbursement attempt.
#[derive(Debug)]
pub struct ExpenseReceipt {
    pub expense: Transaction,
    /// `None` when the category is not reimbursable (or the share rounds to nothing).
    pub reimbursement: Option<Result<CapGrant, LedgerError>>,
    pub balance: i64
}

#[derive(Debug)]
pub struct ReimbursementReceipt {
    pub grant: CapGrant,
    pub balance: i64
}

/// Everything a chat command can produce.
#[derive(Debug)]
pub enum Outcome {
    Income(Receipt),
    Expense(ExpenseReceipt),
    Reimbursement(ReimbursementReceipt),
    GeneralReport(GeneralReport),
    ExpenseReport(ExpenseReport),
    AvailabilityReport(AvailabilityReport),
    Help(String)
}

fn write_grant(formatter: &mut Formatter<'_>, grant: &CapGrant) -> fmt::Result {
    if grant.is_partial() {
        write!(
            formatter,
            "Reimbursement credited: {} {} of {} requested, the monthly cap of {} is now reached.",
            grant.category, grant.credited, grant.requested, grant.cap
        )
    } else {
        write!(
            formatter,
            "Reimbursement credited: {} {}, {} left this month.",
            grant.category, grant.credited, grant.remaining
        )
    }
}

impl Display for Outcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Income(receipt) => write!(
                formatter,
                "Income recorded: {} {}.\nBalance: {}",
                receipt.transaction.category, receipt.transaction.amount, receipt.balance
            ),
            Outcome::Expense(receipt) => {
                writeln!(formatter, "Expense recorded: {} {}.", receipt.expense.category, receipt.expense.amount)?;

                match &receipt.reimbursement {
                    Some(Ok(grant)) => {
                        write_grant(formatter, grant)?;
                        writeln!(formatter)?;
                    }
                    Some(Err(error)) => writeln!(formatter, "No reimbursement: {error}")?,
                    None => {}
                }

                write!(formatter, "Balance: {}", receipt.balance)
            }
            Outcome::Reimbursement(receipt) => {
                write_grant(formatter, &receipt.grant)?;
                write!(formatter, "\nBalance: {}", receipt.balance)
            }
            Outcome::GeneralReport(report) => Display::fmt(report, formatter),
            Outcome::ExpenseReport(report) => Display::fmt(report, formatter),
            Outcome::AvailabilityReport(report) => Display::fmt(report, formatter),
            Outcome::Help(text) => formatter.write_str(text)
        }
    }
}
