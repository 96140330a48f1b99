use chrono::NaiveDateTime;
use tracing::{debug, error, warn};

use crate::commands::{usage, Command};
use crate::config::Settings;
use crate::engine::{ExpenseReceipt, Outcome, Receipt, ReimbursementReceipt};
use crate::models::{parse_log, LedgerError, LedgerTotals, Transaction, TransactionType};
use crate::policy::{auto_request, grant, CapGrant};
use crate::reports::{AvailabilityReport, ExpenseReport, GeneralReport, ReportKind};
use crate::storage::Store;
use crate::types::Amount;

/// Ledger operations over a transaction log.
///
/// Holds no derived state. Every call loads a fresh snapshot, computes from it
/// and, for writes, appends to the store. Callers must not run two calls on the
/// same log at once: a reimbursement reads the month's usage and appends
/// against it as one step (see [`crate::actors::LedgerActor`]).
pub struct LedgerEngine<S: Store> {
    store: S,
    settings: Settings
}

impl<S: Store> LedgerEngine<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            store,
            settings
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current log contents, malformed rows skipped.
    pub fn snapshot(&self) -> Result<Vec<Transaction>, LedgerError> {
        let records = self.store.read_all()
            .inspect_err(|error| error!("Could not read the ledger: {error}"))?;

        Ok(parse_log(records))
    }

    pub fn balance(&self) -> Result<i64, LedgerError> {
        Ok(LedgerTotals::fold(&self.snapshot()?).balance)
    }

    pub fn record_income(&mut self, category: &str, amount: i64, now: NaiveDateTime) -> Result<Receipt, LedgerError> {
        let amount = validate(TransactionType::Income, category, amount)?;
        let mut snapshot = self.snapshot()?;
        let timestamp = next_timestamp(&snapshot, now);

        let transaction = self.append(&mut snapshot, TransactionType::Income, category, amount, timestamp)?;

        Ok(Receipt {
            transaction,
            balance: LedgerTotals::fold(&snapshot).balance
        })
    }

    /// Records an expense, then requests the automatic reimbursement for it.
    ///
    /// The expense stands on its own. A rejected or failed reimbursement is
    /// reported in the receipt and never undoes the expense.
    pub fn record_expense(&mut self, category: &str, amount: i64, now: NaiveDateTime) -> Result<ExpenseReceipt, LedgerError> {
        let amount = validate(TransactionType::Expense, category, amount)?;
        let mut snapshot = self.snapshot()?;
        let timestamp = next_timestamp(&snapshot, now);

        let expense = self.append(&mut snapshot, TransactionType::Expense, category, amount, timestamp)?;

        let reimbursement = auto_request(&self.settings, category, amount)
            .map(|request| self.credit(&mut snapshot, &request.category, request.amount, now, timestamp));

        Ok(ExpenseReceipt {
            expense,
            reimbursement,
            balance: LedgerTotals::fold(&snapshot).balance
        })
    }

    /// Credits up to `amount` to a reimbursable category, clamped to this month's headroom.
    pub fn record_reimbursement(&mut self, category: &str, amount: i64, now: NaiveDateTime) -> Result<ReimbursementReceipt, LedgerError> {
        let amount = validate(TransactionType::Reimbursement, category, amount)?;
        let mut snapshot = self.snapshot()?;
        let timestamp = next_timestamp(&snapshot, now);

        let grant = self.credit(&mut snapshot, category, amount, now, timestamp)?;

        Ok(ReimbursementReceipt {
            grant,
            balance: LedgerTotals::fold(&snapshot).balance
        })
    }

    pub fn general_report(&self) -> Result<GeneralReport, LedgerError> {
        Ok(GeneralReport::build(&self.snapshot()?))
    }

    pub fn expense_report(&self) -> Result<ExpenseReport, LedgerError> {
        Ok(ExpenseReport::build(&self.snapshot()?))
    }

    pub fn availability_report(&self, now: NaiveDateTime) -> Result<AvailabilityReport, LedgerError> {
        Ok(AvailabilityReport::build(&self.snapshot()?, &self.settings, now))
    }

    /// Runs one chat command to completion.
    pub fn execute(&mut self, command: Command, now: NaiveDateTime) -> Result<Outcome, LedgerError> {
        match command {
            Command::Record { transaction_type: TransactionType::Income, category, amount } => {
                self.record_income(&category, amount, now).map(Outcome::Income)
            }
            Command::Record { transaction_type: TransactionType::Expense, category, amount } => {
                self.record_expense(&category, amount, now).map(Outcome::Expense)
            }
            Command::Record { transaction_type: TransactionType::Reimbursement, category, amount } => {
                self.record_reimbursement(&category, amount, now).map(Outcome::Reimbursement)
            }
            Command::Report(ReportKind::General) => self.general_report().map(Outcome::GeneralReport),
            Command::Report(ReportKind::Expenses) => self.expense_report().map(Outcome::ExpenseReport),
            Command::Report(ReportKind::Reimbursements) => self.availability_report(now).map(Outcome::AvailabilityReport),
            Command::Help => Ok(Outcome::Help(usage(&self.settings.caps)))
        }
    }

    /// Checks the cap for `now`'s month and records the credit at `timestamp`, which is always in that same month.
    fn credit(&mut self, snapshot: &mut Vec<Transaction>, category: &str, requested: Amount, now: NaiveDateTime, timestamp: NaiveDateTime) -> Result<CapGrant, LedgerError> {
        let grant = grant(&self.settings.caps, category, requested, snapshot, now)
            .inspect_err(|error| warn!("Reimbursement of {requested} for [{category}] rejected: {error}"))?;

        self.append(snapshot, TransactionType::Reimbursement, &grant.category, grant.credited, timestamp)?;

        if grant.is_partial() {
            debug!("Reimbursement for [{}] partially filled: {} of {}", grant.category, grant.credited, grant.requested);
        }

        Ok(grant)
    }

    fn append(&mut self, snapshot: &mut Vec<Transaction>, transaction_type: TransactionType, category: &str, amount: Amount, timestamp: NaiveDateTime) -> Result<Transaction, LedgerError> {
        let transaction = Transaction::new(timestamp, transaction_type, category, amount);

        self.store.append(&transaction.to_record())
            .inspect_err(|error| error!("Could not append {} [{}] of {}: {error}", transaction.transaction_type, transaction.category, transaction.amount))?;

        debug!("Recorded {} [{}] of {}", transaction.transaction_type, transaction.category, transaction.amount);

        snapshot.push(transaction.clone());

        Ok(transaction)
    }
}

fn validate(transaction_type: TransactionType, category: &str, amount: i64) -> Result<Amount, LedgerError> {
    if category.trim().is_empty() {
        return Err(LedgerError::MissingCategory { transaction_type });
    }

    Amount::try_from(amount)
        .map_err(|source| LedgerError::invalid_amount(transaction_type, category, source))
}

/// Keeps log order non-decreasing when the clock reads slightly behind the last row.
///
/// Only clamps within `now`'s calendar month; a row dated in another month is
/// ignored, so a new transaction never lands outside the month it was checked against.
fn next_timestamp(snapshot: &[Transaction], now: NaiveDateTime) -> NaiveDateTime {
    snapshot.iter()
        .filter(|transaction| transaction.in_month_of(now))
        .map(|transaction| transaction.timestamp)
        .max()
        .map_or(now, |latest| latest.max(now))
}
