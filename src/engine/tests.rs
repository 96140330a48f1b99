use super::{LedgerEngine, Outcome};

use std::io;

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::commands::Command;
use crate::config::{CapTable, CategoryCap, Settings};
use crate::models::{LedgerError, LogRecord, TransactionType};
use crate::reports::ReportKind;
use crate::storage::{MemoryStore, Store, StoreError};
use crate::types::Amount;

fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .expect("valid test date")
}

fn create_settings() -> Result<Settings> {
    let caps = CapTable::new(vec![
        CategoryCap { category: "Supermercado".to_string(), limit: Amount::try_from(400_000)? },
        CategoryCap { category: "Farmacia".to_string(), limit: Amount::try_from(150_000)? }
    ])?;

    Ok(Settings::new(caps, Decimal::new(4, 1))?)
}

fn create_engine() -> Result<LedgerEngine<MemoryStore>> {
    Ok(LedgerEngine::new(MemoryStore::new(), create_settings()?))
}

/// Serves reads from memory and starts failing appends after `appends_allowed` writes.
struct FlakyStore {
    inner: MemoryStore,
    appends_allowed: usize
}

impl Store for FlakyStore {
    fn append(&mut self, record: &LogRecord) -> Result<(), StoreError> {
        if self.appends_allowed == 0 {
            return Err(StoreError::Io {
                path: "flaky.csv".into(),
                source: io::Error::other("disk full")
            });
        }

        self.appends_allowed -= 1;
        self.inner.append(record)
    }

    fn read_all(&self) -> Result<Vec<LogRecord>, StoreError> {
        self.inner.read_all()
    }
}

#[test]
fn test_income_is_recorded_and_balance_rederived() -> Result<()> {
    let mut engine = create_engine()?;

    engine.record_income("Sueldo", 500_000, at(2026, 10, 1))?;
    let receipt = engine.record_income("Sueldo", 20_000, at(2026, 10, 2))?;

    assert_eq!(receipt.transaction.transaction_type, TransactionType::Income);
    assert_eq!(receipt.balance, 520_000);
    assert_eq!(engine.balance()?, 520_000);

    Ok(())
}

#[test]
fn test_cap_lifecycle_auto_then_partial_then_exhausted() -> Result<()> {
    let mut engine = create_engine()?;
    let now = at(2026, 10, 5);

    let expense = engine.record_expense("Supermercado", 100_000, now)?;
    let auto = expense.reimbursement.ok_or_else(|| anyhow!("expected an automatic reimbursement"))??;

    assert_eq!(auto.credited.get(), 40_000);
    assert_eq!(expense.balance, -60_000);

    let direct = engine.record_reimbursement("Supermercado", 400_000, now)?;

    assert_eq!(direct.grant.credited.get(), 360_000);
    assert!(direct.grant.is_partial());
    assert_eq!(direct.balance, 300_000);

    let appended = engine.store().len();
    let exhausted = engine.record_reimbursement("Supermercado", 1, now);

    assert!(matches!(exhausted, Err(LedgerError::CapExhausted { .. })));
    assert_eq!(engine.store().len(), appended);

    Ok(())
}

#[test]
fn test_reimbursement_for_unlisted_category_leaves_log_unchanged() -> Result<()> {
    let mut engine = create_engine()?;

    let result = engine.record_reimbursement("Bebidas", 1_000, at(2026, 10, 5));

    assert!(matches!(result, Err(LedgerError::InvalidCategory { .. })));
    assert_eq!(engine.store().len(), 0);

    Ok(())
}

#[test]
fn test_non_positive_amounts_are_rejected_before_any_write() -> Result<()> {
    let mut engine = create_engine()?;
    let now = at(2026, 10, 5);

    assert!(matches!(engine.record_income("Sueldo", 0, now), Err(LedgerError::InvalidAmount { .. })));
    assert!(matches!(engine.record_expense("Luz", -5, now), Err(LedgerError::InvalidAmount { .. })));
    assert!(matches!(engine.record_reimbursement("Supermercado", -1, now), Err(LedgerError::InvalidAmount { .. })));
    assert!(matches!(engine.record_expense("  ", 10, now), Err(LedgerError::MissingCategory { .. })));
    assert_eq!(engine.store().len(), 0);

    Ok(())
}

#[test]
fn test_expense_in_non_reimbursable_category_has_no_reimbursement() -> Result<()> {
    let mut engine = create_engine()?;

    let receipt = engine.record_expense("Luz", 30_000, at(2026, 10, 5))?;

    assert!(receipt.reimbursement.is_none());
    assert_eq!(receipt.balance, -30_000);
    assert_eq!(engine.store().len(), 1);

    Ok(())
}

#[test]
fn test_expense_is_kept_when_automatic_reimbursement_is_rejected() -> Result<()> {
    let mut engine = create_engine()?;
    let now = at(2026, 10, 5);

    engine.record_reimbursement("Farmacia", 150_000, now)?;
    let receipt = engine.record_expense("Farmacia", 10_000, now)?;

    assert!(matches!(receipt.reimbursement, Some(Err(LedgerError::CapExhausted { .. }))));
    assert_eq!(receipt.balance, 140_000);
    assert_eq!(engine.store().len(), 2);

    Ok(())
}

#[test]
fn test_cap_resets_with_the_calendar_month() -> Result<()> {
    let mut engine = create_engine()?;

    engine.record_reimbursement("Supermercado", 400_000, at(2026, 9, 28))?;
    let receipt = engine.record_reimbursement("Supermercado", 400_000, at(2026, 10, 1))?;

    assert_eq!(receipt.grant.credited.get(), 400_000);
    assert!(!receipt.grant.is_partial());

    Ok(())
}

#[test]
fn test_store_failure_is_surfaced_and_nothing_is_confirmed() -> Result<()> {
    let store = FlakyStore { inner: MemoryStore::new(), appends_allowed: 0 };
    let mut engine = LedgerEngine::new(store, create_settings()?);

    let result = engine.record_income("Sueldo", 1_000, at(2026, 10, 5));

    assert!(matches!(result, Err(LedgerError::StoreUnavailable(_))));
    assert_eq!(engine.balance()?, 0);

    Ok(())
}

#[test]
fn test_failed_automatic_reimbursement_append_keeps_recorded_expense() -> Result<()> {
    let store = FlakyStore { inner: MemoryStore::new(), appends_allowed: 1 };
    let mut engine = LedgerEngine::new(store, create_settings()?);

    let receipt = engine.record_expense("Supermercado", 100_000, at(2026, 10, 5))?;

    assert!(matches!(receipt.reimbursement, Some(Err(LedgerError::StoreUnavailable(_)))));
    assert_eq!(receipt.balance, -100_000);
    assert_eq!(engine.balance()?, -100_000);

    Ok(())
}

#[test]
fn test_malformed_history_does_not_break_reports_or_caps() -> Result<()> {
    let history = vec![
        LogRecord {
            timestamp: "2026-10-01 08:00:00".to_string(),
            transaction_type: "Income".to_string(),
            category: "Sueldo".to_string(),
            amount: "500000".to_string()
        },
        LogRecord {
            timestamp: "2026-10-02 08:00:00".to_string(),
            transaction_type: "Reimbursement".to_string(),
            category: "Supermercado".to_string(),
            amount: "lots".to_string()
        }
    ];
    let mut engine = LedgerEngine::new(MemoryStore::with_records(history), create_settings()?);

    assert_eq!(engine.general_report()?.totals.balance, 500_000);

    let receipt = engine.record_reimbursement("Supermercado", 400_000, at(2026, 10, 5))?;

    assert_eq!(receipt.grant.credited.get(), 400_000);

    Ok(())
}

#[test]
fn test_reports_are_identical_on_repeated_reads() -> Result<()> {
    let mut engine = create_engine()?;
    let now = at(2026, 10, 5);

    engine.record_income("Sueldo", 500_000, now)?;
    engine.record_expense("Supermercado", 100_000, now)?;

    assert_eq!(engine.general_report()?.to_string(), engine.general_report()?.to_string());
    assert_eq!(engine.expense_report()?, engine.expense_report()?);
    assert_eq!(engine.availability_report(now)?, engine.availability_report(now)?);

    Ok(())
}

#[test]
fn test_timestamps_never_go_backwards_in_the_log() -> Result<()> {
    let mut engine = create_engine()?;

    engine.record_income("Sueldo", 1, at(2026, 10, 20))?;
    let receipt = engine.record_income("Sueldo", 1, at(2026, 10, 10))?;

    assert_eq!(receipt.transaction.timestamp, at(2026, 10, 20));

    Ok(())
}

#[test]
fn test_future_dated_row_does_not_move_the_cap_window() -> Result<()> {
    let history = vec![
        LogRecord {
            timestamp: "2026-10-02 12:00:00".to_string(),
            transaction_type: "Reimbursement".to_string(),
            category: "Supermercado".to_string(),
            amount: "400000".to_string()
        },
        LogRecord {
            timestamp: "2027-01-05 12:00:00".to_string(),
            transaction_type: "Income".to_string(),
            category: "Sueldo".to_string(),
            amount: "1".to_string()
        }
    ];
    let mut engine = LedgerEngine::new(MemoryStore::with_records(history), create_settings()?);
    let now = at(2026, 10, 19);

    let result = engine.record_reimbursement("Supermercado", 100_000, now);

    assert!(matches!(result, Err(LedgerError::CapExhausted { .. })));
    assert_eq!(engine.availability_report(now)?.lines[0].remaining, 0);

    let receipt = engine.record_income("Sueldo", 1, now)?;

    assert_eq!(receipt.transaction.timestamp, now);

    Ok(())
}

#[test]
fn test_execute_dispatches_commands_to_operations() -> Result<()> {
    let mut engine = create_engine()?;
    let now = at(2026, 10, 5);

    let expense = engine.execute(Command::Record {
        transaction_type: TransactionType::Expense,
        category: "Supermercado".to_string(),
        amount: 100_000
    }, now)?;

    assert_eq!(
        expense.to_string(),
        "Expense recorded: Supermercado 100000.\nReimbursement credited: Supermercado 40000, 360000 left this month.\nBalance: -60000"
    );

    let availability = engine.execute(Command::Report(ReportKind::Reimbursements), now)?;

    assert!(matches!(availability, Outcome::AvailabilityReport(_)));
    assert!(availability.to_string().contains("Supermercado: 360000 of 400000 left, spend up to 900000"));

    let help = engine.execute(Command::Help, now)?;

    assert!(help.to_string().contains("Reimbursable categories: Supermercado, Farmacia"));

    Ok(())
}

#[test]
fn test_partial_fill_reply_mentions_requested_amount() -> Result<()> {
    let mut engine = create_engine()?;
    let now = at(2026, 10, 5);

    engine.record_reimbursement("Farmacia", 100_000, now)?;
    let outcome = engine.execute(Command::Record {
        transaction_type: TransactionType::Reimbursement,
        category: "farmacia".to_string(),
        amount: 80_000
    }, now)?;

    assert_eq!(
        outcome.to_string(),
        "Reimbursement credited: Farmacia 50000 of 80000 requested, the monthly cap of 150000 is now reached.\nBalance: 150000"
    );

    Ok(())
}
