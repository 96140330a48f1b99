mod ledger_engine;
mod outcome;
#[cfg(test)]
mod tests;

pub use ledger_engine::LedgerEngine;
pub use outcome::{ExpenseReceipt, Outcome, Receipt, ReimbursementReceipt};
