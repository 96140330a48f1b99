//! Family expense ledger with capped monthly reimbursements.
//!
//! Income, expenses and reimbursements are appended to a transaction log.
//! Balance, totals and reimbursement headroom are always folded from that log
//! on demand, never kept as separate counters.

pub mod actors;
pub mod commands;
pub mod config;
pub mod engine;
pub mod models;
pub mod policy;
pub mod reports;
pub mod storage;
pub mod types;
