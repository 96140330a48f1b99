use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount must be a positive integer, got [{0}]")]
    NotPositive(i64),
    #[error("Amount must be a whole number: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("Amount is empty")]
    Empty
}
