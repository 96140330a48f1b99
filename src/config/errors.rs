use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file [{path}]: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Reimbursement fraction must be greater than 0 and at most 1, got [{0}]")]
    InvalidFraction(rust_decimal::Decimal),
    #[error("At least one reimbursable category must be configured")]
    NoCaps,
    #[error("Reimbursable category names cannot be empty")]
    BlankCategory,
    #[error("Reimbursable category [{0}] is configured more than once")]
    DuplicateCategory(String),
    #[error("Cap for [{category}] must be a positive integer, got [{limit}]")]
    InvalidLimit {
        category: String,
        limit: i64
    }
}
