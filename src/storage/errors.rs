use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ledger file [{path}] could not be accessed: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error
    },
    #[error("Ledger file [{path}] could not be written: {source}")]
    Csv {
        path: PathBuf,
        source: csv::Error
    }
}
