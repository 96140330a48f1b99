mod csv_store;
mod errors;
mod memory_store;

use crate::models::LogRecord;

pub use csv_store::CsvStore;
pub use errors::StoreError;
pub use memory_store::MemoryStore;

/// The append-only transaction log.
///
/// An `append` that returns `Ok` must already be durable. Implementations never
/// rewrite or drop earlier records.
pub trait Store: Send + 'static {
    fn append(&mut self, record: &LogRecord) -> Result<(), StoreError>;
    fn read_all(&self) -> Result<Vec<LogRecord>, StoreError>;
}
