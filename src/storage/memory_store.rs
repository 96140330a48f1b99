use crate::models::LogRecord;
use crate::storage::{Store, StoreError};

/// In-process transaction log.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<LogRecord>
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Store for MemoryStore {
    fn append(&mut self, record: &LogRecord) -> Result<(), StoreError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<LogRecord>, StoreError> {
        Ok(self.records.clone())
    }
}
