use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, warn};

use crate::models::LogRecord;
use crate::storage::{Store, StoreError};

const HEADER: [&str; 4] = ["timestamp", "type", "category", "amount"];

/// Transaction log kept as a CSV file, one row per transaction.
pub struct CsvStore {
    path: PathBuf
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }

    fn csv_error(&self, source: csv::Error) -> StoreError {
        StoreError::Csv { path: self.path.clone(), source }
    }
}

impl Store for CsvStore {
    fn append(&mut self, record: &LogRecord) -> Result<(), StoreError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| self.io_error(error))?;

        let is_empty = file.metadata().map_err(|error| self.io_error(error))?.len() == 0;

        //NOTE: A crash or a hand edit can leave the last row without its newline; the new row must not be glued onto it.
        if !is_empty && !ends_with_newline(&mut file).map_err(|error| self.io_error(error))? {
            warn!("{} did not end with a newline, terminating its last row before appending", self.path.display());
            file.write_all(b"\n").map_err(|error| self.io_error(error))?;
        }

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_empty {
            writer.write_record(HEADER).map_err(|error| self.csv_error(error))?;
        }

        writer.write_record([
            record.timestamp.as_str(),
            record.transaction_type.as_str(),
            record.category.as_str(),
            record.amount.as_str()
        ]).map_err(|error| self.csv_error(error))?;

        writer.flush().map_err(|error| self.io_error(error))?;

        //NOTE: A confirmation is only sent after this returns, so the row has to be on disk by then.
        writer.get_ref().sync_data().map_err(|error| self.io_error(error))?;

        debug!("Appended {} [{}] of {} to {}", record.transaction_type, record.category, record.amount, self.path.display());

        Ok(())
    }

    fn read_all(&self) -> Result<Vec<LogRecord>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(self.io_error(error))
        };

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();

        for result in reader.records() {
            match result {
                Ok(row) => records.push(LogRecord {
                    timestamp: field(&row, 0),
                    transaction_type: field(&row, 1),
                    category: field(&row, 2),
                    amount: field(&row, 3)
                }),
                Err(error) if error.is_io_error() => return Err(self.csv_error(error)),
                Err(error) => warn!("Skipping unreadable ledger row in {}: {error}", self.path.display())
            }
        }

        Ok(records)
    }
}

fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    let mut last = [0u8; 1];

    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;

    Ok(last[0] == b'\n')
}

/// Columns are positional; short rows read as empty fields.
fn field(row: &StringRecord, index: usize) -> String {
    row.get(index).unwrap_or_default().to_string()
}
