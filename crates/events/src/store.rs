//! JSONL journal writer - append-only

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::EventError;
use crate::record::OperationRecord;

/// Append-only JSONL journal, one file per calendar day.
pub struct EventStore {
    base_path: PathBuf,
    current: Option<(String, BufWriter<File>)>,
}

impl EventStore {
    /// Create a journal writer rooted at `base_path`.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self, EventError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            current: None,
        })
    }

    /// Append one record and flush it to disk.
    pub fn append(&mut self, record: &OperationRecord) -> Result<(), EventError> {
        let date = record.timestamp.format("%Y-%m-%d").to_string();

        let rotate = !matches!(&self.current, Some((current_date, _)) if *current_date == date);
        if rotate {
            let file_path = self.base_path.join(format!("{date}.jsonl"));
            let file = OpenOptions::new().create(true).append(true).open(&file_path)?;
            self.current = Some((date, BufWriter::new(file)));
        }

        if let Some((_, writer)) = &mut self.current {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{json}")?;
            writer.flush()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::EventReader;
    use crate::record::Operation;
    use chrono::Utc;
    use ecubank_core::{Address, Amount};
    use tempfile::TempDir;

    fn record(sequence: u64) -> OperationRecord {
        OperationRecord {
            sequence,
            timestamp: Utc::now(),
            correlation_id: uuid::Uuid::new_v4().to_string(),
            op: Operation::TransferMoney {
                from: Address::derive("test", &["a"]),
                to: Address::derive("test", &["b"]),
                amount: Amount::from_units(1),
            },
        }
    }

    #[test]
    fn test_append_then_read_back() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::new(dir.path()).unwrap();
        for sequence in 1..=3 {
            store.append(&record(sequence)).unwrap();
        }

        let reader = EventReader::from_directory(dir.path()).unwrap();
        let records = reader.read_all().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sequence, 1);
        assert_eq!(records[2].sequence, 3);
    }

    #[test]
    fn test_reader_detects_sequence_gap() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::new(dir.path()).unwrap();
        store.append(&record(1)).unwrap();
        store.append(&record(3)).unwrap();

        let reader = EventReader::from_directory(dir.path()).unwrap();
        let result = reader.read_all();
        assert!(matches!(
            result,
            Err(EventError::SequenceGap { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_empty_directory_reads_empty() {
        let dir = TempDir::new().unwrap();
        let reader = EventReader::from_directory(dir.path()).unwrap();
        assert!(reader.read_all().unwrap().is_empty());
    }
}
