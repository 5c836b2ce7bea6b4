//! JSONL journal reader - sequential reader for replay

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::EventError;
use crate::record::OperationRecord;

/// Reads a journal directory back into ordered records.
pub struct EventReader {
    files: Vec<PathBuf>,
}

impl EventReader {
    /// Collect the `.jsonl` files under `path`, oldest first.
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, EventError> {
        let path = path.as_ref();
        let mut files = Vec::new();

        if path.exists() {
            for entry in std::fs::read_dir(path)? {
                let file_path = entry?.path();
                if file_path.extension().is_some_and(|ext| ext == "jsonl") {
                    files.push(file_path);
                }
            }
        }
        files.sort();

        Ok(Self { files })
    }

    /// Read every record, ordered by sequence, verifying the sequence is
    /// 1-based and gapless.
    pub fn read_all(&self) -> Result<Vec<OperationRecord>, EventError> {
        let mut records = Vec::new();

        for file_path in &self.files {
            let file = File::open(file_path)?;
            for line in BufReader::new(file).lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: OperationRecord = serde_json::from_str(&line)?;
                records.push(record);
            }
        }

        records.sort_by_key(|r| r.sequence);
        for (index, record) in records.iter().enumerate() {
            let expected = index as u64 + 1;
            if record.sequence != expected {
                return Err(EventError::SequenceGap {
                    expected,
                    actual: record.sequence,
                });
            }
        }

        Ok(records)
    }
}
