//! Journal errors

use thiserror::Error;

/// Errors that can occur reading or writing the journal
#[derive(Error, Debug)]
pub enum EventError {
    #[error("journal I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("journal serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("journal sequence gap: expected {expected}, got {actual}")]
    SequenceGap { expected: u64, actual: u64 },
}
