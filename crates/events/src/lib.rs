//! Ecubank Events - Append-only operation journal
//!
//! Every mutating registry operation is journaled as one JSONL record.
//! On startup the journal is replayed, with recorded timestamps, to
//! rebuild the in-memory state; that makes the journal the single durable
//! source of truth.

pub mod error;
pub mod reader;
pub mod record;
pub mod store;

pub use error::EventError;
pub use reader::EventReader;
pub use record::{Operation, OperationRecord};
pub use store::EventStore;
