//! Ecubank RPC - Bank registry and CLI orchestrator
//!
//! The `Bank` is the single entry point of the system: it owns the ECU
//! ledger and the account, share and staking directories, and mediates
//! every cross-entity operation. `AppContext` wires the bank to its
//! operation journal.

pub mod bank;
pub mod commands;
pub mod context;

pub use bank::{Bank, BankError, INITIAL_GRANT};
pub use context::{AppContext, Applied, CommitError};
