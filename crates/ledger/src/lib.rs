//! Ecubank Ledger - Fungible balance store
//!
//! This is the HEART of Ecubank. All cash movements go through this crate.
//!
//! # Key Types
//! - `Ledger`: balances + allowances + total supply, with the standard
//!   mint / transfer / approve / transfer_from contract
//! - `Account`: a customer account wrapping an owner-gated transfer over
//!   the ledger
//! - `AccountHolder`: the business identity an account is keyed by

pub mod account;
pub mod error;
pub mod ledger;

pub use account::{Account, AccountHolder};
pub use error::LedgerError;
pub use ledger::Ledger;
