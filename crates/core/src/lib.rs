//! Ecubank Core - Domain types
//!
//! This crate contains the fundamental types used across Ecubank:
//! - `Amount`: Unsigned fixed-point money amount (18 implied decimals)
//! - `Address`: Opaque hash-derived identity of a balance-holding party

pub mod address;
pub mod amount;

pub use address::{Address, AddressError};
pub use amount::{Amount, AmountError, DECIMALS, UNIT};
