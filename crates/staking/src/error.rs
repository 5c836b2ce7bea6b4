//! Staking errors

use ecubank_core::Address;
use ecubank_ledger::LedgerError;
use thiserror::Error;

/// Errors that can occur in staking operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StakingError {
    #[error("caller {caller} does not own staking pool {pool}")]
    NotPoolOwner { caller: Address, pool: String },

    #[error("no active deposit for {depositor}")]
    NoActiveDeposit { depositor: Address },

    #[error("deposit arithmetic overflowed for {depositor}")]
    ArithmeticOverflow { depositor: Address },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
