//! Ledger errors

use ecubank_core::{Address, Amount};
use thiserror::Error;

/// Errors that can occur in ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance on {account}: requested {requested}, available {available}")]
    InsufficientBalance {
        account: Address,
        requested: Amount,
        available: Amount,
    },

    #[error(
        "insufficient allowance for {spender} on {owner}: requested {requested}, available {available}"
    )]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        requested: Amount,
        available: Amount,
    },

    #[error("total supply overflowed while minting {minted}")]
    SupplyOverflow { minted: Amount },

    #[error("balance overflowed on {account}")]
    BalanceOverflow { account: Address },

    #[error("caller {caller} is not the owner of account {account}")]
    NotAccountOwner { caller: Address, account: Address },
}
