//! Exchange errors

use ecubank_core::{Address, Amount, AmountError};
use ecubank_ledger::LedgerError;
use thiserror::Error;

use crate::order::OrderId;

/// Errors that can occur in share operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    #[error("caller {caller} does not own share {name} ({symbol})")]
    NotShareOwner {
        caller: Address,
        name: String,
        symbol: String,
    },

    #[error("insufficient supply: requested {requested}, available {available}")]
    InsufficientSupply {
        requested: Amount,
        available: Amount,
    },

    #[error("order {0} does not exist")]
    OrderDoesNotExist(OrderId),

    #[error("price mismatch: order was placed at {expected}, execution quoted {actual}")]
    PriceMismatch { expected: Amount, actual: Amount },

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
