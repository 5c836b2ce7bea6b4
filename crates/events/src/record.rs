//! Journal record types

use chrono::{DateTime, Utc};
use ecubank_core::{Address, Amount};
use ecubank_exchange::{OrderId, OrderSide};
use serde::{Deserialize, Serialize};

/// A mutating registry operation, with every input it needs to be
/// re-applied during replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    CreateAccount {
        first_name: String,
        last_name: String,
        account_number: u32,
    },
    TransferMoney {
        from: Address,
        to: Address,
        amount: Amount,
    },
    CreateShare {
        name: String,
        symbol: String,
        max_supply: Amount,
        price: Amount,
    },
    BuyShare {
        name: String,
        symbol: String,
        amount: Amount,
        to: Address,
    },
    SellShare {
        name: String,
        symbol: String,
        amount: Amount,
        from: Address,
    },
    PlaceOrder {
        name: String,
        symbol: String,
        amount: Amount,
        limit_price: Amount,
        side: OrderSide,
        submitter: Address,
    },
    ExecuteOrder {
        name: String,
        symbol: String,
        order_id: OrderId,
        current_price: Amount,
    },
    CreateStaking {
        name: String,
        interest_rate: u64,
    },
    DepositToStaking {
        pool: String,
        from: Address,
        amount: Amount,
    },
    WithdrawAllFromStaking {
        pool: String,
        to: Address,
    },
    WithdrawRewardFromStaking {
        pool: String,
        to: Address,
    },
    SetStakingRate {
        pool: String,
        interest_rate: u64,
    },
}

/// One committed operation.
///
/// `sequence` is 1-based and gapless across the whole journal; `timestamp`
/// is the wall-clock time the operation was applied at, and is what replay
/// feeds back into time-dependent operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: String,
    pub op: Operation,
}
