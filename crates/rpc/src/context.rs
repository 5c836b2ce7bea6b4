//! Application context - wires the bank to its journal
//!
//! On startup the journal is replayed, feeding every record's recorded
//! timestamp back into the bank, so interest accrual and order timestamps
//! rebuild exactly. A commit applies the operation first and journals it
//! only on success; failed operations leave no trace.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use ecubank_core::{Address, Amount};
use ecubank_events::{EventError, EventReader, EventStore, Operation, OperationRecord};
use ecubank_exchange::OrderId;

use crate::bank::{Bank, BankError};

/// Wires together the bank and the operation journal.
pub struct AppContext {
    pub bank: Bank,
    store: EventStore,
    journal_path: PathBuf,
    next_sequence: u64,
}

/// What a committed operation produced, for the caller to report.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    AccountCreated { handle: Address },
    MoneyTransferred,
    ShareCreated { address: Address },
    ShareBought { cost: Amount },
    ShareSold { proceeds: Amount },
    OrderPlaced { order_id: OrderId },
    OrderExecuted,
    StakingCreated { address: Address },
    Deposited,
    Withdrawn { amount: Amount },
    RateChanged,
}

/// Errors during commit or replay
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error(transparent)]
    Bank(#[from] BankError),

    #[error(transparent)]
    Event(#[from] EventError),
}

impl AppContext {
    /// Open (or create) a data directory and rebuild state from its journal.
    pub fn new(data_path: impl AsRef<Path>) -> Result<Self, CommitError> {
        let journal_path = data_path.as_ref().join("journal");
        let store = EventStore::new(&journal_path)?;
        let reader = EventReader::from_directory(&journal_path)?;
        let records = reader.read_all()?;

        let operator = Address::derive("bank", &["operator"]);
        let mut bank = Bank::new(operator);
        // The journal only holds operations that were applied once already,
        // so replay is expected to succeed record by record.
        for record in &records {
            apply(&mut bank, &record.op, record.timestamp)?;
        }
        let next_sequence = records.last().map(|r| r.sequence + 1).unwrap_or(1);

        Ok(Self {
            bank,
            store,
            journal_path,
            next_sequence,
        })
    }

    /// The privileged caller identity the journal replays as.
    pub fn operator(&self) -> Address {
        self.bank.operator()
    }

    /// Sequence of the last committed operation (0 when empty).
    pub fn last_sequence(&self) -> u64 {
        self.next_sequence - 1
    }

    /// Path of the journal directory.
    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    /// Apply an operation to the bank; journal it only if it succeeded.
    pub fn commit(&mut self, op: Operation) -> Result<Applied, CommitError> {
        let timestamp = Utc::now();
        let applied = apply(&mut self.bank, &op, timestamp)?;
        let record = OperationRecord {
            sequence: self.next_sequence,
            timestamp,
            correlation_id: Uuid::new_v4().to_string(),
            op,
        };
        self.store.append(&record)?;
        self.next_sequence += 1;
        Ok(applied)
    }
}

/// Single dispatch point shared by live commits and journal replay.
fn apply(bank: &mut Bank, op: &Operation, now: DateTime<Utc>) -> Result<Applied, BankError> {
    let operator = bank.operator();
    match op {
        Operation::CreateAccount {
            first_name,
            last_name,
            account_number,
        } => {
            let handle =
                bank.create_account(operator, first_name, last_name, *account_number, now)?;
            Ok(Applied::AccountCreated { handle })
        }
        Operation::TransferMoney { from, to, amount } => {
            bank.transfer_money_to_account(operator, *from, *to, *amount)?;
            Ok(Applied::MoneyTransferred)
        }
        Operation::CreateShare {
            name,
            symbol,
            max_supply,
            price,
        } => {
            let address = bank.create_share(operator, name, symbol, *max_supply, *price)?;
            Ok(Applied::ShareCreated { address })
        }
        Operation::BuyShare {
            name,
            symbol,
            amount,
            to,
        } => {
            let cost = bank.buy_share(operator, name, symbol, *amount, *to)?;
            Ok(Applied::ShareBought { cost })
        }
        Operation::SellShare {
            name,
            symbol,
            amount,
            from,
        } => {
            let proceeds = bank.sell_share(operator, name, symbol, *amount, *from)?;
            Ok(Applied::ShareSold { proceeds })
        }
        Operation::PlaceOrder {
            name,
            symbol,
            amount,
            limit_price,
            side,
            submitter,
        } => {
            let order_id = bank.place_order_on_share(
                operator,
                name,
                symbol,
                *amount,
                *limit_price,
                *side,
                *submitter,
                now,
            )?;
            Ok(Applied::OrderPlaced { order_id })
        }
        Operation::ExecuteOrder {
            name,
            symbol,
            order_id,
            current_price,
        } => {
            bank.execute_order_on_share(operator, name, symbol, *order_id, *current_price)?;
            Ok(Applied::OrderExecuted)
        }
        Operation::CreateStaking {
            name,
            interest_rate,
        } => {
            let address = bank.create_staking(operator, name, *interest_rate)?;
            Ok(Applied::StakingCreated { address })
        }
        Operation::DepositToStaking { pool, from, amount } => {
            bank.deposit_to_staking(operator, pool, *from, *amount, now)?;
            Ok(Applied::Deposited)
        }
        Operation::WithdrawAllFromStaking { pool, to } => {
            let amount = bank.withdraw_all_from_staking(operator, pool, *to, now)?;
            Ok(Applied::Withdrawn { amount })
        }
        Operation::WithdrawRewardFromStaking { pool, to } => {
            let amount = bank.withdraw_reward_from_staking(operator, pool, *to, now)?;
            Ok(Applied::Withdrawn { amount })
        }
        Operation::SetStakingRate {
            pool,
            interest_rate,
        } => {
            bank.set_staking_rate(operator, pool, *interest_rate)?;
            Ok(Applied::RateChanged)
        }
    }
}
