//! Fixed-rate deposit pools

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ecubank_core::{Address, Amount};
use ecubank_ledger::Ledger;
use tracing::info;

use crate::error::StakingError;

/// Seconds in the accrual year.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// One depositor's open position in a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deposit {
    /// Amount earning interest
    pub principal: Amount,
    /// When interest was last settled into `banked_reward`
    pub last_timestamp: DateTime<Utc>,
    /// Reward settled but not yet paid out
    pub banked_reward: Amount,
}

/// A fixed-rate interest-bearing deposit pool.
///
/// The pool's cash sits at its own ledger address: principals are escrowed
/// in by the registry, and rewards are paid out of whatever float the pool
/// holds. Unsolicited transfers to the pool address are ordinary ledger
/// transfers and leave the deposit records untouched.
#[derive(Debug, Clone)]
pub struct StakingPool {
    name: String,
    address: Address,
    owner: Address,
    interest_rate: u64,
    deposits: HashMap<Address, Deposit>,
}

impl StakingPool {
    /// Create a pool paying `interest_rate` percent per year.
    pub fn new(name: impl Into<String>, owner: Address, interest_rate: u64) -> Self {
        let name = name.into();
        let address = Address::derive("staking", &[&name]);
        Self {
            name,
            address,
            owner,
            interest_rate,
            deposits: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Current annual interest rate in percent.
    pub fn interest_rate(&self) -> u64 {
        self.interest_rate
    }

    /// The open deposit of `depositor`, if any.
    pub fn deposit_of(&self, depositor: Address) -> Option<&Deposit> {
        self.deposits.get(&depositor)
    }

    fn check_owner(&self, caller: Address) -> Result<(), StakingError> {
        if caller != self.owner {
            return Err(StakingError::NotPoolOwner {
                caller,
                pool: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Simple interest accrued on `principal` between `last` and `now`,
    /// floored to base units. Dust below one base unit per settlement is
    /// discarded.
    fn accrued(
        &self,
        principal: Amount,
        last: DateTime<Utc>,
        now: DateTime<Utc>,
        depositor: Address,
    ) -> Result<Amount, StakingError> {
        let elapsed = (now - last).num_seconds().max(0) as u128;
        let numerator = principal
            .base_units()
            .checked_mul(self.interest_rate as u128)
            .and_then(|v| v.checked_mul(elapsed))
            .ok_or(StakingError::ArithmeticOverflow { depositor })?;
        Ok(Amount::from_base_units(
            numerator / (100 * SECONDS_PER_YEAR as u128),
        ))
    }

    /// Record a deposit of `amount` for `from`.
    ///
    /// A first deposit opens the record; a follow-up deposit first banks
    /// the interest accrued so far, so the fresh principal does not earn
    /// the elapsed window. The cash leg is escrowed by the registry before
    /// this is called.
    pub fn deposit(
        &mut self,
        caller: Address,
        from: Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<(), StakingError> {
        self.check_owner(caller)?;
        let updated = match self.deposits.get(&from) {
            None => Deposit {
                principal: amount,
                last_timestamp: now,
                banked_reward: Amount::ZERO,
            },
            Some(open) => {
                let accrued = self.accrued(open.principal, open.last_timestamp, now, from)?;
                Deposit {
                    principal: open
                        .principal
                        .checked_add(amount)
                        .ok_or(StakingError::ArithmeticOverflow { depositor: from })?,
                    last_timestamp: now,
                    banked_reward: open
                        .banked_reward
                        .checked_add(accrued)
                        .ok_or(StakingError::ArithmeticOverflow { depositor: from })?,
                }
            }
        };
        self.deposits.insert(from, updated);
        info!(pool = %self.name, depositor = %from, %amount, "deposit recorded");
        Ok(())
    }

    /// Close the deposit of `to`: pay principal plus all reward in one
    /// transfer and delete the record entirely.
    pub fn withdraw_all(
        &mut self,
        caller: Address,
        to: Address,
        now: DateTime<Utc>,
        cash: &mut Ledger,
    ) -> Result<Amount, StakingError> {
        self.check_owner(caller)?;
        let open = self
            .deposits
            .get(&to)
            .cloned()
            .ok_or(StakingError::NoActiveDeposit { depositor: to })?;
        let accrued = self.accrued(open.principal, open.last_timestamp, now, to)?;
        let payout = open
            .principal
            .checked_add(open.banked_reward)
            .and_then(|v| v.checked_add(accrued))
            .ok_or(StakingError::ArithmeticOverflow { depositor: to })?;
        cash.transfer(self.address, to, payout)?;
        self.deposits.remove(&to);
        info!(pool = %self.name, depositor = %to, %payout, "deposit closed");
        Ok(payout)
    }

    /// Pay out the reward of `to` only; the principal stays deposited and
    /// a fresh accrual window starts at `now`.
    pub fn withdraw_reward(
        &mut self,
        caller: Address,
        to: Address,
        now: DateTime<Utc>,
        cash: &mut Ledger,
    ) -> Result<Amount, StakingError> {
        self.check_owner(caller)?;
        let open = self
            .deposits
            .get(&to)
            .cloned()
            .ok_or(StakingError::NoActiveDeposit { depositor: to })?;
        let accrued = self.accrued(open.principal, open.last_timestamp, now, to)?;
        let payout = open
            .banked_reward
            .checked_add(accrued)
            .ok_or(StakingError::ArithmeticOverflow { depositor: to })?;
        cash.transfer(self.address, to, payout)?;
        self.deposits.insert(
            to,
            Deposit {
                principal: open.principal,
                last_timestamp: now,
                banked_reward: Amount::ZERO,
            },
        );
        info!(pool = %self.name, depositor = %to, %payout, "reward paid");
        Ok(payout)
    }

    /// Change the rate for all future accrual windows. Already-banked
    /// rewards are never recomputed.
    pub fn set_interest_rate(&mut self, caller: Address, new_rate: u64) -> Result<(), StakingError> {
        self.check_owner(caller)?;
        self.interest_rate = new_rate;
        Ok(())
    }
}
