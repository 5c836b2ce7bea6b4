//! The fungible balance store
//!
//! Keeps one balance per address plus an (owner, spender) allowance table.
//! Invariant: the sum of all balances equals the total minted supply after
//! every operation; no balance is ever observable below zero.

use std::collections::HashMap;

use ecubank_core::{Address, Amount};
use tracing::debug;

use crate::error::LedgerError;

/// Fungible-unit store with mint, transfer and allowance semantics.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of an address (zero if it never held funds).
    pub fn balance_of(&self, id: Address) -> Amount {
        self.balances.get(&id).copied().unwrap_or(Amount::ZERO)
    }

    /// Total minted supply.
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Remaining allowance `spender` may move out of `owner`.
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// All current balances. The sum equals `total_supply`.
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Create `amount` new units on `to`, growing the total supply.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<(), LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { minted: amount })?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::BalanceOverflow { account: to })?;
        self.total_supply = supply;
        self.set_balance(to, credited);
        debug!(%to, %amount, supply = %self.total_supply, "minted");
        Ok(())
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Fails without touching any balance when `from` cannot cover `amount`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account: from,
                requested: amount,
                available,
            })?;
        // Conservation bounds the sum by total_supply, so the credit side
        // cannot overflow once the debit side succeeded.
        let credited = if from == to {
            available
        } else {
            self.balance_of(to)
                .checked_add(amount)
                .ok_or(LedgerError::BalanceOverflow { account: to })?
        };
        self.set_balance(from, remaining);
        self.set_balance(to, credited);
        Ok(())
    }

    /// Set the allowance `spender` may move out of `owner`.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }

    /// Move `amount` from `owner` to `to` on behalf of `spender`.
    ///
    /// Fails with `InsufficientAllowance` before any state changes; the
    /// allowance is only decremented once the transfer itself succeeded.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        owner: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(owner, spender);
        let remaining = approved
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                owner,
                spender,
                requested: amount,
                available: approved,
            })?;
        self.transfer(owner, to, amount)?;
        self.approve(owner, spender, remaining);
        Ok(())
    }

    fn set_balance(&mut self, id: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&id);
        } else {
            self.balances.insert(id, amount);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(label: &str) -> Address {
        Address::derive("test", &[label])
    }

    fn conserved(ledger: &Ledger) -> bool {
        let sum = ledger
            .balances()
            .try_fold(Amount::ZERO, |acc, (_, amount)| acc.checked_add(*amount));
        sum == Some(ledger.total_supply())
    }

    #[test]
    fn test_mint_grows_supply() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(100)).unwrap();
        assert_eq!(ledger.balance_of(addr("alice")), Amount::from_units(100));
        assert_eq!(ledger.total_supply(), Amount::from_units(100));
        assert!(conserved(&ledger));
    }

    #[test]
    fn test_transfer_moves_balance() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(100)).unwrap();
        ledger
            .transfer(addr("alice"), addr("bob"), Amount::from_units(30))
            .unwrap();
        assert_eq!(ledger.balance_of(addr("alice")), Amount::from_units(70));
        assert_eq!(ledger.balance_of(addr("bob")), Amount::from_units(30));
        assert!(conserved(&ledger));
    }

    #[test]
    fn test_transfer_insufficient_balance() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(10)).unwrap();
        let result = ledger.transfer(addr("alice"), addr("bob"), Amount::from_units(11));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        // nothing moved
        assert_eq!(ledger.balance_of(addr("alice")), Amount::from_units(10));
        assert_eq!(ledger.balance_of(addr("bob")), Amount::ZERO);
    }

    #[test]
    fn test_transfer_to_self_is_neutral() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(10)).unwrap();
        ledger
            .transfer(addr("alice"), addr("alice"), Amount::from_units(4))
            .unwrap();
        assert_eq!(ledger.balance_of(addr("alice")), Amount::from_units(10));
        assert!(conserved(&ledger));
    }

    #[test]
    fn test_transfer_from_decrements_allowance() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(100)).unwrap();
        ledger.approve(addr("alice"), addr("bank"), Amount::from_units(40));

        ledger
            .transfer_from(addr("bank"), addr("alice"), addr("pool"), Amount::from_units(25))
            .unwrap();

        assert_eq!(ledger.balance_of(addr("pool")), Amount::from_units(25));
        assert_eq!(
            ledger.allowance(addr("alice"), addr("bank")),
            Amount::from_units(15)
        );
        assert!(conserved(&ledger));
    }

    #[test]
    fn test_transfer_from_insufficient_allowance() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(100)).unwrap();
        ledger.approve(addr("alice"), addr("bank"), Amount::from_units(5));

        let result =
            ledger.transfer_from(addr("bank"), addr("alice"), addr("pool"), Amount::from_units(6));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientAllowance { .. })
        ));
        assert_eq!(ledger.balance_of(addr("alice")), Amount::from_units(100));
    }

    #[test]
    fn test_failed_transfer_from_keeps_allowance() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("alice"), Amount::from_units(3)).unwrap();
        ledger.approve(addr("alice"), addr("bank"), Amount::from_units(10));

        // allowance covers it, balance does not
        let result =
            ledger.transfer_from(addr("bank"), addr("alice"), addr("pool"), Amount::from_units(5));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
        assert_eq!(
            ledger.allowance(addr("alice"), addr("bank")),
            Amount::from_units(10)
        );
    }

    #[test]
    fn test_mint_supply_overflow() {
        let mut ledger = Ledger::new();
        ledger
            .mint(addr("alice"), Amount::from_base_units(u128::MAX))
            .unwrap();
        let result = ledger.mint(addr("bob"), Amount::from_base_units(1));
        assert!(matches!(result, Err(LedgerError::SupplyOverflow { .. })));
    }

    #[test]
    fn test_conservation_across_sequence() {
        let mut ledger = Ledger::new();
        ledger.mint(addr("a"), Amount::from_units(1000)).unwrap();
        ledger.mint(addr("b"), Amount::from_units(1000)).unwrap();
        ledger.transfer(addr("a"), addr("c"), Amount::from_units(250)).unwrap();
        ledger.approve(addr("b"), addr("bank"), Amount::from_units(500));
        ledger
            .transfer_from(addr("bank"), addr("b"), addr("c"), Amount::from_units(500))
            .unwrap();
        assert!(conserved(&ledger));
        assert_eq!(ledger.total_supply(), Amount::from_units(2000));
    }
}
