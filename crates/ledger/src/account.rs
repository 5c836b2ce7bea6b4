//! Customer accounts
//!
//! An account is a thin, owner-gated wrapper over the ledger: the registry
//! that created it is the only caller allowed to move its funds. Accounts
//! are keyed by a deterministic hash of the holder's identity and are never
//! destroyed.

use chrono::{DateTime, Utc};
use ecubank_core::{Address, Amount};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::ledger::Ledger;

/// The business identity behind an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHolder {
    pub first_name: String,
    pub last_name: String,
    pub account_number: u32,
}

impl AccountHolder {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        account_number: u32,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            account_number,
        }
    }

    /// Deterministic directory key for this holder.
    pub fn account_id(&self) -> Address {
        Address::derive(
            "account",
            &[
                &self.first_name,
                &self.last_name,
                &self.account_number.to_string(),
            ],
        )
    }
}

/// A customer account. Created by the bank registry, never destroyed.
#[derive(Debug, Clone)]
pub struct Account {
    holder: AccountHolder,
    address: Address,
    owner: Address,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(holder: AccountHolder, owner: Address, created_at: DateTime<Utc>) -> Self {
        let address = holder.account_id();
        Self {
            holder,
            address,
            owner,
            created_at,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn holder(&self) -> &AccountHolder {
        &self.holder
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Move `amount` from this account to `to`.
    ///
    /// Only the registry recorded at creation may call; the destination is
    /// any ledger identity, which is what lets pools take float top-ups.
    pub fn transfer(
        &self,
        caller: Address,
        ledger: &mut Ledger,
        to: Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if caller != self.owner {
            return Err(LedgerError::NotAccountOwner {
                caller,
                account: self.address,
            });
        }
        ledger.transfer(self.address, to, amount)
    }

    /// Current ledger balance of this account. Read-only, always succeeds.
    pub fn balance(&self, ledger: &Ledger) -> Amount {
        ledger.balance_of(self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder() -> AccountHolder {
        AccountHolder::new("John", "Doe", 123456)
    }

    #[test]
    fn test_account_id_is_stable() {
        assert_eq!(holder().account_id(), holder().account_id());
        let other = AccountHolder::new("John", "Doe", 123457);
        assert_ne!(holder().account_id(), other.account_id());
    }

    #[test]
    fn test_transfer_requires_owner() {
        let bank = Address::derive("bank", &["registry"]);
        let account = Account::new(holder(), bank, Utc::now());
        let mut ledger = Ledger::new();
        ledger.mint(account.address(), Amount::from_units(100)).unwrap();

        let stranger = Address::derive("test", &["stranger"]);
        let result = account.transfer(stranger, &mut ledger, stranger, Amount::from_units(1));
        assert!(matches!(result, Err(LedgerError::NotAccountOwner { .. })));

        account
            .transfer(bank, &mut ledger, stranger, Amount::from_units(40))
            .unwrap();
        assert_eq!(account.balance(&ledger), Amount::from_units(60));
    }

    #[test]
    fn test_transfer_propagates_insufficient_balance() {
        let bank = Address::derive("bank", &["registry"]);
        let account = Account::new(holder(), bank, Utc::now());
        let mut ledger = Ledger::new();
        ledger.mint(account.address(), Amount::from_units(5)).unwrap();

        let to = Address::derive("test", &["to"]);
        let result = account.transfer(bank, &mut ledger, to, Amount::from_units(6));
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientBalance { .. })
        ));
    }
}
