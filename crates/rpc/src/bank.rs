//! The bank registry
//!
//! Owns the ECU ledger and three create-once directories (accounts,
//! shares, staking pools). Every mutating entry point checks the caller
//! against the operator identity fixed at construction, and the bank in
//! turn presents its own address as the capability when delegating into
//! the components it owns. No component ever calls back up.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use ecubank_core::{Address, Amount, AmountError};
use ecubank_exchange::{ExchangeError, Order, OrderId, OrderSide, Share};
use ecubank_ledger::{Account, AccountHolder, Ledger, LedgerError};
use ecubank_staking::{StakingError, StakingPool};

/// Fixed grant minted to every new account.
pub const INITIAL_GRANT: Amount = Amount::from_units(1000);

/// Errors surfaced by the registry. Component errors pass through
/// untranslated, so callers always see the originating failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("caller {caller} is not the bank operator")]
    Unauthorized { caller: Address },

    #[error("account already exists for {first_name} {last_name} ({account_number})")]
    AccountAlreadyExists {
        first_name: String,
        last_name: String,
        account_number: u32,
    },

    #[error("account {handle} does not exist")]
    AccountDoesNotExist { handle: Address },

    #[error("share {name} ({symbol}) already exists")]
    ShareAlreadyExists { name: String, symbol: String },

    #[error("share {name} ({symbol}) does not exist")]
    ShareDoesNotExist { name: String, symbol: String },

    #[error("staking pool {name} already exists")]
    StakingAlreadyExists { name: String },

    #[error("staking pool {name} does not exist")]
    StakingDoesNotExist { name: String },

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Staking(#[from] StakingError),
}

/// The central registry and sole privileged orchestrator.
///
/// All mutation goes through `&mut self`, so registry operations are
/// strictly serialized: no operation ever observes another half-applied.
pub struct Bank {
    address: Address,
    operator: Address,
    ledger: Ledger,
    accounts: HashMap<Address, Account>,
    shares: HashMap<(String, String), Share>,
    pools: HashMap<String, StakingPool>,
}

impl Bank {
    /// Create a bank whose mutating surface answers only to `operator`.
    pub fn new(operator: Address) -> Self {
        Self {
            address: Address::derive("bank", &["registry"]),
            operator,
            ledger: Ledger::new(),
            accounts: HashMap::new(),
            shares: HashMap::new(),
            pools: HashMap::new(),
        }
    }

    /// The bank's own ledger identity.
    pub fn address(&self) -> Address {
        self.address
    }

    /// The single privileged caller of this registry.
    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Read access to the ECU ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn authorize(&self, caller: Address) -> Result<(), BankError> {
        if caller != self.operator {
            return Err(BankError::Unauthorized { caller });
        }
        Ok(())
    }

    // === Accounts ===

    /// Create an account keyed by the holder identity and seed it with the
    /// initial grant. The directory is untouched when creation fails.
    pub fn create_account(
        &mut self,
        caller: Address,
        first_name: &str,
        last_name: &str,
        account_number: u32,
        now: DateTime<Utc>,
    ) -> Result<Address, BankError> {
        self.authorize(caller)?;
        let holder = AccountHolder::new(first_name, last_name, account_number);
        let handle = holder.account_id();
        if self.accounts.contains_key(&handle) {
            return Err(BankError::AccountAlreadyExists {
                first_name: holder.first_name,
                last_name: holder.last_name,
                account_number,
            });
        }
        self.ledger.mint(handle, INITIAL_GRANT)?;
        self.accounts.insert(handle, Account::new(holder, self.address, now));
        info!(account = %handle, grant = %INITIAL_GRANT, "account created");
        Ok(handle)
    }

    /// Resolve an account by handle.
    pub fn account(&self, handle: Address) -> Result<&Account, BankError> {
        self.accounts
            .get(&handle)
            .ok_or(BankError::AccountDoesNotExist { handle })
    }

    /// Resolve an account by its holder identity.
    pub fn find_account(
        &self,
        first_name: &str,
        last_name: &str,
        account_number: u32,
    ) -> Result<&Account, BankError> {
        self.account(AccountHolder::new(first_name, last_name, account_number).account_id())
    }

    /// ECU balance of an account.
    pub fn balance_of_account(&self, handle: Address) -> Result<Amount, BankError> {
        Ok(self.account(handle)?.balance(&self.ledger))
    }

    /// Move money out of an account to any ledger identity (another
    /// account, a share, a pool taking a float top-up).
    pub fn transfer_money_to_account(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), BankError> {
        self.authorize(caller)?;
        let account = self
            .accounts
            .get(&from)
            .ok_or(BankError::AccountDoesNotExist { handle: from })?;
        account.transfer(self.address, &mut self.ledger, to, amount)?;
        Ok(())
    }

    // === Shares ===

    fn share_key(name: &str, symbol: &str) -> (String, String) {
        (name.to_string(), symbol.to_string())
    }

    /// Create a share; its full maximum supply starts in its own reserve.
    pub fn create_share(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        max_supply: Amount,
        price: Amount,
    ) -> Result<Address, BankError> {
        self.authorize(caller)?;
        let key = Self::share_key(name, symbol);
        if self.shares.contains_key(&key) {
            return Err(BankError::ShareAlreadyExists {
                name: key.0,
                symbol: key.1,
            });
        }
        let share = Share::new(name, symbol, self.address, max_supply, price)?;
        let address = share.address();
        self.shares.insert(key, share);
        info!(share = symbol, %max_supply, %price, "share created");
        Ok(address)
    }

    /// Resolve a share by its (name, symbol) key.
    pub fn share(&self, name: &str, symbol: &str) -> Result<&Share, BankError> {
        self.shares
            .get(&Self::share_key(name, symbol))
            .ok_or_else(|| BankError::ShareDoesNotExist {
                name: name.to_string(),
                symbol: symbol.to_string(),
            })
    }

    fn share_mut(&mut self, name: &str, symbol: &str) -> Result<&mut Share, BankError> {
        self.shares
            .get_mut(&Self::share_key(name, symbol))
            .ok_or_else(|| BankError::ShareDoesNotExist {
                name: name.to_string(),
                symbol: symbol.to_string(),
            })
    }

    /// Ledger address of a share.
    pub fn share_address(&self, name: &str, symbol: &str) -> Result<Address, BankError> {
        Ok(self.share(name, symbol)?.address())
    }

    /// One order from a share's book.
    pub fn order_on_share(
        &self,
        name: &str,
        symbol: &str,
        order_id: OrderId,
    ) -> Result<&Order, BankError> {
        Ok(self.share(name, symbol)?.get_order(order_id)?)
    }

    /// Every order ever placed on a share, earliest first.
    pub fn orders_on_share(&self, name: &str, symbol: &str) -> Result<&[Order], BankError> {
        Ok(self.share(name, symbol)?.orders())
    }

    /// Place a limit order on a share for a known account.
    pub fn place_order_on_share(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        amount: Amount,
        limit_price: Amount,
        side: OrderSide,
        submitter: Address,
        now: DateTime<Utc>,
    ) -> Result<OrderId, BankError> {
        self.authorize(caller)?;
        self.account(submitter)?;
        let bank_address = self.address;
        let share = self.share_mut(name, symbol)?;
        Ok(share.place_order(bank_address, amount, limit_price, side, submitter, now)?)
    }

    /// Execute an order against its recorded limit price.
    pub fn execute_order_on_share(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        order_id: OrderId,
        current_price: Amount,
    ) -> Result<(), BankError> {
        self.authorize(caller)?;
        let bank_address = self.address;
        let key = Self::share_key(name, symbol);
        let share = self
            .shares
            .get_mut(&key)
            .ok_or_else(|| BankError::ShareDoesNotExist {
                name: key.0.clone(),
                symbol: key.1.clone(),
            })?;
        share.execute_order(bank_address, order_id, current_price, &mut self.ledger)?;
        Ok(())
    }

    /// Buy `amount` units from a share's reserve for `to`.
    ///
    /// The cash leg (`amount * price / UNIT`) is escrowed from `to` into
    /// the share's address with an approve + transfer_from pair; a failed
    /// escrow restores the prior allowance so no intermediate state stays
    /// observable. Returns the cost paid.
    pub fn buy_share(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        amount: Amount,
        to: Address,
    ) -> Result<Amount, BankError> {
        self.authorize(caller)?;
        self.account(to)?;
        let bank_address = self.address;
        let key = Self::share_key(name, symbol);
        let share = self
            .shares
            .get_mut(&key)
            .ok_or_else(|| BankError::ShareDoesNotExist {
                name: key.0.clone(),
                symbol: key.1.clone(),
            })?;

        // Validate the unit leg up front so the escrow never needs undoing.
        let available = share.available_supply();
        if amount > available {
            return Err(ExchangeError::InsufficientSupply {
                requested: amount,
                available,
            }
            .into());
        }

        let total_cost = amount.mul_price(share.price())?;
        let prior = self.ledger.allowance(to, bank_address);
        self.ledger.approve(to, bank_address, total_cost);
        if let Err(err) = self
            .ledger
            .transfer_from(bank_address, to, share.address(), total_cost)
        {
            self.ledger.approve(to, bank_address, prior);
            return Err(err.into());
        }
        share.buy(bank_address, amount, to)?;
        Ok(total_cost)
    }

    /// Sell `amount` units from `from` back into a share's reserve.
    ///
    /// The share validates both legs before mutating anything, so a
    /// failure leaves every balance untouched. Returns the proceeds.
    pub fn sell_share(
        &mut self,
        caller: Address,
        name: &str,
        symbol: &str,
        amount: Amount,
        from: Address,
    ) -> Result<Amount, BankError> {
        self.authorize(caller)?;
        self.account(from)?;
        let bank_address = self.address;
        let key = Self::share_key(name, symbol);
        let share = self
            .shares
            .get_mut(&key)
            .ok_or_else(|| BankError::ShareDoesNotExist {
                name: key.0.clone(),
                symbol: key.1.clone(),
            })?;
        let total_cost = amount.mul_price(share.price())?;
        share.sell(bank_address, amount, from, total_cost, &mut self.ledger)?;
        Ok(total_cost)
    }

    // === Staking ===

    /// Create a staking pool paying `interest_rate` percent per year.
    pub fn create_staking(
        &mut self,
        caller: Address,
        name: &str,
        interest_rate: u64,
    ) -> Result<Address, BankError> {
        self.authorize(caller)?;
        if self.pools.contains_key(name) {
            return Err(BankError::StakingAlreadyExists {
                name: name.to_string(),
            });
        }
        let pool = StakingPool::new(name, self.address, interest_rate);
        let address = pool.address();
        self.pools.insert(name.to_string(), pool);
        info!(pool = name, rate = interest_rate, "staking pool created");
        Ok(address)
    }

    /// Resolve a pool by name.
    pub fn staking(&self, name: &str) -> Result<&StakingPool, BankError> {
        self.pools.get(name).ok_or_else(|| BankError::StakingDoesNotExist {
            name: name.to_string(),
        })
    }

    /// Escrow `amount` from the depositor into the pool, then record the
    /// deposit.
    pub fn deposit_to_staking(
        &mut self,
        caller: Address,
        name: &str,
        from: Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<(), BankError> {
        self.authorize(caller)?;
        self.account(from)?;
        let bank_address = self.address;
        let pool = self
            .pools
            .get_mut(name)
            .ok_or_else(|| BankError::StakingDoesNotExist {
                name: name.to_string(),
            })?;
        let pool_address = pool.address();

        let prior = self.ledger.allowance(from, bank_address);
        self.ledger.approve(from, bank_address, amount);
        if let Err(err) = self
            .ledger
            .transfer_from(bank_address, from, pool_address, amount)
        {
            self.ledger.approve(from, bank_address, prior);
            return Err(err.into());
        }
        pool.deposit(bank_address, from, amount, now)?;
        Ok(())
    }

    /// Close the deposit of `to`: principal plus all reward in one payout.
    pub fn withdraw_all_from_staking(
        &mut self,
        caller: Address,
        name: &str,
        to: Address,
        now: DateTime<Utc>,
    ) -> Result<Amount, BankError> {
        self.authorize(caller)?;
        self.account(to)?;
        let bank_address = self.address;
        let pool = self
            .pools
            .get_mut(name)
            .ok_or_else(|| BankError::StakingDoesNotExist {
                name: name.to_string(),
            })?;
        Ok(pool.withdraw_all(bank_address, to, now, &mut self.ledger)?)
    }

    /// Pay out the reward of `to`, leaving the principal deposited.
    pub fn withdraw_reward_from_staking(
        &mut self,
        caller: Address,
        name: &str,
        to: Address,
        now: DateTime<Utc>,
    ) -> Result<Amount, BankError> {
        self.authorize(caller)?;
        self.account(to)?;
        let bank_address = self.address;
        let pool = self
            .pools
            .get_mut(name)
            .ok_or_else(|| BankError::StakingDoesNotExist {
                name: name.to_string(),
            })?;
        Ok(pool.withdraw_reward(bank_address, to, now, &mut self.ledger)?)
    }

    /// Change a pool's rate for all future accrual windows.
    pub fn set_staking_rate(
        &mut self,
        caller: Address,
        name: &str,
        interest_rate: u64,
    ) -> Result<(), BankError> {
        self.authorize(caller)?;
        let bank_address = self.address;
        let pool = self
            .pools
            .get_mut(name)
            .ok_or_else(|| BankError::StakingDoesNotExist {
                name: name.to_string(),
            })?;
        Ok(pool.set_interest_rate(bank_address, interest_rate)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operator() -> Address {
        Address::derive("bank", &["operator"])
    }

    fn bank() -> Bank {
        Bank::new(operator())
    }

    fn create_john(bank: &mut Bank) -> Address {
        bank.create_account(operator(), "John", "Doe", 123456, Utc::now())
            .unwrap()
    }

    #[test]
    fn test_mutations_require_operator() {
        let mut bank = bank();
        let stranger = Address::derive("test", &["stranger"]);
        let result = bank.create_account(stranger, "John", "Doe", 1, Utc::now());
        assert!(matches!(result, Err(BankError::Unauthorized { .. })));
    }

    #[test]
    fn test_create_account_seeds_grant() {
        let mut bank = bank();
        let handle = create_john(&mut bank);
        assert_eq!(bank.balance_of_account(handle).unwrap(), INITIAL_GRANT);
        assert_eq!(bank.ledger().total_supply(), INITIAL_GRANT);
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let mut bank = bank();
        create_john(&mut bank);
        let result = bank.create_account(operator(), "John", "Doe", 123456, Utc::now());
        assert!(matches!(result, Err(BankError::AccountAlreadyExists { .. })));
        // directory and supply unchanged
        assert_eq!(bank.ledger().total_supply(), INITIAL_GRANT);
    }

    #[test]
    fn test_unknown_account_lookups_fail() {
        let bank = bank();
        let ghost = Address::derive("test", &["ghost"]);
        assert!(matches!(
            bank.balance_of_account(ghost),
            Err(BankError::AccountDoesNotExist { .. })
        ));
        assert!(matches!(
            bank.find_account("No", "Body", 0),
            Err(BankError::AccountDoesNotExist { .. })
        ));
    }

    #[test]
    fn test_transfer_between_accounts() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        let jane = bank
            .create_account(operator(), "Jane", "Doe", 654321, Utc::now())
            .unwrap();

        bank.transfer_money_to_account(operator(), john, jane, Amount::from_units(300))
            .unwrap();
        assert_eq!(
            bank.balance_of_account(john).unwrap(),
            Amount::from_units(700)
        );
        assert_eq!(
            bank.balance_of_account(jane).unwrap(),
            Amount::from_units(1300)
        );
    }

    #[test]
    fn test_buy_share_escrows_cost() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(1000),
            Amount::from_units(1),
        )
        .unwrap();

        let cost = bank
            .buy_share(operator(), "MegaShare", "MSH", Amount::from_units(10), john)
            .unwrap();
        assert_eq!(cost, Amount::from_units(10));

        let share_address = bank.share_address("MegaShare", "MSH").unwrap();
        assert_eq!(
            bank.balance_of_account(john).unwrap(),
            Amount::from_units(990)
        );
        assert_eq!(
            bank.ledger().balance_of(share_address),
            Amount::from_units(10)
        );
        let share = bank.share("MegaShare", "MSH").unwrap();
        assert_eq!(share.available_supply(), Amount::from_units(990));
        assert_eq!(share.outstanding_supply(), Amount::from_units(10));
    }

    #[test]
    fn test_buy_share_unaffordable_restores_allowance() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(10_000),
            Amount::from_units(1),
        )
        .unwrap();

        // 2000 units at price 1 exceed the 1000 grant
        let result = bank.buy_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(2000),
            john,
        );
        assert!(matches!(
            result,
            Err(BankError::Ledger(LedgerError::InsufficientBalance { .. }))
        ));
        assert_eq!(
            bank.balance_of_account(john).unwrap(),
            Amount::from_units(1000)
        );
        assert_eq!(
            bank.ledger().allowance(john, bank.address()),
            Amount::ZERO
        );
    }

    #[test]
    fn test_sell_share_roundtrip() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(1000),
            Amount::from_units(1),
        )
        .unwrap();
        bank.buy_share(operator(), "MegaShare", "MSH", Amount::from_units(10), john)
            .unwrap();

        let proceeds = bank
            .sell_share(operator(), "MegaShare", "MSH", Amount::from_units(10), john)
            .unwrap();
        assert_eq!(proceeds, Amount::from_units(10));
        assert_eq!(bank.balance_of_account(john).unwrap(), INITIAL_GRANT);
        let share = bank.share("MegaShare", "MSH").unwrap();
        assert_eq!(share.available_supply(), Amount::from_units(1000));
    }

    #[test]
    fn test_sell_share_failure_is_atomic() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(1000),
            Amount::from_units(1),
        )
        .unwrap();
        bank.buy_share(operator(), "MegaShare", "MSH", Amount::from_units(10), john)
            .unwrap();

        // selling more than John holds (and than is outstanding)
        let result =
            bank.sell_share(operator(), "MegaShare", "MSH", Amount::from_units(50), john);
        assert!(matches!(
            result,
            Err(BankError::Exchange(ExchangeError::InsufficientSupply { .. }))
        ));
        // no balances moved
        assert_eq!(
            bank.balance_of_account(john).unwrap(),
            Amount::from_units(990)
        );
        let share = bank.share("MegaShare", "MSH").unwrap();
        assert_eq!(share.units_of(john), Amount::from_units(10));
        assert_eq!(
            bank.ledger().balance_of(share.address()),
            Amount::from_units(10)
        );
    }

    #[test]
    fn test_duplicate_share_rejected() {
        let mut bank = bank();
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(1000),
            Amount::from_units(1),
        )
        .unwrap();
        let result = bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(9),
            Amount::from_units(9),
        );
        assert!(matches!(result, Err(BankError::ShareAlreadyExists { .. })));
        // the original share is untouched
        assert_eq!(
            bank.share("MegaShare", "MSH").unwrap().max_supply(),
            Amount::from_units(1000)
        );
    }

    #[test]
    fn test_order_flow_through_registry() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(1000),
            Amount::from_units(1),
        )
        .unwrap();

        let id = bank
            .place_order_on_share(
                operator(),
                "MegaShare",
                "MSH",
                Amount::from_units(50),
                Amount::from_units(1),
                OrderSide::Buy,
                john,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(id, 0);

        let order = bank.order_on_share("MegaShare", "MSH", 0).unwrap();
        assert_eq!(order.amount, Amount::from_units(50));
        assert!(order.is_buy());

        let result = bank.execute_order_on_share(
            operator(),
            "MegaShare",
            "MSH",
            0,
            Amount::from_units(2),
        );
        assert!(matches!(
            result,
            Err(BankError::Exchange(ExchangeError::PriceMismatch { .. }))
        ));

        bank.execute_order_on_share(operator(), "MegaShare", "MSH", 0, Amount::from_units(1))
            .unwrap();
        assert_eq!(
            bank.share("MegaShare", "MSH").unwrap().units_of(john),
            Amount::from_units(50)
        );
    }

    #[test]
    fn test_unknown_share_rejected() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        let result = bank.buy_share(operator(), "Ghost", "GST", Amount::ONE, john);
        assert!(matches!(result, Err(BankError::ShareDoesNotExist { .. })));
    }

    #[test]
    fn test_staking_deposit_and_withdraw() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        bank.create_staking(operator(), "flexible", 5).unwrap();

        let now = Utc::now();
        bank.deposit_to_staking(operator(), "flexible", john, Amount::from_units(200), now)
            .unwrap();
        assert_eq!(
            bank.balance_of_account(john).unwrap(),
            Amount::from_units(800)
        );

        // immediate withdrawal accrues nothing
        let payout = bank
            .withdraw_all_from_staking(operator(), "flexible", john, now)
            .unwrap();
        assert_eq!(payout, Amount::from_units(200));
        assert_eq!(bank.balance_of_account(john).unwrap(), INITIAL_GRANT);
        assert!(bank.staking("flexible").unwrap().deposit_of(john).is_none());
    }

    #[test]
    fn test_duplicate_staking_rejected() {
        let mut bank = bank();
        bank.create_staking(operator(), "flexible", 5).unwrap();
        let result = bank.create_staking(operator(), "flexible", 7);
        assert!(matches!(result, Err(BankError::StakingAlreadyExists { .. })));
        assert_eq!(bank.staking("flexible").unwrap().interest_rate(), 5);
    }

    #[test]
    fn test_unknown_staking_rejected() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        let result =
            bank.deposit_to_staking(operator(), "ghost", john, Amount::ONE, Utc::now());
        assert!(matches!(result, Err(BankError::StakingDoesNotExist { .. })));
    }

    #[test]
    fn test_conservation_across_operations() {
        let mut bank = bank();
        let john = create_john(&mut bank);
        let jane = bank
            .create_account(operator(), "Jane", "Doe", 654321, Utc::now())
            .unwrap();
        bank.create_share(
            operator(),
            "MegaShare",
            "MSH",
            Amount::from_units(1000),
            Amount::from_units(1),
        )
        .unwrap();
        bank.create_staking(operator(), "flexible", 5).unwrap();

        bank.buy_share(operator(), "MegaShare", "MSH", Amount::from_units(100), john)
            .unwrap();
        bank.transfer_money_to_account(operator(), jane, john, Amount::from_units(50))
            .unwrap();
        bank.deposit_to_staking(operator(), "flexible", jane, Amount::from_units(500), Utc::now())
            .unwrap();

        let sum = bank
            .ledger()
            .balances()
            .try_fold(Amount::ZERO, |acc, (_, amount)| acc.checked_add(*amount));
        assert_eq!(sum, Some(bank.ledger().total_supply()));
        assert_eq!(bank.ledger().total_supply(), Amount::from_units(2000));
    }
}
