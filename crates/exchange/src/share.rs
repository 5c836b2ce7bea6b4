//! A tradable share with its own reserve and order book

use chrono::{DateTime, Utc};
use ecubank_core::{Address, Amount};
use ecubank_ledger::{Ledger, LedgerError};
use tracing::info;

use crate::error::ExchangeError;
use crate::order::{Order, OrderId, OrderSide};

/// A tradable asset with a fixed maximum supply and its own order book.
///
/// The share's units live in a private unit ledger; the share's own address
/// holds the undistributed reserve. Cash stays in the bank's ledger and is
/// settled against the same address, so the share accumulates the proceeds
/// of its sales there.
#[derive(Debug, Clone)]
pub struct Share {
    name: String,
    symbol: String,
    address: Address,
    owner: Address,
    max_supply: Amount,
    price: Amount,
    best_bid: Option<Amount>,
    best_ask: Option<Amount>,
    units: Ledger,
    orders: Vec<Order>,
}

impl Share {
    /// Create a share and mint its full maximum supply into the reserve.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        owner: Address,
        max_supply: Amount,
        price: Amount,
    ) -> Result<Self, ExchangeError> {
        let name = name.into();
        let symbol = symbol.into();
        let address = Address::derive("share", &[&name, &symbol]);
        let mut units = Ledger::new();
        units.mint(address, max_supply)?;
        Ok(Self {
            name,
            symbol,
            address,
            owner,
            max_supply,
            price,
            best_bid: None,
            best_ask: None,
            units,
            orders: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Current quoted price per unit.
    pub fn price(&self) -> Amount {
        self.price
    }

    pub fn max_supply(&self) -> Amount {
        self.max_supply
    }

    /// Highest sell-side limit seen so far.
    pub fn best_ask(&self) -> Option<Amount> {
        self.best_ask
    }

    /// Lowest buy-side limit seen so far.
    pub fn best_bid(&self) -> Option<Amount> {
        self.best_bid
    }

    /// Units still held in reserve.
    pub fn available_supply(&self) -> Amount {
        self.units.balance_of(self.address)
    }

    /// Units held by outside parties.
    pub fn outstanding_supply(&self) -> Amount {
        self.max_supply
            .checked_sub(self.available_supply())
            .unwrap_or(Amount::ZERO)
    }

    /// Unit balance of an arbitrary holder.
    pub fn units_of(&self, holder: Address) -> Amount {
        self.units.balance_of(holder)
    }

    /// Number of orders ever placed, which is also the next order id.
    pub fn orders_count(&self) -> u64 {
        self.orders.len() as u64
    }

    fn check_owner(&self, caller: Address) -> Result<(), ExchangeError> {
        if caller != self.owner {
            return Err(ExchangeError::NotShareOwner {
                caller,
                name: self.name.clone(),
                symbol: self.symbol.clone(),
            });
        }
        Ok(())
    }

    /// Move `amount` units from the reserve to `to`.
    ///
    /// The cash leg is escrowed by the registry before this is called.
    pub fn buy(&mut self, caller: Address, amount: Amount, to: Address) -> Result<(), ExchangeError> {
        self.check_owner(caller)?;
        let available = self.available_supply();
        if amount > available {
            return Err(ExchangeError::InsufficientSupply {
                requested: amount,
                available,
            });
        }
        self.units.transfer(self.address, to, amount)?;
        info!(
            share = %self.symbol,
            %amount,
            price = %self.price,
            buyer = %to,
            "share units bought"
        );
        Ok(())
    }

    /// Buy back `amount` units from `from`, paying `total_cost` cash out of
    /// the share's reserve.
    ///
    /// Both legs are validated before either moves, so a failure leaves
    /// every balance untouched.
    pub fn sell(
        &mut self,
        caller: Address,
        amount: Amount,
        from: Address,
        total_cost: Amount,
        cash: &mut Ledger,
    ) -> Result<(), ExchangeError> {
        self.check_owner(caller)?;
        let outstanding = self.outstanding_supply();
        if amount > outstanding {
            return Err(ExchangeError::InsufficientSupply {
                requested: amount,
                available: outstanding,
            });
        }
        let held = self.units.balance_of(from);
        if amount > held {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                requested: amount,
                available: held,
            }
            .into());
        }
        let cash_reserve = cash.balance_of(self.address);
        if total_cost > cash_reserve {
            return Err(LedgerError::InsufficientBalance {
                account: self.address,
                requested: total_cost,
                available: cash_reserve,
            }
            .into());
        }
        cash.transfer(self.address, from, total_cost)?;
        self.units.transfer(from, self.address, amount)?;
        info!(
            share = %self.symbol,
            %amount,
            proceeds = %total_cost,
            seller = %from,
            "share units sold back"
        );
        Ok(())
    }

    /// Record a new limit order, update the bid/ask trackers and requote.
    ///
    /// Returns the new sequential order id.
    pub fn place_order(
        &mut self,
        caller: Address,
        amount: Amount,
        limit_price: Amount,
        side: OrderSide,
        submitter: Address,
        now: DateTime<Utc>,
    ) -> Result<OrderId, ExchangeError> {
        self.check_owner(caller)?;
        let id = self.orders.len() as OrderId;
        self.orders.push(Order {
            id,
            submitter,
            side,
            amount,
            limit_price,
            created_at: now,
        });
        // Running extremes: a sell submission can only raise the tracked
        // ask, a buy submission can only lower the tracked bid.
        match side {
            OrderSide::Sell => {
                self.best_ask = Some(match self.best_ask {
                    Some(ask) if ask >= limit_price => ask,
                    _ => limit_price,
                });
            }
            OrderSide::Buy => {
                self.best_bid = Some(match self.best_bid {
                    Some(bid) if bid <= limit_price => bid,
                    _ => limit_price,
                });
            }
        }
        self.requote();
        info!(
            share = %self.symbol,
            order = id,
            %side,
            %amount,
            limit = %limit_price,
            "order placed"
        );
        Ok(id)
    }

    /// Requote to the midpoint once both sides have been observed.
    fn requote(&mut self) {
        if let (Some(bid), Some(ask)) = (self.best_bid, self.best_ask) {
            if let Some(sum) = bid.checked_add(ask) {
                self.price = Amount::from_base_units(sum.base_units() / 2);
            }
        }
    }

    /// Execute a previously placed order at `current_price`.
    ///
    /// The price gate is strict equality: an order only ever executes at
    /// the price it was placed at. On a match the quoted price moves to
    /// `current_price` and the order's recorded amount and submitter are
    /// settled through `buy` or `sell`.
    pub fn execute_order(
        &mut self,
        caller: Address,
        order_id: OrderId,
        current_price: Amount,
        cash: &mut Ledger,
    ) -> Result<(), ExchangeError> {
        self.check_owner(caller)?;
        let order = self
            .orders
            .get(order_id as usize)
            .cloned()
            .ok_or(ExchangeError::OrderDoesNotExist(order_id))?;
        if current_price != order.limit_price {
            return Err(ExchangeError::PriceMismatch {
                expected: order.limit_price,
                actual: current_price,
            });
        }
        self.price = current_price;
        match order.side {
            OrderSide::Buy => self.buy(caller, order.amount, order.submitter),
            OrderSide::Sell => {
                let total_cost = order.amount.mul_price(current_price)?;
                self.sell(caller, order.amount, order.submitter, total_cost, cash)
            }
        }
    }

    /// Look up one order. Fails when `order_id` was never assigned.
    pub fn get_order(&self, order_id: OrderId) -> Result<&Order, ExchangeError> {
        self.orders
            .get(order_id as usize)
            .ok_or(ExchangeError::OrderDoesNotExist(order_id))
    }

    /// All orders ever placed, earliest first. Pure snapshot, restartable.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
}
