//! CLI commands

use ecubank_core::{Address, Amount};
use ecubank_events::Operation;
use ecubank_exchange::OrderSide;
use rust_decimal::Decimal;

use crate::context::{AppContext, Applied};

fn amount(value: Decimal) -> anyhow::Result<Amount> {
    Ok(Amount::from_decimal(value)?)
}

/// Create an account and seed it with the initial grant
pub fn create_account(
    ctx: &mut AppContext,
    first_name: &str,
    last_name: &str,
    account_number: u32,
) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::CreateAccount {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        account_number,
    })?;

    if let Applied::AccountCreated { handle } = applied {
        println!(
            "✅ Account created for {} {} ({})",
            first_name, last_name, account_number
        );
        println!("   Handle: {handle}");
    }
    Ok(())
}

/// Show the balance of an account
pub fn balance(
    ctx: &AppContext,
    first_name: &str,
    last_name: &str,
    account_number: u32,
) -> anyhow::Result<()> {
    let account = ctx.bank.find_account(first_name, last_name, account_number)?;
    let balance = account.balance(ctx.bank.ledger());
    println!(
        "Balance for {} {}: {} ECU (handle {})",
        first_name,
        last_name,
        balance,
        account.address()
    );
    Ok(())
}

/// Transfer money from an account to any ledger identity
pub fn transfer(
    ctx: &mut AppContext,
    from: Address,
    to: Address,
    value: Decimal,
) -> anyhow::Result<()> {
    let amount = amount(value)?;
    ctx.commit(Operation::TransferMoney { from, to, amount })?;
    println!("✅ Transferred {amount} ECU from {from} to {to}");
    Ok(())
}

/// Create a tradable share
pub fn create_share(
    ctx: &mut AppContext,
    name: &str,
    symbol: &str,
    max_supply: Decimal,
    price: Decimal,
) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::CreateShare {
        name: name.to_string(),
        symbol: symbol.to_string(),
        max_supply: amount(max_supply)?,
        price: amount(price)?,
    })?;

    if let Applied::ShareCreated { address } = applied {
        println!("✅ Share {name} ({symbol}) created");
        println!("   Address: {address}");
    }
    Ok(())
}

/// Show a share's quote and supply figures
pub fn share_info(ctx: &AppContext, name: &str, symbol: &str) -> anyhow::Result<()> {
    let share = ctx.bank.share(name, symbol)?;
    println!("Share {} ({})", share.name(), share.symbol());
    println!("   Address:     {}", share.address());
    println!("   Price:       {} ECU", share.price());
    println!("   Available:   {}", share.available_supply());
    println!("   Outstanding: {}", share.outstanding_supply());
    match (share.best_bid(), share.best_ask()) {
        (Some(bid), Some(ask)) => println!("   Bid/Ask:     {bid} / {ask}"),
        (Some(bid), None) => println!("   Bid/Ask:     {bid} / -"),
        (None, Some(ask)) => println!("   Bid/Ask:     - / {ask}"),
        (None, None) => {}
    }
    println!("   Orders:      {}", share.orders_count());
    Ok(())
}

/// Buy units from a share's reserve
pub fn buy(
    ctx: &mut AppContext,
    name: &str,
    symbol: &str,
    value: Decimal,
    to: Address,
) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::BuyShare {
        name: name.to_string(),
        symbol: symbol.to_string(),
        amount: amount(value)?,
        to,
    })?;

    if let Applied::ShareBought { cost } = applied {
        println!("✅ Bought {value} {symbol} for {cost} ECU");
    }
    Ok(())
}

/// Sell units back into a share's reserve
pub fn sell(
    ctx: &mut AppContext,
    name: &str,
    symbol: &str,
    value: Decimal,
    from: Address,
) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::SellShare {
        name: name.to_string(),
        symbol: symbol.to_string(),
        amount: amount(value)?,
        from,
    })?;

    if let Applied::ShareSold { proceeds } = applied {
        println!("✅ Sold {value} {symbol} for {proceeds} ECU");
    }
    Ok(())
}

/// Place a limit order on a share
pub fn place_order(
    ctx: &mut AppContext,
    name: &str,
    symbol: &str,
    value: Decimal,
    limit: Decimal,
    side: OrderSide,
    submitter: Address,
) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::PlaceOrder {
        name: name.to_string(),
        symbol: symbol.to_string(),
        amount: amount(value)?,
        limit_price: amount(limit)?,
        side,
        submitter,
    })?;

    if let Applied::OrderPlaced { order_id } = applied {
        println!("✅ Order {order_id} placed: {side} {value} {symbol} at limit {limit}");
    }
    Ok(())
}

/// Execute an order at its recorded limit price
pub fn execute_order(
    ctx: &mut AppContext,
    name: &str,
    symbol: &str,
    order_id: u64,
    price: Decimal,
) -> anyhow::Result<()> {
    ctx.commit(Operation::ExecuteOrder {
        name: name.to_string(),
        symbol: symbol.to_string(),
        order_id,
        current_price: amount(price)?,
    })?;
    println!("✅ Order {order_id} executed at {price}");
    Ok(())
}

/// Show one order
pub fn order(ctx: &AppContext, name: &str, symbol: &str, order_id: u64) -> anyhow::Result<()> {
    let order = ctx.bank.order_on_share(name, symbol, order_id)?;
    println!(
        "Order {}: {} {} at limit {} (submitted {} by {})",
        order.id, order.side, order.amount, order.limit_price, order.created_at, order.submitter
    );
    Ok(())
}

/// List every order ever placed on a share
pub fn orders(ctx: &AppContext, name: &str, symbol: &str) -> anyhow::Result<()> {
    let orders = ctx.bank.orders_on_share(name, symbol)?;
    if orders.is_empty() {
        println!("No orders on {name} ({symbol})");
        return Ok(());
    }

    println!("Order book for {name} ({symbol}), {} orders:", orders.len());
    println!("{:-<72}", "");
    println!("{:>6} | {:>4} | {:>16} | {:>16} | placed", "ID", "side", "amount", "limit");
    println!("{:-<72}", "");
    for order in orders {
        println!(
            "{:>6} | {:>4} | {:>16} | {:>16} | {}",
            order.id,
            order.side.to_string(),
            order.amount.to_string(),
            order.limit_price.to_string(),
            order.created_at.format("%Y-%m-%d %H:%M:%S"),
        );
    }
    Ok(())
}

/// Create an interest-bearing staking pool
pub fn create_staking(ctx: &mut AppContext, name: &str, rate: u64) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::CreateStaking {
        name: name.to_string(),
        interest_rate: rate,
    })?;

    if let Applied::StakingCreated { address } = applied {
        println!("✅ Staking pool {name} created at {rate}% per year");
        println!("   Address: {address}");
    }
    Ok(())
}

/// Deposit into a staking pool
pub fn stake_deposit(
    ctx: &mut AppContext,
    pool: &str,
    from: Address,
    value: Decimal,
) -> anyhow::Result<()> {
    let amount = amount(value)?;
    ctx.commit(Operation::DepositToStaking {
        pool: pool.to_string(),
        from,
        amount,
    })?;
    println!("✅ Deposited {amount} ECU into {pool} for {from}");
    Ok(())
}

/// Withdraw principal plus reward, closing the deposit
pub fn stake_withdraw_all(ctx: &mut AppContext, pool: &str, to: Address) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::WithdrawAllFromStaking {
        pool: pool.to_string(),
        to,
    })?;

    if let Applied::Withdrawn { amount } = applied {
        println!("✅ Withdrew {amount} ECU from {pool} (deposit closed)");
    }
    Ok(())
}

/// Withdraw the reward only, leaving the principal deposited
pub fn stake_withdraw_reward(ctx: &mut AppContext, pool: &str, to: Address) -> anyhow::Result<()> {
    let applied = ctx.commit(Operation::WithdrawRewardFromStaking {
        pool: pool.to_string(),
        to,
    })?;

    if let Applied::Withdrawn { amount } = applied {
        println!("✅ Withdrew {amount} ECU reward from {pool}");
    }
    Ok(())
}

/// Change a pool's interest rate
pub fn stake_rate(ctx: &mut AppContext, pool: &str, rate: u64) -> anyhow::Result<()> {
    ctx.commit(Operation::SetStakingRate {
        pool: pool.to_string(),
        interest_rate: rate,
    })?;
    println!("✅ {pool} now pays {rate}% per year");
    Ok(())
}
