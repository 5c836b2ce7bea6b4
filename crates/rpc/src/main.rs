//! Ecubank CLI - Main entry point

use clap::{Parser, Subcommand};
use ecubank_core::Address;
use ecubank_exchange::OrderSide;
use ecubank_rpc::{commands, AppContext};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecubank")]
#[command(about = "Ecubank - Toy banking and exchange ledger", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account seeded with the initial grant
    CreateAccount {
        first_name: String,
        last_name: String,
        account_number: u32,
    },

    /// Show an account's ECU balance
    Balance {
        first_name: String,
        last_name: String,
        account_number: u32,
    },

    /// Transfer ECU from an account to any ledger address
    Transfer {
        /// Source account handle (hex)
        from: Address,
        /// Destination ledger address (hex)
        to: Address,
        /// Amount in ECU
        amount: Decimal,
    },

    /// Create a tradable share
    CreateShare {
        name: String,
        symbol: String,
        /// Maximum mintable quantity
        #[arg(long)]
        max_supply: Decimal,
        /// Creation price per unit in ECU
        #[arg(long)]
        price: Decimal,
    },

    /// Show a share's quote and supply
    ShareInfo { name: String, symbol: String },

    /// Buy units from a share's reserve
    Buy {
        name: String,
        symbol: String,
        /// Quantity of units
        amount: Decimal,
        /// Buying account handle (hex)
        #[arg(long)]
        to: Address,
    },

    /// Sell units back into a share's reserve
    Sell {
        name: String,
        symbol: String,
        /// Quantity of units
        amount: Decimal,
        /// Selling account handle (hex)
        #[arg(long)]
        from: Address,
    },

    /// Place a limit order on a share
    PlaceOrder {
        name: String,
        symbol: String,
        /// Quantity of units
        amount: Decimal,
        /// Limit price per unit in ECU
        #[arg(long)]
        limit: Decimal,
        /// Order side: buy or sell
        #[arg(long)]
        side: String,
        /// Submitting account handle (hex)
        #[arg(long)]
        submitter: Address,
    },

    /// Execute an order at its recorded limit price
    ExecuteOrder {
        name: String,
        symbol: String,
        order_id: u64,
        /// Current price per unit in ECU
        #[arg(long)]
        price: Decimal,
    },

    /// Show one order
    Order {
        name: String,
        symbol: String,
        order_id: u64,
    },

    /// List every order ever placed on a share
    Orders { name: String, symbol: String },

    /// Create an interest-bearing staking pool
    CreateStaking {
        name: String,
        /// Annual interest rate in percent
        rate: u64,
    },

    /// Deposit ECU into a staking pool
    StakeDeposit {
        pool: String,
        /// Depositing account handle (hex)
        from: Address,
        /// Amount in ECU
        amount: Decimal,
    },

    /// Withdraw principal plus reward, closing the deposit
    StakeWithdrawAll {
        pool: String,
        /// Depositor account handle (hex)
        to: Address,
    },

    /// Withdraw the reward only, leaving the principal deposited
    StakeWithdrawReward {
        pool: String,
        /// Depositor account handle (hex)
        to: Address,
    },

    /// Change a pool's annual interest rate
    StakeRate {
        pool: String,
        /// New rate in percent
        rate: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut ctx = AppContext::new(&cli.data)?;

    match cli.command {
        Commands::CreateAccount {
            first_name,
            last_name,
            account_number,
        } => {
            commands::create_account(&mut ctx, &first_name, &last_name, account_number)?;
        }

        Commands::Balance {
            first_name,
            last_name,
            account_number,
        } => {
            commands::balance(&ctx, &first_name, &last_name, account_number)?;
        }

        Commands::Transfer { from, to, amount } => {
            commands::transfer(&mut ctx, from, to, amount)?;
        }

        Commands::CreateShare {
            name,
            symbol,
            max_supply,
            price,
        } => {
            commands::create_share(&mut ctx, &name, &symbol, max_supply, price)?;
        }

        Commands::ShareInfo { name, symbol } => {
            commands::share_info(&ctx, &name, &symbol)?;
        }

        Commands::Buy {
            name,
            symbol,
            amount,
            to,
        } => {
            commands::buy(&mut ctx, &name, &symbol, amount, to)?;
        }

        Commands::Sell {
            name,
            symbol,
            amount,
            from,
        } => {
            commands::sell(&mut ctx, &name, &symbol, amount, from)?;
        }

        Commands::PlaceOrder {
            name,
            symbol,
            amount,
            limit,
            side,
            submitter,
        } => {
            let side: OrderSide = side
                .parse()
                .map_err(|_| anyhow::anyhow!("side must be 'buy' or 'sell', got '{side}'"))?;
            commands::place_order(&mut ctx, &name, &symbol, amount, limit, side, submitter)?;
        }

        Commands::ExecuteOrder {
            name,
            symbol,
            order_id,
            price,
        } => {
            commands::execute_order(&mut ctx, &name, &symbol, order_id, price)?;
        }

        Commands::Order {
            name,
            symbol,
            order_id,
        } => {
            commands::order(&ctx, &name, &symbol, order_id)?;
        }

        Commands::Orders { name, symbol } => {
            commands::orders(&ctx, &name, &symbol)?;
        }

        Commands::CreateStaking { name, rate } => {
            commands::create_staking(&mut ctx, &name, rate)?;
        }

        Commands::StakeDeposit { pool, from, amount } => {
            commands::stake_deposit(&mut ctx, &pool, from, amount)?;
        }

        Commands::StakeWithdrawAll { pool, to } => {
            commands::stake_withdraw_all(&mut ctx, &pool, to)?;
        }

        Commands::StakeWithdrawReward { pool, to } => {
            commands::stake_withdraw_reward(&mut ctx, &pool, to)?;
        }

        Commands::StakeRate { pool, rate } => {
            commands::stake_rate(&mut ctx, &pool, rate)?;
        }
    }

    Ok(())
}
