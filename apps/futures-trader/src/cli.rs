//! Command-line interface.
//!
//! Thin dispatch shell: parses arguments, resolves credentials, wires a
//! session and the order managers, and formats results for the terminal.
//! All trading behavior lives in the managers; all failure detail lives
//! in the log file.

use std::sync::Arc;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::gateway::GatewayError;
use crate::gateway::binance::{BinanceConfig, BinanceEnvironment, BinanceFuturesGateway};
use crate::orders::{LimitOrderManager, MarketOrderManager, OrderResult};
use crate::session::{AccountBalance, Credentials, Session};

/// Futures Trader CLI.
#[derive(Debug, Parser)]
#[command(
    name = "futures-trader",
    version,
    subcommand_precedence_over_arg = true,
    about = "CLI order client for Binance USDT-M Futures",
    after_help = "Examples:\n  \
        futures-trader market BTCUSDT buy 0.001\n  \
        futures-trader limit ETHUSDT sell 0.01 --price 2500.0\n  \
        futures-trader balance"
)]
pub struct Cli {
    /// Binance API key.
    #[arg(long, global = true, env = "BINANCE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Binance API secret.
    #[arg(long, global = true, env = "BINANCE_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Trade against the exchange testnet instead of production.
    #[arg(
        long,
        global = true,
        value_name = "BOOL",
        default_value_t = true,
        default_missing_value = "true",
        num_args = 0..=1,
        action = ArgAction::Set
    )]
    pub testnet: bool,

    /// Enable verbose (debug) console logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Place a market order at the prevailing price.
    Market {
        /// Trading pair, e.g. BTCUSDT.
        symbol: String,
        /// Order side.
        #[arg(value_name = "buy|sell")]
        side: String,
        /// Order quantity.
        quantity: Decimal,
    },
    /// Place a limit order (GTC) at a stated price.
    Limit {
        /// Trading pair, e.g. ETHUSDT.
        symbol: String,
        /// Order side.
        #[arg(value_name = "buy|sell")]
        side: String,
        /// Order quantity.
        quantity: Decimal,
        /// Limit price.
        #[arg(long)]
        price: Decimal,
    },
    /// Show the account balance.
    Balance,
    /// List open orders.
    Orders {
        /// Restrict the listing to one symbol.
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Describe the interface without contacting the exchange.
    Demo,
}

/// Startup configuration failure, detected before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No credentials via flags or environment.
    #[error(
        "API credentials required: pass --api-key and --api-secret, \
         or set BINANCE_API_KEY and BINANCE_API_SECRET"
    )]
    MissingCredentials,
}

/// Dispatch a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        anyhow::bail!("no command given");
    };

    let environment = if cli.testnet {
        BinanceEnvironment::Testnet
    } else {
        BinanceEnvironment::Production
    };

    match command {
        // Static description; needs neither credentials nor a connection.
        Command::Demo => print!("{}", demo_text()),
        Command::Market {
            symbol,
            side,
            quantity,
        } => {
            let session = connect(cli.api_key, cli.api_secret, environment).await?;
            let manager = MarketOrderManager::new(session);
            println!("placing market {side} order for {quantity} {symbol}");
            match manager.place_market_order(&symbol, &side, quantity).await {
                Some(result) => print_order_result(&result),
                None => println!("failed to place market order; see {}", crate::logging::LOG_FILE),
            }
        }
        Command::Limit {
            symbol,
            side,
            quantity,
            price,
        } => {
            let session = connect(cli.api_key, cli.api_secret, environment).await?;
            let manager = LimitOrderManager::new(session);
            println!("placing limit {side} order for {quantity} {symbol} at {price}");
            match manager
                .place_limit_order(&symbol, &side, quantity, price)
                .await
            {
                Some(result) => print_order_result(&result),
                None => println!("failed to place limit order; see {}", crate::logging::LOG_FILE),
            }
        }
        Command::Balance => {
            let session = connect(cli.api_key, cli.api_secret, environment).await?;
            match session.account_balance().await {
                Some(balance) => print!("{}", format_balance(&balance)),
                None => {
                    println!("failed to get account balance; see {}", crate::logging::LOG_FILE);
                }
            }
        }
        Command::Orders { symbol } => {
            let session = connect(cli.api_key, cli.api_secret, environment).await?;
            let manager = LimitOrderManager::new(session);
            let orders = manager.get_open_orders(symbol.as_deref()).await;
            if orders.is_empty() {
                println!("no open orders found");
            } else {
                println!("{} open orders:", orders.len());
                for order in orders {
                    println!(
                        "  id {}  {}  {}  qty {}  price {}  {}",
                        order.order_id,
                        order.symbol,
                        order.side.as_deref().unwrap_or("-"),
                        order
                            .orig_qty
                            .map_or_else(|| "-".to_string(), |q| q.to_string()),
                        order
                            .price
                            .map_or_else(|| "-".to_string(), |p| p.to_string()),
                        order.status,
                    );
                }
            }
        }
    }

    Ok(())
}

/// Resolve credentials and open a probed session against the venue.
async fn connect(
    api_key: Option<String>,
    api_secret: Option<String>,
    environment: BinanceEnvironment,
) -> anyhow::Result<Arc<Session<BinanceFuturesGateway>>> {
    let credentials = resolve_credentials(api_key, api_secret)?;
    let config = BinanceConfig::new(credentials.api_key, credentials.api_secret, environment);
    let gateway = Arc::new(BinanceFuturesGateway::new(&config).map_err(GatewayError::from)?);

    println!("connecting to Binance USDT-M Futures ({environment})...");
    Ok(Arc::new(Session::initialize(gateway).await))
}

/// Resolve credentials from flags (clap already applied env fallbacks).
fn resolve_credentials(
    api_key: Option<String>,
    api_secret: Option<String>,
) -> Result<Credentials, ConfigError> {
    match (api_key, api_secret) {
        (Some(api_key), Some(api_secret)) if !api_key.is_empty() && !api_secret.is_empty() => {
            Ok(Credentials {
                api_key,
                api_secret,
            })
        }
        _ => Err(ConfigError::MissingCredentials),
    }
}

/// Print an accepted order.
fn print_order_result(result: &OrderResult) {
    println!("order placed:");
    println!("  order id: {}", result.order_id);
    println!("  symbol:   {}", result.symbol);
    println!("  side:     {}", result.side);
    println!("  type:     {}", result.kind);
    println!("  quantity: {}", result.quantity);
    if let Some(price) = result.price {
        println!("  price:    {price}");
    }
    println!(
        "  status:   {}",
        result.status.as_deref().unwrap_or("UNKNOWN")
    );
}

/// Render the balance report. All figures print at 4 decimal places.
fn format_balance(balance: &AccountBalance) -> String {
    format!(
        "account balance:\n  \
         total wallet balance:  {:.4} USDT\n  \
         available balance:     {:.4} USDT\n  \
         total unrealized PnL:  {:.4} USDT\n  \
         total margin balance:  {:.4} USDT\n",
        balance.total_wallet_balance,
        balance.available_balance,
        balance.total_unrealized_pnl,
        balance.total_margin_balance,
    )
}

/// Static interface description for `demo`. No network activity.
fn demo_text() -> String {
    let mut out = String::new();
    out.push_str("futures-trader - Binance USDT-M Futures order client\n");
    out.push_str("=====================================================\n\n");
    out.push_str("market orders:\n");
    out.push_str("  place immediate buy/sell orders at the current price\n");
    out.push_str("  example: futures-trader market BTCUSDT buy 0.001\n\n");
    out.push_str("limit orders:\n");
    out.push_str("  place GTC orders at a specific price level\n");
    out.push_str("  example: futures-trader limit ETHUSDT sell 0.01 --price 2500.0\n\n");
    out.push_str("account balance:\n");
    out.push_str("  example: futures-trader balance\n\n");
    out.push_str("open orders:\n");
    out.push_str("  example: futures-trader orders --symbol BTCUSDT\n\n");
    out.push_str("configuration:\n");
    out.push_str("  uses the Binance testnet by default for safe testing\n");
    out.push_str("  every action is logged to trading-bot.log\n");
    out.push_str("  symbols, quantities, and prices are validated locally before submission\n\n");
    out.push_str("credentials:\n");
    out.push_str("  1. create testnet keys at https://testnet.binancefuture.com\n");
    out.push_str("  2. pass --api-key/--api-secret, or set BINANCE_API_KEY/BINANCE_API_SECRET\n");
    out
}
