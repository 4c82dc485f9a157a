//! Trading session: credentials, gateway handle, and exchange metadata
//! lookups shared by the order managers.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::gateway::{AccountInfo, ExchangeGateway, SymbolInfo};

/// API credentials, resolved once at startup from flags or environment.
#[derive(Clone)]
pub struct Credentials {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key is semi-public, secret never leaves the process.
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

/// Trading status of a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolStatus {
    /// Open for trading.
    Trading,
    /// Any other exchange-defined status (`BREAK`, `SETTLING`, ...).
    Other(String),
}

impl SymbolStatus {
    /// Check whether the symbol is open for trading.
    #[must_use]
    pub const fn is_trading(&self) -> bool {
        matches!(self, Self::Trading)
    }
}

/// Per-symbol trading rules, snapshotted from the exchange metadata.
///
/// Always re-fetched per query; never cached across calls, so validation
/// runs against the rules currently published by the exchange.
#[derive(Debug, Clone)]
pub struct SymbolMetadata {
    /// Trading pair, upper-cased.
    pub symbol: String,
    /// Trading status.
    pub status: SymbolStatus,
    /// Minimum order quantity from the `LOT_SIZE` filter, if published.
    pub min_qty: Option<Decimal>,
    /// Price increment from the `PRICE_FILTER` filter, if published.
    pub tick_size: Option<Decimal>,
}

impl SymbolMetadata {
    /// Extract the trading rules consumed by validation from a raw
    /// exchange info entry.
    #[must_use]
    pub fn from_info(info: &SymbolInfo) -> Self {
        let status = if info.status == "TRADING" {
            SymbolStatus::Trading
        } else {
            SymbolStatus::Other(info.status.clone())
        };

        let mut min_qty = None;
        let mut tick_size = None;
        for filter in &info.filters {
            match filter.filter_type.as_str() {
                "LOT_SIZE" => min_qty = filter.min_qty,
                "PRICE_FILTER" => tick_size = filter.tick_size,
                _ => {}
            }
        }

        Self {
            symbol: info.symbol.to_uppercase(),
            status,
            min_qty,
            tick_size,
        }
    }
}

/// Account balance snapshot with absent fields coerced to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    /// Total wallet balance.
    pub total_wallet_balance: Decimal,
    /// Total unrealized PnL.
    pub total_unrealized_pnl: Decimal,
    /// Total margin balance.
    pub total_margin_balance: Decimal,
    /// Balance available for new orders.
    pub available_balance: Decimal,
}

impl From<AccountInfo> for AccountBalance {
    fn from(info: AccountInfo) -> Self {
        Self {
            total_wallet_balance: info.total_wallet_balance.unwrap_or(Decimal::ZERO),
            total_unrealized_pnl: info.total_unrealized_profit.unwrap_or(Decimal::ZERO),
            total_margin_balance: info.total_margin_balance.unwrap_or(Decimal::ZERO),
            available_balance: info.available_balance.unwrap_or(Decimal::ZERO),
        }
    }
}

/// A live session against one exchange gateway.
///
/// Owns the gateway handle for the lifetime of the process. Holds no
/// other state: every metadata or balance query goes back to the venue.
#[derive(Debug)]
pub struct Session<G: ExchangeGateway> {
    gateway: Arc<G>,
}

impl<G: ExchangeGateway> Session<G> {
    /// Create a session without probing the gateway.
    #[must_use]
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Create a session and run one connectivity probe.
    ///
    /// The probe result is logged but not fatal: a session whose probe
    /// failed still exists and each later call fails (and is logged)
    /// individually.
    pub async fn initialize(gateway: Arc<G>) -> Self {
        let session = Self::new(gateway);
        session.check_connectivity().await;
        session
    }

    /// Probe the gateway with one account query and log the outcome.
    pub async fn check_connectivity(&self) -> bool {
        match self.gateway.get_account_info().await {
            Ok(info) => {
                let balance = AccountBalance::from(info);
                tracing::info!(
                    total_wallet_balance = %balance.total_wallet_balance,
                    available_balance = %balance.available_balance,
                    "connected to exchange"
                );
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "connectivity check failed");
                false
            }
        }
    }

    /// Access the underlying gateway.
    #[must_use]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Look up trading rules for one symbol.
    ///
    /// Fetches the full exchange metadata and scans linearly for a
    /// case-insensitive exact match. An unknown symbol is an absent
    /// result, not an error; a gateway failure is logged and also maps
    /// to an absent result.
    pub async fn symbol_metadata(&self, symbol: &str) -> Option<SymbolMetadata> {
        let info = match self.gateway.get_exchange_info().await {
            Ok(info) => info,
            Err(e) => {
                tracing::error!(symbol, error = %e, "failed to fetch exchange info");
                return None;
            }
        };

        let wanted = symbol.to_uppercase();
        info.symbols
            .iter()
            .find(|s| s.symbol.eq_ignore_ascii_case(&wanted))
            .map(SymbolMetadata::from_info)
    }

    /// Fetch the account balance snapshot.
    pub async fn account_balance(&self) -> Option<AccountBalance> {
        match self.gateway.get_account_info().await {
            Ok(info) => {
                let balance = AccountBalance::from(info);
                tracing::info!(
                    total_wallet_balance = %balance.total_wallet_balance,
                    total_unrealized_pnl = %balance.total_unrealized_pnl,
                    total_margin_balance = %balance.total_margin_balance,
                    available_balance = %balance.available_balance,
                    "account balance retrieved"
                );
                Some(balance)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch account balance");
                None
            }
        }
    }
}
