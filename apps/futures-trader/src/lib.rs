//! CLI order client for Binance USDT-M Futures.
//!
//! The crate is organized around a small set of seams:
//!
//! - [`gateway`] defines the exchange contract ([`gateway::ExchangeGateway`])
//!   and its Binance REST implementation.
//! - [`session`] wraps a gateway with connectivity probing and per-query
//!   symbol metadata and balance lookups.
//! - [`validation`] is the pure pre-submission pipeline: symbol status,
//!   side, minimum quantity, and tick alignment.
//! - [`orders`] holds the market and limit order managers.
//! - [`cli`] parses arguments and dispatches to the managers.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod gateway;
pub mod logging;
pub mod orders;
pub mod session;
pub mod validation;

pub use gateway::{ExchangeGateway, GatewayError};
pub use orders::{LimitOrderManager, MarketOrderManager, OrderKind, OrderRequest, OrderResult, OrderSide};
pub use session::{AccountBalance, Session, SymbolMetadata};
pub use validation::ValidationError;
