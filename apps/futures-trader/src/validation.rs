//! Order admissibility checks.
//!
//! Pure functions over a [`SymbolMetadata`] snapshot: nothing here
//! contacts the gateway or mutates state. Checks run in a fixed order
//! (symbol, side, quantity, then price for limit orders) and stop at the
//! first failure, so callers always see a single rejection reason.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::orders::OrderSide;
use crate::session::SymbolMetadata;

/// Relative tolerance for the tick-alignment check, as a fraction of the
/// tick size. Guards against representation noise in parsed prices; any
/// stricter check spuriously rejects valid prices, anything looser
/// admits off-tick ones.
const TICK_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 10); // 1e-10

/// A locally rejected order. Never reaches the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Symbol unknown to the exchange, or not currently trading.
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Side was neither BUY nor SELL.
    #[error("invalid side: {0} (must be BUY or SELL)")]
    InvalidSide(String),

    /// Quantity was zero or negative.
    #[error("invalid quantity: {0} (must be positive)")]
    NonPositiveQuantity(Decimal),

    /// Quantity was below the symbol's published minimum.
    #[error("quantity {quantity} below minimum {min_qty} for {symbol}")]
    QuantityBelowMinimum {
        /// Offending quantity.
        quantity: Decimal,
        /// Minimum from the `LOT_SIZE` filter.
        min_qty: Decimal,
        /// Symbol the minimum belongs to.
        symbol: String,
    },

    /// The exchange published no `LOT_SIZE` filter for the symbol, so
    /// the quantity cannot be checked.
    #[error("no lot-size filter published for {0}")]
    MissingLotSize(String),

    /// Price was zero or negative.
    #[error("invalid price: {0} (must be positive)")]
    NonPositivePrice(Decimal),

    /// Price is not a multiple of the symbol's tick size.
    #[error("price {price} not aligned to tick size {tick_size}; nearest valid price is {nearest}")]
    PriceNotAligned {
        /// Offending price.
        price: Decimal,
        /// Tick size from the `PRICE_FILTER` filter.
        tick_size: Decimal,
        /// Nearest tick-aligned price.
        nearest: Decimal,
    },
}

/// Validate a market order. Returns the parsed side on success.
pub fn validate_market_order(
    metadata: Option<&SymbolMetadata>,
    symbol: &str,
    side: &str,
    quantity: Decimal,
) -> Result<OrderSide, ValidationError> {
    let metadata = check_symbol(metadata, symbol)?;
    let side = check_side(side)?;
    check_quantity(metadata, quantity)?;
    Ok(side)
}

/// Validate a limit order. Returns the parsed side on success.
pub fn validate_limit_order(
    metadata: Option<&SymbolMetadata>,
    symbol: &str,
    side: &str,
    quantity: Decimal,
    price: Decimal,
) -> Result<OrderSide, ValidationError> {
    let metadata = check_symbol(metadata, symbol)?;
    let side = check_side(side)?;
    check_quantity(metadata, quantity)?;
    check_price(metadata, price)?;
    Ok(side)
}

/// The symbol must be known and currently trading.
fn check_symbol<'a>(
    metadata: Option<&'a SymbolMetadata>,
    symbol: &str,
) -> Result<&'a SymbolMetadata, ValidationError> {
    match metadata {
        Some(m) if m.status.is_trading() => Ok(m),
        _ => Err(ValidationError::InvalidSymbol(symbol.to_string())),
    }
}

/// The side must be BUY or SELL, case-insensitively.
fn check_side(side: &str) -> Result<OrderSide, ValidationError> {
    side.parse()
        .map_err(|_| ValidationError::InvalidSide(side.to_string()))
}

/// The quantity must be strictly positive and at least the symbol minimum.
fn check_quantity(metadata: &SymbolMetadata, quantity: Decimal) -> Result<(), ValidationError> {
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }

    let min_qty = metadata
        .min_qty
        .ok_or_else(|| ValidationError::MissingLotSize(metadata.symbol.clone()))?;

    if quantity < min_qty {
        return Err(ValidationError::QuantityBelowMinimum {
            quantity,
            min_qty,
            symbol: metadata.symbol.clone(),
        });
    }

    Ok(())
}

/// The price must be strictly positive and aligned to the tick size.
///
/// Alignment: `|price - round(price / tick) * tick| <= tick * 1e-10`.
/// A symbol without a usable price filter skips the alignment check.
fn check_price(metadata: &SymbolMetadata, price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice(price));
    }

    let Some(tick_size) = metadata.tick_size.filter(|t| *t > Decimal::ZERO) else {
        return Ok(());
    };

    let nearest = ((price / tick_size).round() * tick_size).normalize();
    let tolerance = tick_size * TICK_TOLERANCE;

    if (price - nearest).abs() <= tolerance {
        Ok(())
    } else {
        Err(ValidationError::PriceNotAligned {
            price,
            tick_size,
            nearest,
        })
    }
}
