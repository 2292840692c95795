//! A single executed trade.

use super::error::StocksError;
use super::ticker::{BuySellIndicator, TickerSymbol};
use chrono::NaiveDateTime;

/// Immutable record of one execution. Only constructible through [`Trade::new`],
/// so quantity is always positive and price finite and never negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    ticker_symbol: TickerSymbol,
    timestamp: NaiveDateTime,
    quantity: u64,
    price_per_share: f64,
    side: BuySellIndicator,
}

impl Trade {
    pub fn new(
        ticker_symbol: TickerSymbol,
        timestamp: NaiveDateTime,
        quantity: i64,
        price_per_share: f64,
        side: BuySellIndicator,
    ) -> Result<Self, StocksError> {
        if quantity <= 0 {
            return Err(StocksError::InvalidQuantity { quantity });
        }
        if !price_per_share.is_finite() || price_per_share < 0.0 {
            return Err(StocksError::InvalidPrice {
                price: price_per_share,
            });
        }
        Ok(Self {
            ticker_symbol,
            timestamp,
            quantity: quantity as u64,
            price_per_share,
            side,
        })
    }

    pub fn ticker_symbol(&self) -> TickerSymbol {
        self.ticker_symbol
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price_per_share(&self) -> f64 {
        self.price_per_share
    }

    pub fn side(&self) -> BuySellIndicator {
        self.side
    }

    /// quantity * price_per_share
    pub fn total_price(&self) -> f64 {
        self.quantity as f64 * self.price_per_share
    }
}
