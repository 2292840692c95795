//! [`MarketObserver`] that forwards engine events to `tracing`.

use crate::domain::error::StocksError;
use crate::domain::ticker::TickerSymbol;
use crate::domain::trade::Trade;
use crate::ports::observer_port::MarketObserver;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl MarketObserver for TracingObserver {
    fn trade_recorded(&self, trade: &Trade) {
        debug!(
            ticker = %trade.ticker_symbol(),
            timestamp = %trade.timestamp(),
            quantity = trade.quantity(),
            price = trade.price_per_share(),
            side = %trade.side(),
            "recorded trade"
        );
    }

    fn trade_rejected(&self, trade: &Trade, error: &StocksError) {
        warn!(
            ticker = %trade.ticker_symbol(),
            timestamp = %trade.timestamp(),
            "rejected trade: {}",
            error
        );
    }

    fn metric_unavailable(&self, ticker: TickerSymbol, metric: &'static str) {
        debug!(%ticker, metric, "metric unavailable");
    }

    fn index_computed(&self, index: &'static str, value: Option<f64>) {
        match value {
            Some(v) => info!(index, value = v, "index computed"),
            None => info!(index, "index unavailable"),
        }
    }
}
