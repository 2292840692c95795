//! Observability port for the pricing engine.
//!
//! Instruments and exchanges report what they do through a [`MarketObserver`]
//! handed to them at construction. Every method defaults to doing nothing, and
//! [`NoopObserver`] is what components carry unless told otherwise. Failures
//! are always returned to the caller as well; an observer only watches.

use crate::domain::error::StocksError;
use crate::domain::ticker::TickerSymbol;
use crate::domain::trade::Trade;
use std::sync::Arc;

pub trait MarketObserver: Send + Sync {
    fn trade_recorded(&self, _trade: &Trade) {}

    fn trade_rejected(&self, _trade: &Trade, _error: &StocksError) {}

    fn metric_unavailable(&self, _ticker: TickerSymbol, _metric: &'static str) {}

    fn index_computed(&self, _index: &'static str, _value: Option<f64>) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MarketObserver for NoopObserver {}

pub type SharedObserver = Arc<dyn MarketObserver>;

pub fn noop() -> SharedObserver {
    Arc::new(NoopObserver)
}
