//! The exchange: a fixed roster of instruments and the indices built over them.

use super::error::StocksError;
use super::instrument::Instrument;
use super::ticker::TickerSymbol;
use super::trade::Trade;
use crate::ports::observer_port::{self, SharedObserver};
use chrono::NaiveDateTime;
use std::fmt;

pub struct Exchange {
    instruments: Vec<Instrument>,
    observer: SharedObserver,
}

/// A trade refused by [`Exchange::record_trades`].
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedTrade {
    pub trade: Trade,
    pub error: StocksError,
}

impl Exchange {
    /// Fails on an empty roster. Duplicate tickers are not checked here; see
    /// [`crate::domain::roster::parse_tickers`] for the bootstrap-side check.
    pub fn new(instruments: Vec<Instrument>) -> Result<Self, StocksError> {
        if instruments.is_empty() {
            return Err(StocksError::EmptyRoster);
        }
        Ok(Self {
            instruments,
            observer: observer_port::noop(),
        })
    }

    /// Observer for exchange-level events: unroutable trades and index
    /// values. Member instruments keep the observer they were built with.
    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// First instrument listed under `ticker`.
    pub fn instrument(&self, ticker: TickerSymbol) -> Option<&Instrument> {
        self.instruments
            .iter()
            .find(|i| i.ticker_symbol() == ticker)
    }

    /// Routes `trade` to the first instrument with a matching ticker.
    pub fn record_trade(&mut self, trade: Trade) -> Result<(), StocksError> {
        let ticker = trade.ticker_symbol();
        match self
            .instruments
            .iter_mut()
            .find(|i| i.ticker_symbol() == ticker)
        {
            Some(instrument) => instrument.record_trade(trade),
            None => {
                let err = StocksError::UnknownTicker(ticker);
                self.observer.trade_rejected(&trade, &err);
                Err(err)
            }
        }
    }

    /// Records every trade, collecting the ones that could not be routed.
    pub fn record_trades<I>(&mut self, trades: I) -> Vec<RejectedTrade>
    where
        I: IntoIterator<Item = Trade>,
    {
        let mut rejected = Vec::new();
        for trade in trades {
            let copy = trade.clone();
            if let Err(error) = self.record_trade(trade) {
                rejected.push(RejectedTrade { trade: copy, error });
            }
        }
        rejected
    }

    fn windowed_prices(&self, at_time: NaiveDateTime) -> Option<Vec<f64>> {
        self.instruments.iter().map(|i| i.price(at_time)).collect()
    }

    /// n-th root of the product of every member's windowed price, or `None`
    /// if any member has no trades in the window.
    pub fn geometric_mean(&self, at_time: NaiveDateTime) -> Option<f64> {
        let value = self.windowed_prices(at_time).map(|prices| {
            let n = prices.len() as f64;
            let product: f64 = prices.iter().product();
            product.powf(1.0 / n)
        });
        self.observer.index_computed("geometric_mean", value);
        value
    }

    /// Arithmetic mean of the members' windowed prices, or `None` if any is
    /// missing. Each member price is already volume-weighted; the mean itself
    /// is not weighted by volume across instruments.
    pub fn volume_weighted_index(&self, at_time: NaiveDateTime) -> Option<f64> {
        let value = self
            .windowed_prices(at_time)
            .map(|prices| prices.iter().sum::<f64>() / prices.len() as f64);
        self.observer.index_computed("volume_weighted_index", value);
        value
    }
}

impl fmt::Debug for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exchange")
            .field("instruments", &self.instruments)
            .finish_non_exhaustive()
    }
}
