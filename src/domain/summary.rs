//! Point-in-time snapshot of every metric on the exchange.
//!
//! Each metric is computed independently so a degenerate value on one
//! instrument (no trades, zero price) never hides the others.

use super::error::StocksError;
use super::exchange::Exchange;
use super::instrument::Instrument;
use super::ticker::TickerSymbol;
use chrono::NaiveDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct InstrumentSummary {
    pub ticker: TickerSymbol,
    pub kind: &'static str,
    pub par_value: f64,
    pub dividend: f64,
    pub trade_count: usize,
    pub last_trade_price: Result<f64, StocksError>,
    pub dividend_yield: Result<f64, StocksError>,
    pub price_earnings_ratio: Result<Option<f64>, StocksError>,
    pub price: Option<f64>,
    pub window_volume: u128,
}

impl InstrumentSummary {
    pub fn compute(instrument: &Instrument, at_time: NaiveDateTime) -> Self {
        Self {
            ticker: instrument.ticker_symbol(),
            kind: instrument.policy().kind(),
            par_value: instrument.par_value(),
            dividend: instrument.dividend(),
            trade_count: instrument.trade_count(),
            last_trade_price: instrument.last_trade_price(),
            dividend_yield: instrument.dividend_yield(),
            price_earnings_ratio: instrument.price_earnings_ratio(),
            price: instrument.price(at_time),
            window_volume: instrument.traded_volume(at_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeSummary {
    pub at_time: NaiveDateTime,
    pub instruments: Vec<InstrumentSummary>,
    pub geometric_mean: Option<f64>,
    pub volume_weighted_index: Option<f64>,
}

impl ExchangeSummary {
    pub fn compute(exchange: &Exchange, at_time: NaiveDateTime) -> Self {
        Self {
            at_time,
            instruments: exchange
                .instruments()
                .iter()
                .map(|i| InstrumentSummary::compute(i, at_time))
                .collect(),
            geometric_mean: exchange.geometric_mean(at_time),
            volume_weighted_index: exchange.volume_weighted_index(at_time),
        }
    }

    pub fn get(&self, ticker: TickerSymbol) -> Option<&InstrumentSummary> {
        self.instruments.iter().find(|s| s.ticker == ticker)
    }
}

/// Formats a metric for display: `-` for no value, `n/a (reason)` for failures.
pub fn format_metric(value: &Result<Option<f64>, StocksError>) -> String {
    match value {
        Ok(Some(v)) => format!("{v:.4}"),
        Ok(None) => "-".to_string(),
        Err(StocksError::PriceUnavailable(_)) => "n/a (no trades)".to_string(),
        Err(StocksError::DivisionByZero { .. }) => "n/a (zero price)".to_string(),
        Err(e) => format!("n/a ({e})"),
    }
}
