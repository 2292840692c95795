//! Listed instruments and their per-ticker pricing metrics.
//!
//! An [`Instrument`] owns the trade history for one ticker. Every metric is a
//! pure function of that history and, for windowed prices, an explicit query
//! time supplied by the caller.

use super::error::StocksError;
use super::ticker::TickerSymbol;
use super::trade::Trade;
use crate::ports::observer_port::{self, SharedObserver};
use chrono::{Duration, NaiveDateTime};
use std::fmt;

/// Length of the window that counts towards [`Instrument::price`].
pub const PRICE_TIME_INTERVAL_MINUTES: i64 = 15;

pub fn price_time_interval() -> Duration {
    Duration::minutes(PRICE_TIME_INTERVAL_MINUTES)
}

/// How an instrument derives its dividend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DividendPolicy {
    /// Absolute per-share amount paid last period.
    Common { last_dividend: f64 },
    /// Fraction of par value.
    Preferred { fixed_dividend_rate: f64 },
}

impl DividendPolicy {
    pub fn kind(&self) -> &'static str {
        match self {
            DividendPolicy::Common { .. } => "common",
            DividendPolicy::Preferred { .. } => "preferred",
        }
    }
}

pub struct Instrument {
    ticker_symbol: TickerSymbol,
    par_value: f64,
    policy: DividendPolicy,
    trades: Vec<Trade>,
    observer: SharedObserver,
}

impl Instrument {
    pub fn new(ticker_symbol: TickerSymbol, par_value: f64, policy: DividendPolicy) -> Self {
        Self {
            ticker_symbol,
            par_value,
            policy,
            trades: Vec::new(),
            observer: observer_port::noop(),
        }
    }

    pub fn common(ticker_symbol: TickerSymbol, par_value: f64, last_dividend: f64) -> Self {
        Self::new(
            ticker_symbol,
            par_value,
            DividendPolicy::Common { last_dividend },
        )
    }

    pub fn preferred(ticker_symbol: TickerSymbol, par_value: f64, fixed_dividend_rate: f64) -> Self {
        Self::new(
            ticker_symbol,
            par_value,
            DividendPolicy::Preferred {
                fixed_dividend_rate,
            },
        )
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn ticker_symbol(&self) -> TickerSymbol {
        self.ticker_symbol
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    pub fn policy(&self) -> DividendPolicy {
        self.policy
    }

    /// Recorded trades in insertion order, which need not be timestamp order.
    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// Appends `trade` to the history. Trades for another ticker are refused.
    pub fn record_trade(&mut self, trade: Trade) -> Result<(), StocksError> {
        if trade.ticker_symbol() != self.ticker_symbol {
            let err = StocksError::TickerMismatch {
                expected: self.ticker_symbol,
                actual: trade.ticker_symbol(),
            };
            self.observer.trade_rejected(&trade, &err);
            return Err(err);
        }
        self.observer.trade_recorded(&trade);
        self.trades.push(trade);
        Ok(())
    }

    pub fn dividend(&self) -> f64 {
        match self.policy {
            DividendPolicy::Common { last_dividend } => last_dividend,
            DividendPolicy::Preferred {
                fixed_dividend_rate,
            } => fixed_dividend_rate * self.par_value,
        }
    }

    /// Price per share of the most recent trade by timestamp.
    ///
    /// When several trades share the latest timestamp the one recorded first
    /// wins; callers should not rely on this.
    pub fn last_trade_price(&self) -> Result<f64, StocksError> {
        let mut latest: Option<&Trade> = None;
        for trade in &self.trades {
            match latest {
                Some(current) if trade.timestamp() <= current.timestamp() => {}
                _ => latest = Some(trade),
            }
        }
        match latest {
            Some(trade) => Ok(trade.price_per_share()),
            None => {
                self.observer
                    .metric_unavailable(self.ticker_symbol, "last_trade_price");
                Err(StocksError::PriceUnavailable(self.ticker_symbol))
            }
        }
    }

    /// dividend / last_trade_price
    pub fn dividend_yield(&self) -> Result<f64, StocksError> {
        let last_price = self.last_trade_price()?;
        if last_price == 0.0 {
            return Err(StocksError::DivisionByZero {
                ticker: self.ticker_symbol,
                metric: "dividend_yield",
            });
        }
        Ok(self.dividend() / last_price)
    }

    /// last_trade_price / dividend, or `None` when the dividend is zero.
    pub fn price_earnings_ratio(&self) -> Result<Option<f64>, StocksError> {
        let dividend = self.dividend();
        if dividend == 0.0 {
            self.observer
                .metric_unavailable(self.ticker_symbol, "price_earnings_ratio");
            return Ok(None);
        }
        Ok(Some(self.last_trade_price()? / dividend))
    }

    fn significant_trades(&self, at_time: NaiveDateTime) -> impl Iterator<Item = &Trade> {
        let since = at_time - price_time_interval();
        self.trades
            .iter()
            .filter(move |t| t.timestamp() >= since && t.timestamp() <= at_time)
    }

    /// Volume-weighted average price over `[at_time - 15min, at_time]`.
    pub fn price(&self, at_time: NaiveDateTime) -> Option<f64> {
        let (total_price, quantity) = self
            .significant_trades(at_time)
            .fold((0.0_f64, 0_u128), |(total, qty), t| {
                (total + t.total_price(), qty + u128::from(t.quantity()))
            });
        if quantity == 0 {
            self.observer.metric_unavailable(self.ticker_symbol, "price");
            return None;
        }
        Some(total_price / quantity as f64)
    }

    /// Shares traded inside the same window as [`Instrument::price`].
    pub fn traded_volume(&self, at_time: NaiveDateTime) -> u128 {
        self.significant_trades(at_time)
            .map(|t| u128::from(t.quantity()))
            .sum()
    }
}

impl fmt::Debug for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instrument")
            .field("ticker_symbol", &self.ticker_symbol)
            .field("par_value", &self.par_value)
            .field("policy", &self.policy)
            .field("trades", &self.trades)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticker::BuySellIndicator;
    use crate::ports::observer_port::MarketObserver;
    use approx::assert_relative_eq;
    use std::sync::{Arc, Mutex};

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn trade(ticker: TickerSymbol, time: &str, qty: i64, price: f64) -> Trade {
        Trade::new(ticker, at(time), qty, price, BuySellIndicator::Buy).unwrap()
    }

    fn tea() -> Instrument {
        Instrument::common(TickerSymbol::Tea, 100.0, 0.0)
    }

    fn pop() -> Instrument {
        Instrument::common(TickerSymbol::Pop, 100.0, 8.0)
    }

    #[test]
    fn common_dividend_is_last_dividend() {
        assert_eq!(pop().dividend(), 8.0);
        assert_eq!(pop().policy().kind(), "common");
    }

    #[test]
    fn preferred_dividend_is_rate_times_par() {
        let gin = Instrument::preferred(TickerSymbol::Gin, 100.0, 0.02);
        assert_relative_eq!(gin.dividend(), 2.0);
        assert_eq!(gin.policy().kind(), "preferred");
    }

    #[test]
    fn record_trade_appends() {
        let mut stock = pop();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T09:30:00", 10, 50.0))
            .unwrap();
        assert_eq!(stock.trade_count(), 1);
    }

    #[test]
    fn record_trade_rejects_other_ticker() {
        let mut stock = pop();
        let err = stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T09:30:00", 10, 50.0))
            .unwrap_err();
        assert_eq!(
            err,
            StocksError::TickerMismatch {
                expected: TickerSymbol::Pop,
                actual: TickerSymbol::Tea,
            }
        );
        assert_eq!(stock.trade_count(), 0);
    }

    #[test]
    fn last_trade_price_unavailable_without_trades() {
        let err = pop().last_trade_price().unwrap_err();
        assert_eq!(err, StocksError::PriceUnavailable(TickerSymbol::Pop));
    }

    #[test]
    fn last_trade_price_uses_latest_timestamp_not_insertion_order() {
        let mut stock = pop();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 10, 61.0))
            .unwrap();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T09:00:00", 10, 55.0))
            .unwrap();
        assert_eq!(stock.last_trade_price().unwrap(), 61.0);
    }

    #[test]
    fn last_trade_price_tie_keeps_first_recorded() {
        let mut stock = pop();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 10, 61.0))
            .unwrap();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 10, 62.0))
            .unwrap();
        assert_eq!(stock.last_trade_price().unwrap(), 61.0);
    }

    #[test]
    fn dividend_yield() {
        let mut stock = pop();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 10, 80.0))
            .unwrap();
        assert_relative_eq!(stock.dividend_yield().unwrap(), 0.1);
    }

    #[test]
    fn dividend_yield_zero_price_is_division_by_zero() {
        let mut stock = pop();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 10, 0.0))
            .unwrap();
        assert!(matches!(
            stock.dividend_yield(),
            Err(StocksError::DivisionByZero { ticker: TickerSymbol::Pop, .. })
        ));
    }

    #[test]
    fn dividend_yield_without_trades_is_unavailable() {
        assert!(matches!(
            pop().dividend_yield(),
            Err(StocksError::PriceUnavailable(TickerSymbol::Pop))
        ));
    }

    #[test]
    fn pe_ratio_none_for_zero_dividend() {
        let mut stock = tea();
        assert_eq!(stock.price_earnings_ratio().unwrap(), None);
        stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T10:00:00", 10, 80.0))
            .unwrap();
        assert_eq!(stock.price_earnings_ratio().unwrap(), None);
    }

    #[test]
    fn pe_ratio_is_price_over_dividend() {
        let mut stock = pop();
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 10, 80.0))
            .unwrap();
        assert_relative_eq!(stock.price_earnings_ratio().unwrap().unwrap(), 10.0);
    }

    #[test]
    fn pe_ratio_without_trades_is_unavailable() {
        assert!(pop().price_earnings_ratio().is_err());
    }

    #[test]
    fn price_none_without_trades() {
        assert_eq!(tea().price(at("1929-10-24T10:00:00")), None);
    }

    #[test]
    fn price_is_volume_weighted() {
        let mut stock = tea();
        stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T09:30:01", 500, 80.0))
            .unwrap();
        stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T09:35:00", 2560, 72.0))
            .unwrap();
        let expected = (500.0 * 80.0 + 2560.0 * 72.0) / (500.0 + 2560.0);
        assert_relative_eq!(stock.price(at("1929-10-24T09:40:00")).unwrap(), expected);
        assert_eq!(stock.traded_volume(at("1929-10-24T09:40:00")), 3060);
    }

    #[test]
    fn price_window_lower_bound_is_inclusive() {
        let mut stock = tea();
        stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T09:45:00", 100, 80.0))
            .unwrap();
        assert_eq!(stock.price(at("1929-10-24T10:00:00")), Some(80.0));
        let later = at("1929-10-24T10:00:00") + Duration::nanoseconds(1);
        assert_eq!(stock.price(later), None);
    }

    #[test]
    fn price_window_excludes_trades_after_query_time() {
        let mut stock = tea();
        stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T09:50:00", 100, 80.0))
            .unwrap();
        stock
            .record_trade(trade(TickerSymbol::Tea, "1929-10-24T10:05:00", 100, 90.0))
            .unwrap();
        assert_eq!(stock.price(at("1929-10-24T10:00:00")), Some(80.0));
    }

    #[test]
    fn price_and_volume_hold_at_maximum_quantities() {
        let mut stock = tea();
        for _ in 0..3 {
            stock
                .record_trade(trade(TickerSymbol::Tea, "1929-10-24T10:00:00", i64::MAX, 1.0))
                .unwrap();
        }
        let now = at("1929-10-24T10:00:00");
        assert_relative_eq!(stock.price(now).unwrap(), 1.0);
        assert_eq!(stock.traded_volume(now), 3 * i64::MAX as u128);
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl MarketObserver for Recorder {
        fn trade_recorded(&self, trade: &Trade) {
            self.0.lock().unwrap().push(format!("recorded {}", trade.ticker_symbol()));
        }

        fn trade_rejected(&self, trade: &Trade, _error: &StocksError) {
            self.0.lock().unwrap().push(format!("rejected {}", trade.ticker_symbol()));
        }

        fn metric_unavailable(&self, ticker: TickerSymbol, metric: &'static str) {
            self.0.lock().unwrap().push(format!("{ticker} {metric}"));
        }
    }

    #[test]
    fn observer_sees_records_rejections_and_gaps() {
        let recorder = Arc::new(Recorder::default());
        let mut stock = pop().with_observer(recorder.clone());
        stock
            .record_trade(trade(TickerSymbol::Pop, "1929-10-24T10:00:00", 1, 1.0))
            .unwrap();
        let _ = stock.record_trade(trade(TickerSymbol::Ale, "1929-10-24T10:00:00", 1, 1.0));
        let _ = stock.price(at("1929-10-25T10:00:00"));

        let events = recorder.0.lock().unwrap().clone();
        assert_eq!(events, vec!["recorded POP", "rejected ALE", "POP price"]);
    }
}
