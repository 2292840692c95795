#![allow(dead_code)]

use chrono::NaiveDateTime;
use simplestocks::domain::error::StocksError;
use simplestocks::domain::instrument::Instrument;
use simplestocks::domain::ticker::{BuySellIndicator, TickerSymbol};
pub use simplestocks::domain::trade::Trade;
use simplestocks::ports::trade_port::TradeSource;

/// The reference trade tape from the morning of 24 October 1929.
pub const TAPE: &[(TickerSymbol, &str, i64, f64)] = &[
    (TickerSymbol::Tea, "1929-10-24T09:30:01", 500, 80.0),
    (TickerSymbol::Tea, "1929-10-24T09:35:00", 2560, 72.0),
    (TickerSymbol::Tea, "1929-10-24T09:41:23", 750, 78.0),
    (TickerSymbol::Tea, "1929-10-24T09:53:40", 1750, 77.5),
    (TickerSymbol::Tea, "1929-10-24T10:22:38", 250, 81.0),
    (TickerSymbol::Gin, "1929-10-24T09:45:13", 170, 102.0),
    (TickerSymbol::Gin, "1929-10-24T10:10:10", 220, 101.0),
    (TickerSymbol::Gin, "1929-10-24T10:12:30", 350, 98.0),
    (TickerSymbol::Gin, "1929-10-24T10:13:05", 80, 100.0),
];

pub const TAPE_CSV: &str = "ticker,timestamp,quantity,price_per_share,side\n\
    TEA,1929-10-24T09:30:01,500,80.0,BUY\n\
    TEA,1929-10-24T09:35:00,2560,72.0,BUY\n\
    TEA,1929-10-24T09:41:23,750,78.0,BUY\n\
    TEA,1929-10-24T09:53:40,1750,77.5,BUY\n\
    TEA,1929-10-24T10:22:38,250,81.0,BUY\n\
    GIN,1929-10-24T09:45:13,170,102.0,BUY\n\
    GIN,1929-10-24T10:10:10,220,101.0,BUY\n\
    GIN,1929-10-24T10:12:30,350,98.0,BUY\n\
    GIN,1929-10-24T10:13:05,80,100.0,BUY\n";

pub fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
}

pub fn make_trade(ticker: TickerSymbol, time: &str, quantity: i64, price: f64) -> Trade {
    Trade::new(ticker, at(time), quantity, price, BuySellIndicator::Buy).unwrap()
}

pub fn tape_for(ticker: TickerSymbol) -> Vec<Trade> {
    TAPE.iter()
        .filter(|(t, ..)| *t == ticker)
        .map(|&(t, time, qty, price)| make_trade(t, time, qty, price))
        .collect()
}

pub fn full_tape() -> Vec<Trade> {
    TAPE.iter()
        .map(|&(t, time, qty, price)| make_trade(t, time, qty, price))
        .collect()
}

pub fn tea() -> Instrument {
    Instrument::common(TickerSymbol::Tea, 100.0, 0.0)
}

pub fn gin() -> Instrument {
    Instrument::preferred(TickerSymbol::Gin, 100.0, 0.02)
}

pub struct MockTradeSource {
    pub trades: Vec<Trade>,
    pub error: Option<StocksError>,
}

impl MockTradeSource {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self {
            trades,
            error: None,
        }
    }

    pub fn failing(error: StocksError) -> Self {
        Self {
            trades: Vec::new(),
            error: Some(error),
        }
    }
}

impl TradeSource for MockTradeSource {
    fn load_trades(&self) -> Result<Vec<Trade>, StocksError> {
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(self.trades.clone()),
        }
    }
}
