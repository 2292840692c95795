//! CSV trade file adapter.
//!
//! Expected header: `ticker,timestamp,quantity,price_per_share,side`, with
//! timestamps in `%Y-%m-%dT%H:%M:%S` (fractional seconds allowed).

use crate::domain::error::StocksError;
use crate::domain::ticker::{BuySellIndicator, TickerSymbol};
use crate::domain::trade::Trade;
use crate::ports::trade_port::TradeSource;
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub struct CsvTradeAdapter {
    path: PathBuf,
}

impl CsvTradeAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse(content: &str) -> Result<Vec<Trade>, StocksError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut trades = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            // header is row 1
            let row = index + 2;
            let record = result.map_err(|e| StocksError::TradeParse {
                row,
                reason: format!("CSV parse error: {}", e),
            })?;

            let field = |i: usize, name: &str| {
                record.get(i).ok_or_else(|| StocksError::TradeParse {
                    row,
                    reason: format!("missing {} column", name),
                })
            };
            let bad = |reason: String| StocksError::TradeParse { row, reason };

            let ticker: TickerSymbol = field(0, "ticker")?
                .parse()
                .map_err(|e: StocksError| bad(e.to_string()))?;
            let timestamp = NaiveDateTime::parse_from_str(field(1, "timestamp")?, TIMESTAMP_FORMAT)
                .map_err(|e| bad(format!("invalid timestamp: {}", e)))?;
            let quantity: i64 = field(2, "quantity")?
                .parse()
                .map_err(|e| bad(format!("invalid quantity: {}", e)))?;
            let price: f64 = field(3, "price_per_share")?
                .parse()
                .map_err(|e| bad(format!("invalid price: {}", e)))?;
            let side: BuySellIndicator = field(4, "side")?
                .parse()
                .map_err(|e: StocksError| bad(e.to_string()))?;

            let trade = Trade::new(ticker, timestamp, quantity, price, side)
                .map_err(|e| bad(e.to_string()))?;
            trades.push(trade);
        }

        Ok(trades)
    }
}

impl TradeSource for CsvTradeAdapter {
    fn load_trades(&self) -> Result<Vec<Trade>, StocksError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            StocksError::Io(format!("failed to read {}: {}", self.path.display(), e))
        })?;
        let trades = Self::parse(&content)?;
        tracing::debug!(
            "loaded {} trades from {}",
            trades.len(),
            self.path.display()
        );
        Ok(trades)
    }
}
