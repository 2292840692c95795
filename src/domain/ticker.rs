//! Instrument identifiers and trade direction.

use super::error::StocksError;
use std::fmt;
use std::str::FromStr;

/// The closed set of tickers listed on the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TickerSymbol {
    Tea,
    Pop,
    Ale,
    Gin,
    Joe,
}

impl TickerSymbol {
    pub const ALL: [TickerSymbol; 5] = [
        TickerSymbol::Tea,
        TickerSymbol::Pop,
        TickerSymbol::Ale,
        TickerSymbol::Gin,
        TickerSymbol::Joe,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TickerSymbol::Tea => "TEA",
            TickerSymbol::Pop => "POP",
            TickerSymbol::Ale => "ALE",
            TickerSymbol::Gin => "GIN",
            TickerSymbol::Joe => "JOE",
        }
    }
}

impl fmt::Display for TickerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TickerSymbol {
    type Err = StocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        TickerSymbol::ALL
            .into_iter()
            .find(|t| t.code() == upper)
            .ok_or_else(|| StocksError::TickerParse(s.to_string()))
    }
}

/// Direction of a trade. Carried on every trade, unused by the pricing formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuySellIndicator {
    Buy,
    Sell,
}

impl fmt::Display for BuySellIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuySellIndicator::Buy => f.write_str("BUY"),
            BuySellIndicator::Sell => f.write_str("SELL"),
        }
    }
}

impl FromStr for BuySellIndicator {
    type Err = StocksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(BuySellIndicator::Buy),
            "SELL" => Ok(BuySellIndicator::Sell),
            _ => Err(StocksError::SideParse(s.to_string())),
        }
    }
}
