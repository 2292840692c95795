//! Domain error types.

use super::ticker::TickerSymbol;

/// Top-level error type for simplestocks.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StocksError {
    #[error("quantity must be positive (got {quantity})")]
    InvalidQuantity { quantity: i64 },

    #[error("price must be non-negative (got {price})")]
    InvalidPrice { price: f64 },

    #[error("exchange requires a non-empty instrument roster")]
    EmptyRoster,

    #[error("trade for {actual} does not belong to instrument {expected}")]
    TickerMismatch {
        expected: TickerSymbol,
        actual: TickerSymbol,
    },

    #[error("no instrument listed for ticker {0}")]
    UnknownTicker(TickerSymbol),

    #[error("the last trade price of {0} is not yet available")]
    PriceUnavailable(TickerSymbol),

    #[error("division by zero computing {metric} for {ticker}")]
    DivisionByZero {
        ticker: TickerSymbol,
        metric: &'static str,
    },

    #[error("unknown ticker symbol: {0}")]
    TickerParse(String),

    #[error("unknown buy/sell indicator: {0}")]
    SideParse(String),

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("trade row {row}: {reason}")]
    TradeParse { row: usize, reason: String },

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StocksError {
    fn from(err: std::io::Error) -> Self {
        StocksError::Io(err.to_string())
    }
}

impl From<&StocksError> for std::process::ExitCode {
    fn from(err: &StocksError) -> Self {
        let code: u8 = match err {
            StocksError::Io(_) => 1,
            StocksError::ConfigParse { .. }
            | StocksError::ConfigMissing { .. }
            | StocksError::ConfigInvalid { .. } => 2,
            StocksError::TradeParse { .. }
            | StocksError::TickerParse(_)
            | StocksError::SideParse(_) => 3,
            StocksError::InvalidQuantity { .. }
            | StocksError::InvalidPrice { .. }
            | StocksError::EmptyRoster => 4,
            StocksError::TickerMismatch { .. } | StocksError::UnknownTicker(_) => 5,
            StocksError::PriceUnavailable(_) | StocksError::DivisionByZero { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
