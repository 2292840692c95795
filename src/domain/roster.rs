//! Instrument roster bootstrap.
//!
//! Builds the list of instruments an [`Exchange`](super::exchange::Exchange) is
//! constructed from, either from the built-in reference table or from an INI
//! configuration:
//!
//! ```ini
//! [exchange]
//! instruments = TEA,GIN
//!
//! [TEA]
//! type = common
//! par_value = 100
//! last_dividend = 0
//!
//! [GIN]
//! type = preferred
//! par_value = 100
//! fixed_dividend = 0.02
//! ```

use super::error::StocksError;
use super::instrument::Instrument;
use super::ticker::TickerSymbol;
use crate::ports::config_port::ConfigPort;
use std::collections::HashSet;

/// The Global Beverage Corporation Exchange reference table.
pub fn default_roster() -> Vec<Instrument> {
    vec![
        Instrument::common(TickerSymbol::Tea, 100.0, 0.0),
        Instrument::common(TickerSymbol::Pop, 100.0, 8.0),
        Instrument::common(TickerSymbol::Ale, 60.0, 23.0),
        Instrument::preferred(TickerSymbol::Gin, 100.0, 0.02),
        Instrument::common(TickerSymbol::Joe, 250.0, 13.0),
    ]
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RosterError {
    #[error("empty token in instrument list")]
    EmptyToken,

    #[error("duplicate ticker: {0}")]
    DuplicateTicker(TickerSymbol),

    #[error(transparent)]
    Ticker(#[from] StocksError),
}

pub fn parse_tickers(input: &str) -> Result<Vec<TickerSymbol>, RosterError> {
    let mut tickers = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(RosterError::EmptyToken);
        }
        let ticker: TickerSymbol = trimmed.parse()?;
        if !seen.insert(ticker) {
            return Err(RosterError::DuplicateTicker(ticker));
        }
        tickers.push(ticker);
    }

    Ok(tickers)
}

fn required_f64(config: &dyn ConfigPort, section: &str, key: &str) -> Result<f64, StocksError> {
    match config.get_f64(section, key) {
        None => Err(StocksError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        }),
        Some(Err(reason)) => Err(StocksError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason,
        }),
        Some(Ok(value)) if !value.is_finite() => Err(StocksError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be a finite number"),
        }),
        Some(Ok(value)) => Ok(value),
    }
}

fn load_instrument(
    config: &dyn ConfigPort,
    ticker: TickerSymbol,
) -> Result<Instrument, StocksError> {
    let section = ticker.code();
    let par_value = required_f64(config, section, "par_value")?;
    if par_value < 0.0 {
        return Err(StocksError::ConfigInvalid {
            section: section.to_string(),
            key: "par_value".to_string(),
            reason: "par_value must be non-negative".to_string(),
        });
    }

    let kind = config
        .get_string(section, "type")
        .unwrap_or_else(|| "common".to_string());
    match kind.trim().to_lowercase().as_str() {
        "common" => {
            let last_dividend = required_f64(config, section, "last_dividend")?;
            Ok(Instrument::common(ticker, par_value, last_dividend))
        }
        "preferred" => {
            let rate = required_f64(config, section, "fixed_dividend")?;
            Ok(Instrument::preferred(ticker, par_value, rate))
        }
        other => Err(StocksError::ConfigInvalid {
            section: section.to_string(),
            key: "type".to_string(),
            reason: format!("expected common or preferred, got {other:?}"),
        }),
    }
}

/// Reads the roster described by `[exchange] instruments` and one section per
/// listed ticker.
pub fn load_roster(config: &dyn ConfigPort) -> Result<Vec<Instrument>, StocksError> {
    let list = config
        .get_string("exchange", "instruments")
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| StocksError::ConfigMissing {
            section: "exchange".to_string(),
            key: "instruments".to_string(),
        })?;

    let tickers = parse_tickers(&list).map_err(|e| StocksError::ConfigInvalid {
        section: "exchange".to_string(),
        key: "instruments".to_string(),
        reason: e.to_string(),
    })?;

    tickers
        .into_iter()
        .map(|ticker| load_instrument(config, ticker))
        .collect()
}
