//! CLI definition and dispatch.
//!
//! This is the only layer that reads the live clock: `--at` defaults to the
//! local wall-clock time here and is passed explicitly into the engine.

use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::csv_adapter::{CsvTradeAdapter, TIMESTAMP_FORMAT};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::logging::{LogConfig, init_logging};
use crate::adapters::tracing_observer::TracingObserver;
use crate::domain::error::StocksError;
use crate::domain::exchange::{Exchange, RejectedTrade};
use crate::domain::instrument::{Instrument, PRICE_TIME_INTERVAL_MINUTES};
use crate::domain::roster::{default_roster, load_roster};
use crate::domain::summary::{ExchangeSummary, format_metric};
use crate::ports::observer_port::SharedObserver;
use crate::ports::trade_port::TradeSource;

#[derive(Parser, Debug)]
#[command(name = "simplestocks", about = "Super simple stock exchange metrics")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record trades from a CSV file and print every metric
    Report {
        /// Roster INI file; the reference GBCE roster is used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        trades: PathBuf,
        /// Point in time to price at (YYYY-MM-DDTHH:MM:SS), defaults to now
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<NaiveDateTime>,
    },
    /// Validate a roster configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| format!("invalid timestamp {s:?} (expected YYYY-MM-DDTHH:MM:SS): {e}"))
}

pub fn run(cli: Cli) -> ExitCode {
    if let Err(e) = init_logging(&LogConfig::from_env().with_verbosity(cli.verbose)) {
        eprintln!("warning: logging disabled: {e}");
    }

    match cli.command {
        Command::Report { config, trades, at } => {
            let at_time = at.unwrap_or_else(|| Local::now().naive_local());
            run_report(config.as_ref(), &trades, at_time)
        }
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_instruments(config_path: Option<&PathBuf>) -> Result<Vec<Instrument>, StocksError> {
    match config_path {
        Some(path) => {
            tracing::info!("loading roster from {}", path.display());
            let adapter = FileConfigAdapter::from_file(path)?;
            load_roster(&adapter)
        }
        None => {
            tracing::info!("using the reference GBCE roster");
            Ok(default_roster())
        }
    }
}

/// Builds the exchange and replays `source` into it, returning rejected trades.
pub fn build_exchange(
    instruments: Vec<Instrument>,
    source: &dyn TradeSource,
) -> Result<(Exchange, Vec<RejectedTrade>), StocksError> {
    let observer: SharedObserver = Arc::new(TracingObserver);
    let instruments = instruments
        .into_iter()
        .map(|i| i.with_observer(observer.clone()))
        .collect();
    let mut exchange = Exchange::new(instruments)?.with_observer(observer);
    let trades = source.load_trades()?;
    let rejected = exchange.record_trades(trades);
    Ok((exchange, rejected))
}

fn run_report(config_path: Option<&PathBuf>, trades_path: &PathBuf, at_time: NaiveDateTime) -> ExitCode {
    let result = load_instruments(config_path).and_then(|instruments| {
        build_exchange(instruments, &CsvTradeAdapter::new(trades_path.clone()))
    });
    let (exchange, rejected) = match result {
        Ok(built) => built,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    for r in &rejected {
        eprintln!(
            "warning: skipped {} trade at {}: {}",
            r.trade.ticker_symbol(),
            r.trade.timestamp(),
            r.error
        );
    }

    let summary = ExchangeSummary::compute(&exchange, at_time);
    print!("{}", render_summary(&summary));
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating roster: {}", config_path.display());
    let exchange = match load_instruments(Some(config_path)).and_then(Exchange::new) {
        Ok(exchange) => exchange,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    print!("{}", render_roster(exchange.instruments()));
    eprintln!("Roster is valid: {} instruments", exchange.instruments().len());
    ExitCode::SUCCESS
}

pub fn render_roster(instruments: &[Instrument]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<10} {:>8} {:>9}",
        "TICKER", "TYPE", "PAR", "DIVIDEND"
    );
    for i in instruments {
        let _ = writeln!(
            out,
            "{:<6} {:<10} {:>8.2} {:>9.4}",
            i.ticker_symbol().to_string(),
            i.policy().kind(),
            i.par_value(),
            i.dividend(),
        );
    }
    out
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.4}"))
}

pub fn render_summary(summary: &ExchangeSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Metrics at {} (price window {} minutes)\n",
        summary.at_time, PRICE_TIME_INTERVAL_MINUTES
    );
    let _ = writeln!(
        out,
        "{:<6} {:<10} {:>8} {:>9} {:>16} {:>18} {:>16} {:>12} {:>8} {:>7}",
        "TICKER", "TYPE", "PAR", "DIVIDEND", "LAST PRICE", "DIVIDEND YIELD", "P/E", "PRICE", "VOLUME", "TRADES"
    );
    for s in &summary.instruments {
        let _ = writeln!(
            out,
            "{:<6} {:<10} {:>8.2} {:>9.4} {:>16} {:>18} {:>16} {:>12} {:>8} {:>7}",
            s.ticker.to_string(),
            s.kind,
            s.par_value,
            s.dividend,
            format_metric(&s.last_trade_price.clone().map(Some)),
            format_metric(&s.dividend_yield.clone().map(Some)),
            format_metric(&s.price_earnings_ratio),
            opt(s.price),
            s.window_volume,
            s.trade_count,
        );
    }
    let _ = writeln!(out, "\nGeometric mean index:  {}", opt(summary.geometric_mean));
    let _ = writeln!(
        out,
        "Volume weighted index: {}",
        opt(summary.volume_weighted_index)
    );
    out
}
