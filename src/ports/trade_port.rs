//! Trade input port.

use crate::domain::error::StocksError;
use crate::domain::trade::Trade;

/// Source of trades to replay into an exchange.
pub trait TradeSource {
    fn load_trades(&self) -> Result<Vec<Trade>, StocksError>;
}
