//! Live quote / bar source port.

use crate::domain::candle::Candle;
use crate::domain::error::TickerdeckError;
use crate::domain::timeframe::Timeframe;

/// An external source of recent daily bars. Implementations may fail for any
/// reason (network, credentials, rate limits); callers fall back to generated data.
pub trait QuotePort {
    fn fetch_bars(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>, TickerdeckError>;
}
