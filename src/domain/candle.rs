//! Daily OHLCV candle and the generic indicator output point.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Candle {
    pub time: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Candle {
    /// close >= open
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// (high + low + close) / 3
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Checks the OHLC envelope: positive prices, wicks enclosing the body, non-zero volume.
    pub fn is_well_formed(&self) -> bool {
        self.open > 0.0
            && self.high > 0.0
            && self.low > 0.0
            && self.close > 0.0
            && self.low <= self.open.min(self.close)
            && self.high >= self.open.max(self.close)
            && self.volume > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub time: NaiveDate,
    pub value: f64,
}

impl TimeSeriesPoint {
    pub fn new(time: NaiveDate, value: f64) -> Self {
        TimeSeriesPoint { time, value }
    }
}
