//! Technical indicators over candle series.
//!
//! Every calculation is a pure function of `&[Candle]` and its parameters.
//! Insufficient history or a zero period yields an empty result, never an error:
//! - `TimeSeriesPoint` lines for SMA / EMA / RSI
//! - `MacdResult` for MACD line, signal and histogram
//! - `BollingerResult` for the three bands, aligned by index
//! - `Overlay`: the closed set of chart overlays with their colors

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

pub use bollinger::{calculate_bollinger, calculate_bollinger_default};
pub use ema::calculate_ema;
pub use macd::{calculate_macd, calculate_macd_default};
pub use rsi::{calculate_rsi, calculate_rsi_default};
pub use sma::calculate_sma;

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use crate::domain::candle::{Candle, TimeSeriesPoint};
use crate::domain::error::TickerdeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramColor {
    Positive,
    Negative,
}

impl HistogramColor {
    pub fn from_value(value: f64) -> Self {
        if value >= 0.0 {
            HistogramColor::Positive
        } else {
            HistogramColor::Negative
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            HistogramColor::Positive => "#26a69a",
            HistogramColor::Negative => "#ef5350",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramPoint {
    pub time: NaiveDate,
    pub value: f64,
    pub color: HistogramColor,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MacdResult {
    pub macd: Vec<TimeSeriesPoint>,
    pub signal: Vec<TimeSeriesPoint>,
    pub histogram: Vec<HistogramPoint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BollingerResult {
    pub upper: Vec<TimeSeriesPoint>,
    pub middle: Vec<TimeSeriesPoint>,
    pub lower: Vec<TimeSeriesPoint>,
}

impl BollingerResult {
    pub fn len(&self) -> usize {
        self.middle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middle.is_empty()
    }
}

/// Chart overlays a user can toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Sma20,
    Sma50,
    Ema12,
    Ema26,
    Bollinger,
    Rsi,
    Macd,
}

/// Computed data for one overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayOutput {
    Line(Vec<TimeSeriesPoint>),
    Bands(BollingerResult),
    Macd(MacdResult),
}

impl Overlay {
    pub const ALL: [Overlay; 7] = [
        Overlay::Sma20,
        Overlay::Sma50,
        Overlay::Ema12,
        Overlay::Ema26,
        Overlay::Bollinger,
        Overlay::Rsi,
        Overlay::Macd,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Overlay::Sma20 => "sma20",
            Overlay::Sma50 => "sma50",
            Overlay::Ema12 => "ema12",
            Overlay::Ema26 => "ema26",
            Overlay::Bollinger => "bb",
            Overlay::Rsi => "rsi",
            Overlay::Macd => "macd",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Overlay::Sma20 => "#f5a623",
            Overlay::Sma50 => "#4a90e2",
            Overlay::Ema12 => "#bd10e0",
            Overlay::Ema26 => "#50e3c2",
            Overlay::Bollinger => "#9b9b9b",
            Overlay::Rsi => "#b388ff",
            Overlay::Macd => "#2962ff",
        }
    }

    /// Drawn on the price pane rather than in its own pane.
    pub fn on_price_pane(self) -> bool {
        match self {
            Overlay::Sma20 | Overlay::Sma50 | Overlay::Ema12 | Overlay::Ema26 | Overlay::Bollinger => {
                true
            }
            Overlay::Rsi | Overlay::Macd => false,
        }
    }

    pub fn compute(self, candles: &[Candle]) -> OverlayOutput {
        match self {
            Overlay::Sma20 => OverlayOutput::Line(calculate_sma(candles, 20)),
            Overlay::Sma50 => OverlayOutput::Line(calculate_sma(candles, 50)),
            Overlay::Ema12 => OverlayOutput::Line(calculate_ema(candles, 12)),
            Overlay::Ema26 => OverlayOutput::Line(calculate_ema(candles, 26)),
            Overlay::Bollinger => OverlayOutput::Bands(calculate_bollinger_default(candles)),
            Overlay::Rsi => OverlayOutput::Line(calculate_rsi_default(candles)),
            Overlay::Macd => OverlayOutput::Macd(calculate_macd_default(candles)),
        }
    }
}

impl fmt::Display for Overlay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overlay::Sma20 => write!(f, "SMA(20)"),
            Overlay::Sma50 => write!(f, "SMA(50)"),
            Overlay::Ema12 => write!(f, "EMA(12)"),
            Overlay::Ema26 => write!(f, "EMA(26)"),
            Overlay::Bollinger => write!(f, "BOLLINGER(20,2)"),
            Overlay::Rsi => write!(f, "RSI(14)"),
            Overlay::Macd => write!(f, "MACD(12,26,9)"),
        }
    }
}

impl FromStr for Overlay {
    type Err = TickerdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Overlay::ALL
            .into_iter()
            .find(|o| o.id() == wanted)
            .ok_or_else(|| TickerdeckError::UnknownOverlay(s.to_string()))
    }
}
