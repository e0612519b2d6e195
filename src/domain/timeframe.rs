//! Chart timeframes and their trading-day windows.

use std::fmt;
use std::str::FromStr;

use super::error::TickerdeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    M1,
    M3,
    M6,
    Y1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::M1, Timeframe::M3, Timeframe::M6, Timeframe::Y1];

    /// Number of most recent trading days shown for this timeframe.
    pub fn trading_days(self) -> usize {
        match self {
            Timeframe::M1 => 22,
            Timeframe::M3 => 66,
            Timeframe::M6 => 132,
            Timeframe::Y1 => 252,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Timeframe::M1 => "1M",
            Timeframe::M3 => "3M",
            Timeframe::M6 => "6M",
            Timeframe::Y1 => "1Y",
        };
        f.write_str(label)
    }
}

impl FromStr for Timeframe {
    type Err = TickerdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1M" => Ok(Timeframe::M1),
            "3M" => Ok(Timeframe::M3),
            "6M" => Ok(Timeframe::M6),
            "1Y" => Ok(Timeframe::Y1),
            _ => Err(TickerdeckError::UnknownTimeframe(s.to_string())),
        }
    }
}
