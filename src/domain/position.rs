//! Open positions and the trade records that built them.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use super::error::TickerdeckError;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: String,
    pub shares: u64,
    /// Quantity-weighted average purchase price.
    pub avg_cost: f64,
    pub current_price: f64,
}

/// Unrealized profit and loss, absolute and in percent of cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionPnl {
    pub amount: f64,
    pub percent: f64,
}

impl Position {
    pub fn market_value(&self) -> f64 {
        self.shares as f64 * self.current_price
    }

    pub fn cost_basis(&self) -> f64 {
        self.shares as f64 * self.avg_cost
    }

    /// Zero when there is no positive cost to measure against.
    pub fn pnl(&self) -> PositionPnl {
        if self.avg_cost.is_nan() || self.avg_cost <= 0.0 {
            return PositionPnl { amount: 0.0, percent: 0.0 };
        }
        let amount = (self.current_price - self.avg_cost) * self.shares as f64;
        let percent = (self.current_price - self.avg_cost) / self.avg_cost * 100.0;
        if amount.is_finite() && percent.is_finite() {
            PositionPnl { amount, percent }
        } else {
            PositionPnl { amount: 0.0, percent: 0.0 }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeType {
    Buy,
    Sell,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => f.write_str("buy"),
            TradeType::Sell => f.write_str("sell"),
        }
    }
}

impl FromStr for TradeType {
    type Err = TickerdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(TradeType::Buy),
            "sell" | "s" => Ok(TradeType::Sell),
            _ => Err(TickerdeckError::UnknownTradeType(s.to_string())),
        }
    }
}

/// An executed trade. Never modified after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    pub trade_type: TradeType,
    pub shares: u64,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    /// shares × price
    pub total: f64,
}
