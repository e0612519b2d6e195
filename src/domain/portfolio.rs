//! Portfolio state, valuation and allocation.
//!
//! A `Portfolio` is a value: trades and re-marking produce a new one and
//! leave the original untouched (see [`crate::domain::execution`]).

use std::collections::HashMap;

use super::position::{Position, Trade};

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub starting_cash: f64,
    pub positions: Vec<Position>,
    pub trades: Vec<Trade>,
}

/// Gain over starting cash, absolute and in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioReturn {
    pub amount: f64,
    pub percent: f64,
}

/// One slice of the allocation breakdown; `symbol` is `None` for cash.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSlice {
    pub symbol: Option<String>,
    pub value: f64,
    pub weight: f64,
}

impl Portfolio {
    /// A non-finite or negative amount opens the portfolio with no cash.
    pub fn new(starting_cash: f64) -> Self {
        let starting_cash = if starting_cash.is_finite() && starting_cash > 0.0 {
            starting_cash
        } else {
            0.0
        };
        Portfolio {
            cash: starting_cash,
            starting_cash,
            positions: Vec::new(),
            trades: Vec::new(),
        }
    }

    pub fn get_position(&self, symbol: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.symbol == symbol)
    }

    pub fn has_position(&self, symbol: &str) -> bool {
        self.get_position(symbol).is_some()
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    /// Sum of shares × current price; may be non-finite if a price is corrupt.
    pub fn positions_value(&self) -> f64 {
        self.positions.iter().map(Position::market_value).sum()
    }

    /// cash + Σ shares × current price, or cash alone if the position sum is not finite.
    pub fn value(&self) -> f64 {
        let positions = self.positions_value();
        if positions.is_finite() {
            self.cash + positions
        } else {
            self.cash
        }
    }

    pub fn total_return(&self) -> PortfolioReturn {
        if self.starting_cash.is_nan() || self.starting_cash <= 0.0 {
            return PortfolioReturn { amount: 0.0, percent: 0.0 };
        }
        let amount = self.value() - self.starting_cash;
        PortfolioReturn {
            amount,
            percent: amount / self.starting_cash * 100.0,
        }
    }

    /// New portfolio with `current_price` refreshed from `prices`.
    ///
    /// Symbols missing from the map, or quoted at a non-positive or non-finite
    /// price, keep their last price.
    pub fn mark_to_market(&self, prices: &HashMap<String, f64>) -> Portfolio {
        let positions = self
            .positions
            .iter()
            .map(|pos| match prices.get(&pos.symbol) {
                Some(&price) if price.is_finite() && price > 0.0 => Position {
                    current_price: price,
                    ..pos.clone()
                },
                _ => pos.clone(),
            })
            .collect();

        Portfolio {
            positions,
            ..self.clone()
        }
    }

    /// Cash first, then positions by descending market value.
    pub fn allocation(&self) -> Vec<AllocationSlice> {
        let total = self.value();
        let weight = |value: f64| {
            if total > 0.0 && value.is_finite() {
                value / total
            } else {
                0.0
            }
        };

        let mut holdings: Vec<AllocationSlice> = self
            .positions
            .iter()
            .map(|pos| {
                let value = pos.market_value();
                AllocationSlice {
                    symbol: Some(pos.symbol.clone()),
                    value,
                    weight: weight(value),
                }
            })
            .collect();
        holdings.sort_by(|a, b| b.value.total_cmp(&a.value));

        let mut slices = Vec::with_capacity(holdings.len() + 1);
        slices.push(AllocationSlice {
            symbol: None,
            value: self.cash,
            weight: weight(self.cash),
        });
        slices.extend(holdings);
        slices
    }
}
