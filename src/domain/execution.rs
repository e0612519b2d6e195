//! Paper-trade execution against a portfolio.
//!
//! Buy and sell are transitions from one `Portfolio` value to a new one. The
//! input is only ever borrowed; a rejected trade leaves it exactly as it was
//! and no trade record is written.
//!
//! Checks run in order: shares, then price, then cash / holdings.

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::error::TradeError;
use super::portfolio::Portfolio;
use super::position::{Position, Trade, TradeType};

/// Largest share count that survives the f64 round trip exactly (2^53 - 1).
pub const MAX_SHARES: f64 = 9_007_199_254_740_991.0;

/// Result of [`execute_trade`]: the portfolio to use from now on, and why
/// the trade was refused if it was.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeOutcome {
    pub success: bool,
    pub error: Option<TradeError>,
    pub portfolio: Portfolio,
}

/// Shares must be a finite, positive whole number.
pub fn validate_shares(shares: f64) -> Result<u64, TradeError> {
    if shares.is_finite() && shares > 0.0 && shares.fract() == 0.0 && shares <= MAX_SHARES {
        Ok(shares as u64)
    } else {
        Err(TradeError::InvalidShares(shares))
    }
}

/// Price must be finite and positive.
pub fn validate_price(price: f64) -> Result<f64, TradeError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(TradeError::InvalidPrice(price))
    }
}

/// Execute a trade stamped with the current time.
pub fn execute_trade(
    portfolio: &Portfolio,
    symbol: &str,
    trade_type: TradeType,
    shares: f64,
    price: f64,
) -> TradeOutcome {
    execute_trade_at(portfolio, symbol, trade_type, shares, price, Utc::now())
}

pub fn execute_trade_at(
    portfolio: &Portfolio,
    symbol: &str,
    trade_type: TradeType,
    shares: f64,
    price: f64,
    timestamp: DateTime<Utc>,
) -> TradeOutcome {
    match try_execute_trade(portfolio, symbol, trade_type, shares, price, timestamp) {
        Ok(next) => TradeOutcome {
            success: true,
            error: None,
            portfolio: next,
        },
        Err(error) => {
            debug!(symbol, side = %trade_type, shares, price, %error, "trade rejected");
            TradeOutcome {
                success: false,
                error: Some(error),
                portfolio: portfolio.clone(),
            }
        }
    }
}

/// The `Result` form of [`execute_trade_at`].
pub fn try_execute_trade(
    portfolio: &Portfolio,
    symbol: &str,
    trade_type: TradeType,
    shares: f64,
    price: f64,
    timestamp: DateTime<Utc>,
) -> Result<Portfolio, TradeError> {
    let shares = validate_shares(shares)?;
    let price = validate_price(price)?;

    let mut next = match trade_type {
        TradeType::Buy => buy(portfolio, symbol, shares, price)?,
        TradeType::Sell => sell(portfolio, symbol, shares, price)?,
    };

    let total = shares as f64 * price;
    next.trades.push(Trade {
        id: Uuid::new_v4().to_string(),
        symbol: symbol.to_string(),
        trade_type,
        shares,
        price,
        timestamp,
        total,
    });

    info!(symbol, side = %trade_type, shares, price, cash = next.cash, "trade filled");
    Ok(next)
}

fn buy(portfolio: &Portfolio, symbol: &str, shares: u64, price: f64) -> Result<Portfolio, TradeError> {
    let cost = shares as f64 * price;
    // also refuses when cash is NaN
    if !(cost <= portfolio.cash) {
        return Err(TradeError::InsufficientCash {
            required: cost,
            available: portfolio.cash,
        });
    }

    let mut positions = portfolio.positions.clone();
    match positions.iter_mut().find(|p| p.symbol == symbol) {
        Some(existing) => {
            let total_shares = existing
                .shares
                .checked_add(shares)
                .filter(|&total| total <= MAX_SHARES as u64)
                .ok_or_else(|| TradeError::ShareLimit {
                    symbol: symbol.to_string(),
                    held: existing.shares,
                    requested: shares,
                })?;
            let avg_cost = (existing.cost_basis() + cost) / total_shares as f64;
            *existing = Position {
                symbol: existing.symbol.clone(),
                shares: total_shares,
                avg_cost,
                current_price: price,
            };
        }
        None => positions.push(Position {
            symbol: symbol.to_string(),
            shares,
            avg_cost: price,
            current_price: price,
        }),
    }

    Ok(Portfolio {
        cash: portfolio.cash - cost,
        starting_cash: portfolio.starting_cash,
        positions,
        trades: portfolio.trades.clone(),
    })
}

fn sell(portfolio: &Portfolio, symbol: &str, shares: u64, price: f64) -> Result<Portfolio, TradeError> {
    let held = portfolio
        .get_position(symbol)
        .ok_or_else(|| TradeError::NoPosition {
            symbol: symbol.to_string(),
        })?;
    if held.shares < shares {
        return Err(TradeError::InsufficientShares {
            symbol: symbol.to_string(),
            held: held.shares,
            requested: shares,
        });
    }

    let positions = portfolio
        .positions
        .iter()
        .filter_map(|p| {
            if p.symbol != symbol {
                return Some(p.clone());
            }
            let remaining = p.shares - shares;
            (remaining > 0).then(|| Position {
                symbol: p.symbol.clone(),
                shares: remaining,
                avg_cost: p.avg_cost,
                current_price: price,
            })
        })
        .collect();

    Ok(Portfolio {
        cash: portfolio.cash + shares as f64 * price,
        starting_cash: portfolio.starting_cash,
        positions,
        trades: portfolio.trades.clone(),
    })
}
