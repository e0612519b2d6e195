//! MACD (Moving Average Convergence Divergence).
//!
//! MACD Line = EMA(fast) - EMA(slow), joined on matching dates
//! Signal Line = EMA(signal) of the MACD line
//! Histogram = MACD Line - Signal Line, wherever both exist
//!
//! Default parameters: fast=12, slow=26, signal=9

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::candle::{Candle, TimeSeriesPoint};
use crate::domain::indicator::ema::{calculate_ema, ema_of_points};
use crate::domain::indicator::{HistogramColor, HistogramPoint, MacdResult};

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

pub fn calculate_macd(
    candles: &[Candle],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdResult {
    let ema_fast = calculate_ema(candles, fast);
    let ema_slow: HashMap<NaiveDate, f64> = calculate_ema(candles, slow)
        .into_iter()
        .map(|p| (p.time, p.value))
        .collect();

    let macd: Vec<TimeSeriesPoint> = ema_fast
        .iter()
        .filter_map(|f| {
            ema_slow
                .get(&f.time)
                .map(|s| TimeSeriesPoint::new(f.time, f.value - s))
        })
        .collect();

    let signal = ema_of_points(&macd, signal_period);

    let macd_by_time: HashMap<NaiveDate, f64> = macd.iter().map(|p| (p.time, p.value)).collect();
    let histogram = signal
        .iter()
        .filter_map(|s| {
            macd_by_time.get(&s.time).map(|m| {
                let value = m - s.value;
                HistogramPoint {
                    time: s.time,
                    value,
                    color: HistogramColor::from_value(value),
                }
            })
        })
        .collect();

    MacdResult {
        macd,
        signal,
        histogram,
    }
}

pub fn calculate_macd_default(candles: &[Candle]) -> MacdResult {
    calculate_macd(candles, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}
