//! Bollinger Bands.
//!
//! - Middle: SMA over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! StdDev is the population standard deviation, from rolling sums of x and x²
//! (variance = E[x²] - E[x]², floored at 0 against cancellation).
//!
//! Default parameters: period=20, multiplier=2.0

use crate::domain::candle::{Candle, TimeSeriesPoint};
use crate::domain::indicator::BollingerResult;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

pub fn calculate_bollinger(candles: &[Candle], period: usize, multiplier: f64) -> BollingerResult {
    let mut result = BollingerResult::default();
    if period == 0 || candles.len() < period || !(multiplier.is_finite() && multiplier >= 0.0) {
        return result;
    }

    let n = period as f64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for (i, candle) in candles.iter().enumerate() {
        sum += candle.close;
        sum_sq += candle.close * candle.close;
        if i >= period {
            let leaving = candles[i - period].close;
            sum -= leaving;
            sum_sq -= leaving * leaving;
        }
        if i + 1 < period {
            continue;
        }

        let mean = sum / n;
        let variance = (sum_sq / n - mean * mean).max(0.0);
        let width = multiplier * variance.sqrt();

        result.upper.push(TimeSeriesPoint::new(candle.time, mean + width));
        result.middle.push(TimeSeriesPoint::new(candle.time, mean));
        result.lower.push(TimeSeriesPoint::new(candle.time, mean - width));
    }

    result
}

pub fn calculate_bollinger_default(candles: &[Candle]) -> BollingerResult {
    calculate_bollinger(candles, DEFAULT_PERIOD, DEFAULT_MULTIPLIER)
}
