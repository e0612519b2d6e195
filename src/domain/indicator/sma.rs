//! Simple Moving Average.
//!
//! Rolling sum over the closes: add the newest, subtract the one leaving the
//! window. Output starts at the `period`-th candle, so
//! `len = candles.len() - period + 1`.

use crate::domain::candle::{Candle, TimeSeriesPoint};

pub fn calculate_sma(candles: &[Candle], period: usize) -> Vec<TimeSeriesPoint> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    sma_values(&closes, period)
        .into_iter()
        .enumerate()
        .map(|(i, value)| TimeSeriesPoint::new(candles[i + period - 1].time, value))
        .collect()
}

/// Window means of `values`; element `i` covers `values[i..i + period]`.
pub(crate) fn sma_values(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(values.len() - period + 1);
    let mut sum: f64 = values[..period].iter().sum();
    out.push(sum / period as f64);

    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out.push(sum / period as f64);
    }
    out
}
