//! Exponential Moving Average.
//!
//! α = 2/(n+1), seeded with the SMA of the first n closes, then
//! EMA[t] = (C[t] - EMA[t-1]) * α + EMA[t-1].

use crate::domain::candle::{Candle, TimeSeriesPoint};

pub fn calculate_ema(candles: &[Candle], period: usize) -> Vec<TimeSeriesPoint> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    ema_values(&closes, period)
        .into_iter()
        .enumerate()
        .map(|(i, value)| TimeSeriesPoint::new(candles[i + period - 1].time, value))
        .collect()
}

/// EMA of an arbitrary point series, keeping the input times.
pub fn ema_of_points(points: &[TimeSeriesPoint], period: usize) -> Vec<TimeSeriesPoint> {
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    ema_values(&values, period)
        .into_iter()
        .enumerate()
        .map(|(i, value)| TimeSeriesPoint::new(points[i + period - 1].time, value))
        .collect()
}

/// Element `i` corresponds to `values[i + period - 1]`.
pub(crate) fn ema_values(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut ema = values[..period].iter().sum::<f64>() / period as f64;
    let mut out = Vec::with_capacity(values.len() - period + 1);
    out.push(ema);

    for &value in &values[period..] {
        ema = (value - ema) * alpha + ema;
        out.push(ema);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::sma::calculate_sma;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn make_candles(prices: &[f64]) -> Vec<Candle> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                time: start + Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    #[test]
    fn ema_seed_is_sma() {
        let candles = make_candles(&[10.0, 20.0, 30.0, 25.0, 35.0]);
        let ema = calculate_ema(&candles, 3);
        let sma = calculate_sma(&candles, 3);
        assert_relative_eq!(ema[0].value, sma[0].value);
        assert_eq!(ema[0].time, sma[0].time);
    }

    #[test]
    fn ema_recursive_calculation() {
        let candles = make_candles(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        let ema = calculate_ema(&candles, 3);

        let alpha = 2.0 / 4.0;
        let seed = 20.0;
        let e3 = (40.0 - seed) * alpha + seed;
        let e4 = (50.0 - e3) * alpha + e3;

        assert_eq!(ema.len(), 3);
        assert_relative_eq!(ema[0].value, seed);
        assert_relative_eq!(ema[1].value, e3);
        assert_relative_eq!(ema[2].value, e4);
    }

    #[test]
    fn ema_period_1_tracks_close() {
        let candles = make_candles(&[10.0, 20.0, 30.0]);
        let values: Vec<f64> = calculate_ema(&candles, 1).iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn ema_equal_prices() {
        let candles = make_candles(&[100.0; 8]);
        for point in calculate_ema(&candles, 3) {
            assert_relative_eq!(point.value, 100.0);
        }
    }

    #[test]
    fn ema_insufficient_data() {
        let candles = make_candles(&[10.0, 20.0]);
        assert!(calculate_ema(&candles, 3).is_empty());
        assert!(calculate_ema(&candles, 0).is_empty());
        assert!(calculate_ema(&[], 3).is_empty());
    }

    #[test]
    fn ema_of_points_keeps_times() {
        let candles = make_candles(&[1.0, 2.0, 3.0, 4.0]);
        let points: Vec<TimeSeriesPoint> = candles
            .iter()
            .map(|c| TimeSeriesPoint::new(c.time, c.close))
            .collect();
        let ema = ema_of_points(&points, 2);
        assert_eq!(ema.len(), 3);
        assert_eq!(ema[0].time, points[1].time);
        assert_relative_eq!(ema[0].value, 1.5);
    }
}
