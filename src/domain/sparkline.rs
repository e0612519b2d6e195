//! Compact random-walk sparklines for heatmap tiles.
//!
//! The walk is seeded from the symbol with its own multiplier, so it never
//! shares a stream with the candle generator. The last point is nudged toward
//! the day's change so the tail agrees with the tile color, then the series is
//! min-max normalized into [0, 1].

use std::collections::HashMap;

use super::market::Stock;
use super::random::{symbol_seed, SeededRandom};

pub const SPARKLINE_LEN: usize = 30;
pub const SPARKLINE_SEED_MULTIPLIER: i64 = 7919;

const STEP_SCALE: f64 = 0.04;
const TAIL_BIAS: f64 = 0.5;

pub fn generate_sparkline(symbol: &str, change_percent: f64) -> Vec<f64> {
    let mut rng = SeededRandom::new(symbol_seed(symbol, SPARKLINE_SEED_MULTIPLIER));
    let mut value = 100.0;
    let mut points = Vec::with_capacity(SPARKLINE_LEN);

    for _ in 0..SPARKLINE_LEN {
        value *= 1.0 + (rng.next_f64() - 0.5) * STEP_SCALE;
        points.push(value);
    }

    let change = if change_percent.is_finite() { change_percent } else { 0.0 };
    if let Some(last) = points.last_mut() {
        *last *= 1.0 + change / 100.0 * TAIL_BIAS;
    }

    normalize(&mut points);
    points
}

pub fn generate_all_sparklines(stocks: &[Stock]) -> HashMap<String, Vec<f64>> {
    stocks
        .iter()
        .map(|s| (s.symbol.clone(), generate_sparkline(&s.symbol, s.change)))
        .collect()
}

/// Min-max scale in place; a flat series maps to all zeros.
fn normalize(points: &mut [f64]) {
    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let denom = if range > 0.0 { range } else { 1.0 };
    for p in points.iter_mut() {
        *p = (*p - min) / denom;
    }
}
