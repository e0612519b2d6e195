//! Synthetic daily candle generation.
//!
//! Each weekday in the window draws a return `trend + N(0,1) * volatility`,
//! opens at the previous close and extends wicks proportionally to the size
//! of the move. Weekend dates are skipped entirely. Output is a pure function
//! of (symbol, preset, days, end date).

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use super::candle::Candle;
use super::random::{symbol_seed, SeededRandom};

pub const CANDLE_SEED_MULTIPLIER: i64 = 9301;

const MIN_PRICE: f64 = 0.01;
const MAX_WICK_FRACTION: f64 = 0.5;
const BASE_VOLUME: f64 = 500_000.0;
const VOLUME_SPREAD: f64 = 4_500_000.0;
const VOLUME_RETURN_SCALE: f64 = 25.0;
const MAX_PREALLOC: usize = 4096;

/// Starting price, daily volatility and daily drift for a symbol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolPreset {
    pub price: f64,
    pub volatility: f64,
    pub trend: f64,
}

pub const DEFAULT_PRESET: SymbolPreset = SymbolPreset {
    price: 100.0,
    volatility: 0.02,
    trend: 0.0003,
};

pub const KNOWN_PRESETS: &[(&str, SymbolPreset)] = &[
    ("AAPL", SymbolPreset { price: 185.0, volatility: 0.016, trend: 0.0006 }),
    ("MSFT", SymbolPreset { price: 410.0, volatility: 0.015, trend: 0.0007 }),
    ("GOOGL", SymbolPreset { price: 150.0, volatility: 0.018, trend: 0.0005 }),
    ("AMZN", SymbolPreset { price: 175.0, volatility: 0.020, trend: 0.0006 }),
    ("NVDA", SymbolPreset { price: 850.0, volatility: 0.032, trend: 0.0015 }),
    ("META", SymbolPreset { price: 490.0, volatility: 0.024, trend: 0.0009 }),
    ("TSLA", SymbolPreset { price: 180.0, volatility: 0.035, trend: -0.0002 }),
    ("JPM", SymbolPreset { price: 195.0, volatility: 0.013, trend: 0.0004 }),
    ("V", SymbolPreset { price: 275.0, volatility: 0.011, trend: 0.0003 }),
    ("JNJ", SymbolPreset { price: 155.0, volatility: 0.009, trend: 0.0001 }),
    ("XOM", SymbolPreset { price: 115.0, volatility: 0.017, trend: 0.0002 }),
    ("WMT", SymbolPreset { price: 60.0, volatility: 0.010, trend: 0.0004 }),
    ("AMD", SymbolPreset { price: 170.0, volatility: 0.030, trend: 0.0008 }),
    ("NFLX", SymbolPreset { price: 610.0, volatility: 0.025, trend: 0.0007 }),
];

/// Preset for a known symbol, or [`DEFAULT_PRESET`].
pub fn preset_for(symbol: &str) -> SymbolPreset {
    KNOWN_PRESETS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(symbol))
        .map(|(_, preset)| *preset)
        .unwrap_or(DEFAULT_PRESET)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Generate candles for the `days` calendar days ending at `end_date` (inclusive).
///
/// Never fails: `days == 0`, a non-positive start price or a window reaching
/// past the earliest representable date yields an empty series.
pub fn generate_candles(
    symbol: &str,
    preset: SymbolPreset,
    days: usize,
    end_date: NaiveDate,
) -> Vec<Candle> {
    if days == 0 || !(preset.price.is_finite() && preset.price > 0.0) {
        return Vec::new();
    }
    let volatility = if preset.volatility.is_finite() {
        preset.volatility.max(0.0)
    } else {
        0.0
    };
    let trend = if preset.trend.is_finite() { preset.trend } else { 0.0 };

    let Some(start) = i64::try_from(days - 1)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|span| end_date.checked_sub_signed(span))
    else {
        return Vec::new();
    };

    let mut rng = SeededRandom::new(symbol_seed(symbol, CANDLE_SEED_MULTIPLIER));
    let mut candles = Vec::with_capacity(days.min(MAX_PREALLOC));
    let mut price = round2(preset.price).max(MIN_PRICE);

    for time in start.iter_days().take(days) {
        if is_weekend(time) {
            continue;
        }

        let normal = rng.next_normal();
        let daily_return = trend + normal * volatility;

        let open = price;
        let close = round2(open * (1.0 + daily_return)).max(MIN_PRICE);

        let wick_scale = normal.abs() * volatility * 0.5;
        let wick_up = (wick_scale * rng.next_f64()).min(MAX_WICK_FRACTION);
        let wick_down = (wick_scale * rng.next_f64()).min(MAX_WICK_FRACTION);
        let high = round2(open.max(close) * (1.0 + wick_up));
        let low = round2(open.min(close) * (1.0 - wick_down)).max(MIN_PRICE);

        let base = BASE_VOLUME + rng.next_f64() * VOLUME_SPREAD;
        let volume = (base * (1.0 + daily_return.abs() * VOLUME_RETURN_SCALE)).round() as u64;

        candles.push(Candle {
            time,
            open,
            high,
            low,
            close,
            volume: volume.max(1),
        });
        price = close;
    }

    candles
}
