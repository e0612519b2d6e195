#![allow(dead_code)]

use chrono::NaiveDate;
pub use tickerdeck::domain::candle::Candle;
use tickerdeck::domain::error::TickerdeckError;
use tickerdeck::domain::timeframe::Timeframe;
use tickerdeck::ports::quote_port::QuotePort;
use std::collections::HashMap;
use std::io::Write;

pub struct MockQuotePort {
    pub data: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Candle>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_bars(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>, TickerdeckError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(TickerdeckError::QuoteSource {
                symbol: symbol.to_string(),
                reason: reason.clone(),
            });
        }
        let mut bars = self.data.get(symbol).cloned().unwrap_or_default();
        let keep = timeframe.trading_days();
        if bars.len() > keep {
            bars.drain(..bars.len() - keep);
        }
        Ok(bars)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Friday 2024-06-28, the anchor used throughout the integration tests.
pub fn anchor() -> NaiveDate {
    date(2024, 6, 28)
}

pub fn make_candle(date: &str, close: f64) -> Candle {
    Candle {
        time: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

/// Consecutive calendar days of candles whose close follows `closes`.
pub fn candles_from_closes(start_date: &str, closes: &[f64]) -> Vec<Candle> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            time: start + chrono::Duration::days(i as i64),
            open: close,
            high: close + 1.0,
            low: (close - 1.0).max(0.01),
            close,
            volume: 1000,
        })
        .collect()
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
