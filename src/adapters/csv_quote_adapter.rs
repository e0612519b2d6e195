//! CSV quote adapter: one `<SYMBOL>.csv` file of daily bars per symbol.

use crate::domain::candle::Candle;
use crate::domain::error::TickerdeckError;
use crate::domain::generator::is_weekend;
use crate::domain::timeframe::Timeframe;
use crate::ports::quote_port::QuotePort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol.to_uppercase()))
    }

    /// Every bar in the symbol's file, oldest first.
    ///
    /// Rows must be weekday dates with positive volume, and no date may repeat.
    pub fn read_all(&self, symbol: &str) -> Result<Vec<Candle>, TickerdeckError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| {
            quote_err(symbol, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            // header is line 1
            let line = index + 2;
            let record = result.map_err(|e| quote_err(symbol, format!("line {}: {}", line, e)))?;
            let at = |e: String| quote_err(symbol, format!("line {}: {}", line, e));

            let time = NaiveDate::parse_from_str(column(&record, 0, "date").map_err(at)?, "%Y-%m-%d")
                .map_err(|e| at(format!("invalid date: {}", e)))?;
            if is_weekend(time) {
                return Err(at(format!("{} is a weekend date", time)));
            }
            let open = price(&record, 1, "open").map_err(at)?;
            let high = price(&record, 2, "high").map_err(at)?;
            let low = price(&record, 3, "low").map_err(at)?;
            let close = price(&record, 4, "close").map_err(at)?;
            let volume_raw = column(&record, 5, "volume").map_err(at)?;
            let volume: u64 = volume_raw
                .parse()
                .map_err(|e| at(format!("invalid volume value {:?}: {}", volume_raw, e)))?;
            if volume == 0 {
                return Err(at("volume must be positive".into()));
            }

            if low > open.min(close) || high < open.max(close) {
                return Err(at("high/low do not bracket open/close".into()));
            }

            bars.push(Candle {
                time,
                open,
                high,
                low,
                close,
                volume,
            });
        }

        bars.sort_by_key(|b| b.time);
        if let Some(pair) = bars.windows(2).find(|w| w[0].time == w[1].time) {
            return Err(quote_err(symbol, format!("duplicate date {}", pair[0].time)));
        }
        Ok(bars)
    }
}

fn quote_err(symbol: &str, reason: String) -> TickerdeckError {
    TickerdeckError::QuoteSource {
        symbol: symbol.to_string(),
        reason,
    }
}

fn column<'r>(record: &'r csv::StringRecord, index: usize, name: &str) -> Result<&'r str, String> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| format!("missing {} column", name))
}

fn price(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, String> {
    let raw = column(record, index, name)?;
    let value: f64 = raw
        .parse()
        .map_err(|e| format!("invalid {} value {:?}: {}", name, raw, e))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{} must be positive", name));
    }
    Ok(value)
}

impl QuotePort for CsvQuoteAdapter {
    fn fetch_bars(&self, symbol: &str, timeframe: Timeframe) -> Result<Vec<Candle>, TickerdeckError> {
        let mut bars = self.read_all(symbol)?;
        let keep = timeframe.trading_days();
        if bars.len() > keep {
            bars.drain(..bars.len() - keep);
        }
        Ok(bars)
    }
}
