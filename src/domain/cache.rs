//! Bounded FIFO cache of generated candle series, keyed by symbol.
//!
//! A miss generates [`FULL_SERIES_DAYS`] calendar days ending at the cache's
//! anchor date and stores the whole series; timeframe switches then slice the
//! tail without regenerating. When full, the oldest *inserted* symbol is
//! evicted regardless of how recently it was read.

use std::collections::{HashMap, VecDeque};

use chrono::NaiveDate;
use tracing::debug;

use super::candle::Candle;
use super::generator::{generate_candles, preset_for};
use super::timeframe::Timeframe;

pub const DEFAULT_CAPACITY: usize = 32;
pub const FULL_SERIES_DAYS: usize = 400;

#[derive(Debug, Clone)]
pub struct CandleCache {
    capacity: usize,
    end_date: NaiveDate,
    entries: HashMap<String, Vec<Candle>>,
    insertion_order: VecDeque<String>,
}

impl CandleCache {
    pub fn new(capacity: usize, end_date: NaiveDate) -> Self {
        let capacity = capacity.max(1);
        CandleCache {
            capacity,
            end_date,
            entries: HashMap::with_capacity(capacity),
            insertion_order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn with_default_capacity(end_date: NaiveDate) -> Self {
        Self::new(DEFAULT_CAPACITY, end_date)
    }

    /// Most recent `timeframe.trading_days()` candles for `symbol`.
    pub fn get(&mut self, symbol: &str, timeframe: Timeframe) -> &[Candle] {
        let series = self.full_series(symbol);
        let start = series.len().saturating_sub(timeframe.trading_days());
        &series[start..]
    }

    /// The whole cached series for `symbol`, generating it on a miss.
    pub fn full_series(&mut self, symbol: &str) -> &[Candle] {
        if self.entries.contains_key(symbol) {
            debug!(symbol, "candle cache hit");
        } else {
            let series = generate_candles(symbol, preset_for(symbol), FULL_SERIES_DAYS, self.end_date);
            debug!(symbol, candles = series.len(), "candle cache miss, generated series");
            self.insert(symbol.to_string(), series);
        }
        self.entries.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    fn insert(&mut self, symbol: String, series: Vec<Candle>) {
        while self.entries.len() >= self.capacity {
            match self.insertion_order.pop_front() {
                Some(oldest) => {
                    debug!(symbol = %oldest, "evicting oldest cached series");
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }
        self.insertion_order.push_back(symbol.clone());
        self.entries.insert(symbol, series);
    }

    pub fn clear(&mut self) {
        debug!(entries = self.entries.len(), "clearing candle cache");
        self.entries.clear();
        self.insertion_order.clear();
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Cached symbols, oldest insertion first.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.insertion_order.iter().map(String::as_str)
    }
}
