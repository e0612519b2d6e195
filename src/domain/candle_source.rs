//! Candle lookup with an optional live source in front of the generated cache.

use std::borrow::Cow;

use tracing::{debug, warn};

use super::cache::CandleCache;
use super::candle::Candle;
use super::timeframe::Timeframe;
use crate::ports::quote_port::QuotePort;

/// Owns the candle cache and, optionally, a live quote port.
///
/// Live bars win when the port returns a non-empty series; any failure or an
/// empty answer falls back to the generated series without surfacing an error.
pub struct CandleSource {
    cache: CandleCache,
    quotes: Option<Box<dyn QuotePort>>,
}

impl CandleSource {
    pub fn new(cache: CandleCache) -> Self {
        CandleSource { cache, quotes: None }
    }

    pub fn with_quotes(mut self, quotes: Box<dyn QuotePort>) -> Self {
        self.quotes = Some(quotes);
        self
    }

    pub fn candles(&mut self, symbol: &str, timeframe: Timeframe) -> Cow<'_, [Candle]> {
        if let Some(quotes) = &self.quotes {
            match quotes.fetch_bars(symbol, timeframe) {
                Ok(mut bars) if !bars.is_empty() => {
                    bars.sort_by_key(|c| c.time);
                    debug!(symbol, %timeframe, bars = bars.len(), "using live bars");
                    return Cow::Owned(bars);
                }
                Ok(_) => warn!(symbol, %timeframe, "live source returned no bars, using generated data"),
                Err(e) => warn!(symbol, %timeframe, error = %e, "live source failed, using generated data"),
            }
        }
        Cow::Borrowed(self.cache.get(symbol, timeframe))
    }

    /// Drop every generated series; the next lookup regenerates.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cache(&self) -> &CandleCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::TickerdeckError;
    use chrono::NaiveDate;

    struct FailingQuotes;

    impl QuotePort for FailingQuotes {
        fn fetch_bars(&self, symbol: &str, _timeframe: Timeframe) -> Result<Vec<Candle>, TickerdeckError> {
            Err(TickerdeckError::QuoteSource {
                symbol: symbol.to_string(),
                reason: "rate limited".into(),
            })
        }
    }

    struct FixedQuotes(Vec<Candle>);

    impl QuotePort for FixedQuotes {
        fn fetch_bars(&self, _symbol: &str, _timeframe: Timeframe) -> Result<Vec<Candle>, TickerdeckError> {
            Ok(self.0.clone())
        }
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    fn bar(day: u32, close: f64) -> Candle {
        Candle {
            time: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 10,
        }
    }

    #[test]
    fn generated_path_without_quotes() {
        let mut source = CandleSource::new(CandleCache::with_default_capacity(anchor()));
        let candles = source.candles("AAPL", Timeframe::M1).into_owned();
        assert_eq!(candles.len(), Timeframe::M1.trading_days());
        assert!(source.cache().contains("AAPL"));
    }

    #[test]
    fn failing_source_falls_back() {
        let mut plain = CandleCache::with_default_capacity(anchor());
        let expected = plain.get("AAPL", Timeframe::M3).to_vec();

        let mut source =
            CandleSource::new(CandleCache::with_default_capacity(anchor())).with_quotes(Box::new(FailingQuotes));
        assert_eq!(source.candles("AAPL", Timeframe::M3).into_owned(), expected);
    }

    #[test]
    fn empty_live_answer_falls_back() {
        let mut source =
            CandleSource::new(CandleCache::with_default_capacity(anchor())).with_quotes(Box::new(FixedQuotes(vec![])));
        assert_eq!(source.candles("MSFT", Timeframe::M1).len(), 22);
    }

    #[test]
    fn live_bars_are_used_and_sorted() {
        let live = vec![bar(27, 11.0), bar(26, 10.0)];
        let mut source =
            CandleSource::new(CandleCache::with_default_capacity(anchor())).with_quotes(Box::new(FixedQuotes(live)));

        let candles = source.candles("AAPL", Timeframe::M1);
        assert_eq!(candles.len(), 2);
        assert!(candles[0].time < candles[1].time);
        assert!(matches!(candles, Cow::Owned(_)));
        drop(candles);
        assert!(source.cache().is_empty());
    }

    #[test]
    fn clear_resets_cache() {
        let mut source = CandleSource::new(CandleCache::with_default_capacity(anchor()));
        let before = source.candles("AAPL", Timeframe::Y1).into_owned();
        source.clear();
        assert!(source.cache().is_empty());
        assert_eq!(source.candles("AAPL", Timeframe::Y1).into_owned(), before);
    }
}
