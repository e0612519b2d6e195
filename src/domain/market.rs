//! Stock snapshots, sector aggregates and the synthetic market universe.

use std::collections::HashMap;

use super::generator::preset_for;
use super::random::{symbol_seed, SeededRandom};

pub const MARKET_SEED_MULTIPLIER: i64 = 104_729;

#[derive(Debug, Clone, PartialEq)]
pub struct Stock {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub market_cap: f64,
    pub price: f64,
    /// Signed daily change in percent.
    pub change: f64,
    pub volume: u64,
}

impl Stock {
    pub fn new(
        symbol: &str,
        name: &str,
        sector: &str,
        market_cap: f64,
        price: f64,
        change: f64,
        volume: u64,
    ) -> Self {
        Stock {
            symbol: symbol.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
            market_cap,
            price,
            change,
            volume,
        }
    }

    pub fn is_advancing(&self) -> bool {
        self.change > 0.0
    }

    pub fn is_declining(&self) -> bool {
        self.change < 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub name: String,
    pub stocks: Vec<Stock>,
    pub total_market_cap: f64,
    pub avg_change: f64,
}

/// Group stocks by sector name, largest total market cap first.
pub fn group_by_sector(stocks: &[Stock]) -> Vec<Sector> {
    let mut grouped: HashMap<&str, Vec<Stock>> = HashMap::new();
    for stock in stocks {
        grouped.entry(stock.sector.as_str()).or_default().push(stock.clone());
    }

    let mut sectors: Vec<Sector> = grouped
        .into_iter()
        .map(|(name, stocks)| {
            let total_market_cap = stocks.iter().map(|s| s.market_cap).sum();
            let avg_change = stocks.iter().map(|s| s.change).sum::<f64>() / stocks.len() as f64;
            Sector {
                name: name.to_string(),
                stocks,
                total_market_cap,
                avg_change,
            }
        })
        .collect();

    sectors.sort_by(|a, b| {
        b.total_market_cap
            .total_cmp(&a.total_market_cap)
            .then_with(|| a.name.cmp(&b.name))
    });
    sectors
}

/// (symbol, name, sector, market cap in billions)
const UNIVERSE: &[(&str, &str, &str, f64)] = &[
    ("AAPL", "Apple Inc.", "Technology", 2900.0),
    ("MSFT", "Microsoft Corp.", "Technology", 3050.0),
    ("NVDA", "NVIDIA Corp.", "Technology", 2100.0),
    ("AMD", "Advanced Micro Devices", "Technology", 275.0),
    ("GOOGL", "Alphabet Inc.", "Communication", 1900.0),
    ("META", "Meta Platforms", "Communication", 1250.0),
    ("NFLX", "Netflix Inc.", "Communication", 265.0),
    ("AMZN", "Amazon.com Inc.", "Consumer", 1850.0),
    ("TSLA", "Tesla Inc.", "Consumer", 570.0),
    ("WMT", "Walmart Inc.", "Consumer", 485.0),
    ("JPM", "JPMorgan Chase", "Financials", 560.0),
    ("V", "Visa Inc.", "Financials", 560.0),
    ("BAC", "Bank of America", "Financials", 300.0),
    ("JNJ", "Johnson & Johnson", "Healthcare", 375.0),
    ("UNH", "UnitedHealth Group", "Healthcare", 455.0),
    ("PFE", "Pfizer Inc.", "Healthcare", 160.0),
    ("XOM", "Exxon Mobil", "Energy", 460.0),
    ("CVX", "Chevron Corp.", "Energy", 290.0),
    ("CAT", "Caterpillar Inc.", "Industrials", 170.0),
    ("BA", "Boeing Co.", "Industrials", 110.0),
];

/// Symbols in the default universe.
pub fn universe_symbols() -> impl Iterator<Item = &'static str> {
    UNIVERSE.iter().map(|(symbol, ..)| *symbol)
}

/// Deterministic snapshot of the universe for a refresh cycle.
///
/// Each stock's daily change is a normal draw scaled by its preset volatility;
/// the same `refresh` always yields the same snapshot.
pub fn generate_stocks(refresh: u64) -> Vec<Stock> {
    UNIVERSE
        .iter()
        .map(|&(symbol, name, sector, cap_billions)| {
            let preset = preset_for(symbol);
            let seed = symbol_seed(symbol, MARKET_SEED_MULTIPLIER).wrapping_add(refresh as i64);
            let mut rng = SeededRandom::new(seed);

            let change = (rng.next_normal() * preset.volatility * 100.0 * 100.0).round() / 100.0;
            let factor = 1.0 + change / 100.0;
            let price = ((preset.price * factor) * 100.0).round() / 100.0;
            let volume = (1_000_000.0 + rng.next_f64() * 49_000_000.0).round() as u64;

            Stock::new(
                symbol,
                name,
                sector,
                cap_billions * 1e9 * factor,
                price.max(0.01),
                change,
                volume,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn stock(symbol: &str, sector: &str, cap: f64, change: f64) -> Stock {
        Stock::new(symbol, symbol, sector, cap, 10.0, change, 1000)
    }

    #[test]
    fn sectors_aggregate_cap_and_change() {
        let stocks = vec![
            stock("A", "Tech", 300.0, 2.0),
            stock("B", "Tech", 100.0, -1.0),
            stock("C", "Energy", 50.0, 0.5),
        ];
        let sectors = group_by_sector(&stocks);

        assert_eq!(sectors.len(), 2);
        assert_eq!(sectors[0].name, "Tech");
        assert_relative_eq!(sectors[0].total_market_cap, 400.0);
        assert_relative_eq!(sectors[0].avg_change, 0.5);
        assert_eq!(sectors[0].stocks.len(), 2);
        assert_eq!(sectors[1].name, "Energy");
    }

    #[test]
    fn no_stocks_no_sectors() {
        assert!(group_by_sector(&[]).is_empty());
    }

    #[test]
    fn advancing_and_declining() {
        assert!(stock("A", "X", 1.0, 0.1).is_advancing());
        assert!(stock("A", "X", 1.0, -0.1).is_declining());
        let flat = stock("A", "X", 1.0, 0.0);
        assert!(!flat.is_advancing() && !flat.is_declining());
    }

    #[test]
    fn snapshot_is_deterministic_per_refresh() {
        assert_eq!(generate_stocks(3), generate_stocks(3));
        assert_ne!(generate_stocks(3), generate_stocks(4));
    }

    #[test]
    fn snapshot_has_valid_fields() {
        let stocks = generate_stocks(0);
        assert_eq!(stocks.len(), universe_symbols().count());
        for s in &stocks {
            assert!(s.market_cap > 0.0);
            assert!(s.price > 0.0);
            assert!(s.volume > 0);
            assert!(s.change.is_finite());
        }
    }

    #[test]
    fn symbols_are_unique() {
        use std::collections::HashSet;
        let symbols: HashSet<&str> = universe_symbols().collect();
        assert_eq!(symbols.len(), UNIVERSE.len());
    }
}
