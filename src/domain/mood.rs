//! Market mood from advancer / decliner breadth.

use super::market::Stock;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketMood {
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub advancers: usize,
    pub decliners: usize,
    /// advancers / total, 0.5 for an empty set.
    pub breadth: f64,
}

struct MoodTier {
    min_breadth: f64,
    label: &'static str,
    emoji: &'static str,
    color: &'static str,
}

// Descending; the last floor is -inf so every breadth lands somewhere.
const TIERS: [MoodTier; 5] = [
    MoodTier { min_breadth: 0.70, label: "Strong Rally", emoji: "🚀", color: "#00c853" },
    MoodTier { min_breadth: 0.55, label: "Bullish", emoji: "📈", color: "#66bb6a" },
    MoodTier { min_breadth: 0.45, label: "Mixed", emoji: "⚖️", color: "#ffca28" },
    MoodTier { min_breadth: 0.30, label: "Bearish", emoji: "📉", color: "#ef5350" },
    MoodTier { min_breadth: f64::NEG_INFINITY, label: "Selloff", emoji: "🔻", color: "#b71c1c" },
];

pub fn compute_market_mood(stocks: &[Stock]) -> MarketMood {
    let advancers = stocks.iter().filter(|s| s.is_advancing()).count();
    let decliners = stocks.iter().filter(|s| s.is_declining()).count();
    let breadth = if stocks.is_empty() {
        0.5
    } else {
        advancers as f64 / stocks.len() as f64
    };

    let tier = TIERS
        .iter()
        .find(|t| breadth >= t.min_breadth)
        .unwrap_or(&TIERS[TIERS.len() - 1]);

    MarketMood {
        label: tier.label,
        emoji: tier.emoji,
        color: tier.color,
        advancers,
        decliners,
        breadth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocks_with_changes(changes: &[f64]) -> Vec<Stock> {
        changes
            .iter()
            .enumerate()
            .map(|(i, &c)| Stock::new(&format!("S{i}"), "Test", "Tech", 1e9, 10.0, c, 1000))
            .collect()
    }

    #[test]
    fn empty_set_is_mixed() {
        let mood = compute_market_mood(&[]);
        assert_eq!(mood.breadth, 0.5);
        assert_eq!(mood.label, "Mixed");
        assert_eq!(mood.advancers, 0);
        assert_eq!(mood.decliners, 0);
    }

    #[test]
    fn all_advancing_is_top_tier() {
        let mood = compute_market_mood(&stocks_with_changes(&[1.0, 2.0, 0.1]));
        assert_eq!(mood.breadth, 1.0);
        assert_eq!(mood.label, "Strong Rally");
    }

    #[test]
    fn all_declining_is_bottom_tier() {
        let mood = compute_market_mood(&stocks_with_changes(&[-1.0, -2.0]));
        assert_eq!(mood.breadth, 0.0);
        assert_eq!(mood.label, "Selloff");
        assert_eq!(mood.decliners, 2);
    }

    #[test]
    fn unchanged_stocks_count_toward_total_only() {
        let mood = compute_market_mood(&stocks_with_changes(&[1.0, 0.0, 0.0, -1.0]));
        assert_eq!(mood.advancers, 1);
        assert_eq!(mood.decliners, 1);
        assert_eq!(mood.breadth, 0.25);
        assert_eq!(mood.label, "Selloff");
    }

    #[test]
    fn thresholds_are_inclusive() {
        // 7 of 10 advancing -> exactly 0.70
        let mut changes = vec![1.0; 7];
        changes.extend([-1.0; 3]);
        assert_eq!(compute_market_mood(&stocks_with_changes(&changes)).label, "Strong Rally");

        // 3 of 10 -> exactly 0.30
        let mut changes = vec![1.0; 3];
        changes.extend([-1.0; 7]);
        assert_eq!(compute_market_mood(&stocks_with_changes(&changes)).label, "Bearish");
    }

    #[test]
    fn every_breadth_classifies() {
        for advancing in 0..=20 {
            let mut changes = vec![1.0; advancing];
            changes.extend(vec![-1.0; 20 - advancing]);
            let mood = compute_market_mood(&stocks_with_changes(&changes));
            assert!((0.0..=1.0).contains(&mood.breadth));
            assert!(!mood.label.is_empty());
        }
    }
}
