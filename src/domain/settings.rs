//! Dashboard settings read from a `ConfigPort` and validated up front.
//!
//! ```ini
//! [dashboard]
//! starting_cash = 100000
//! anchor_date = 2024-06-28
//!
//! [cache]
//! capacity = 32
//!
//! [quotes]
//! enabled = true
//! csv_dir = ./bars
//! ```

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};

use super::cache::DEFAULT_CAPACITY;
use super::error::TickerdeckError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_STARTING_CASH: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    pub starting_cash: f64,
    /// Last calendar day of every generated candle window.
    pub anchor_date: NaiveDate,
    pub cache_capacity: usize,
    /// Directory of `<SYMBOL>.csv` bar files standing in for a live quote feed.
    pub quotes_dir: Option<PathBuf>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            starting_cash: DEFAULT_STARTING_CASH,
            anchor_date: Utc::now().date_naive(),
            cache_capacity: DEFAULT_CAPACITY,
            quotes_dir: None,
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, TickerdeckError> {
        Ok(DashboardSettings {
            starting_cash: read_starting_cash(config)?,
            anchor_date: read_anchor_date(config)?,
            cache_capacity: read_cache_capacity(config)?,
            quotes_dir: read_quotes_dir(config),
        })
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> TickerdeckError {
    TickerdeckError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn read_starting_cash(config: &dyn ConfigPort) -> Result<f64, TickerdeckError> {
    let value = config.get_double("dashboard", "starting_cash", DEFAULT_STARTING_CASH);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("dashboard", "starting_cash", "starting_cash must be positive"));
    }
    Ok(value)
}

fn read_anchor_date(config: &dyn ConfigPort) -> Result<NaiveDate, TickerdeckError> {
    match config.get_string("dashboard", "anchor_date") {
        None => Ok(Utc::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|e| invalid("dashboard", "anchor_date", &format!("expected YYYY-MM-DD: {e}"))),
    }
}

fn read_quotes_dir(config: &dyn ConfigPort) -> Option<PathBuf> {
    if !config.get_bool("quotes", "enabled", true) {
        return None;
    }
    config
        .get_string("quotes", "csv_dir")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn read_cache_capacity(config: &dyn ConfigPort) -> Result<usize, TickerdeckError> {
    let value = config.get_int("cache", "capacity", DEFAULT_CAPACITY as i64);
    if value < 1 {
        return Err(invalid("cache", "capacity", "capacity must be at least 1"));
    }
    usize::try_from(value).map_err(|_| invalid("cache", "capacity", "capacity is too large"))
}
