//! Domain error types.

/// Why the ledger refused a trade. Returned as a value; the portfolio is untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TradeError {
    #[error("shares must be a positive whole number, got {0}")]
    InvalidShares(f64),

    #[error("price must be a positive finite number, got {0}")]
    InvalidPrice(f64),

    #[error("insufficient cash: need {required:.2}, have {available:.2}")]
    InsufficientCash { required: f64, available: f64 },

    #[error("no position in {symbol}")]
    NoPosition { symbol: String },

    #[error("position in {symbol} would exceed the share limit: hold {held}, tried to buy {requested}")]
    ShareLimit {
        symbol: String,
        held: u64,
        requested: u64,
    },

    #[error("insufficient shares of {symbol}: hold {held}, tried to sell {requested}")]
    InsufficientShares {
        symbol: String,
        held: u64,
        requested: u64,
    },
}

/// Top-level error type for tickerdeck.
#[derive(Debug, thiserror::Error)]
pub enum TickerdeckError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("quote source failed for {symbol}: {reason}")]
    QuoteSource { symbol: String, reason: String },

    #[error("unknown timeframe '{0}' (expected 1M, 3M, 6M or 1Y)")]
    UnknownTimeframe(String),

    #[error("unknown trade side '{0}' (expected buy or sell)")]
    UnknownTradeType(String),

    #[error("unknown overlay '{0}'")]
    UnknownOverlay(String),

    #[error("trade file {file}, line {line}: {reason}")]
    TradeFile {
        file: String,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickerdeckError> for std::process::ExitCode {
    fn from(err: &TickerdeckError) -> Self {
        let code: u8 = match err {
            TickerdeckError::Io(_) | TickerdeckError::Csv(_) => 1,
            TickerdeckError::ConfigParse { .. }
            | TickerdeckError::ConfigMissing { .. }
            | TickerdeckError::ConfigInvalid { .. } => 2,
            TickerdeckError::QuoteSource { .. } => 3,
            TickerdeckError::UnknownTimeframe(_)
            | TickerdeckError::UnknownTradeType(_)
            | TickerdeckError::UnknownOverlay(_)
            | TickerdeckError::TradeFile { .. } => 4,
            TickerdeckError::Trade(_) => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_error_messages() {
        let err = TradeError::InsufficientCash {
            required: 1500.0,
            available: 1000.0,
        };
        assert_eq!(
            err.to_string(),
            "insufficient cash: need 1500.00, have 1000.00"
        );

        let err = TradeError::InsufficientShares {
            symbol: "AAPL".into(),
            held: 5,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "insufficient shares of AAPL: hold 5, tried to sell 10"
        );
    }

    #[test]
    fn trade_error_converts_into_top_level() {
        let err: TickerdeckError = TradeError::InvalidPrice(0.0).into();
        assert!(matches!(err, TickerdeckError::Trade(TradeError::InvalidPrice(_))));
    }

    #[test]
    fn exit_codes_by_class() {
        use std::process::ExitCode;

        let config = TickerdeckError::ConfigInvalid {
            section: "cache".into(),
            key: "capacity".into(),
            reason: "must be at least 1".into(),
        };
        assert_eq!(ExitCode::from(&config), ExitCode::from(2));

        let parse = TickerdeckError::UnknownTimeframe("2W".into());
        assert_eq!(ExitCode::from(&parse), ExitCode::from(4));

        let trade = TickerdeckError::Trade(TradeError::InvalidShares(1.5));
        assert_eq!(ExitCode::from(&trade), ExitCode::from(5));
    }
}
