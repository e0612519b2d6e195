//! CLI definition and dispatch.
//!
//! Every subcommand prints CSV to stdout; diagnostics go to stderr through
//! `tracing`, and errors are reported once with an exit code per error class.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_quote_adapter::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::cache::CandleCache;
use crate::domain::candle::{Candle, TimeSeriesPoint};
use crate::domain::candle_source::CandleSource;
use crate::domain::error::{TickerdeckError, TradeError};
use crate::domain::execution::execute_trade;
use crate::domain::indicator::{Overlay, OverlayOutput};
use crate::domain::market::{generate_stocks, group_by_sector, Stock};
use crate::domain::mood::compute_market_mood;
use crate::domain::portfolio::Portfolio;
use crate::domain::position::TradeType;
use crate::domain::settings::DashboardSettings;
use crate::domain::sparkline::generate_all_sparklines;
use crate::domain::timeframe::Timeframe;

#[derive(Parser, Debug)]
#[command(name = "tickerdeck", about = "Market dashboard data core")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print candles for a symbol with optional indicator columns
    Candles {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long, default_value = "3M")]
        timeframe: String,
        /// sma20, sma50, ema12, ema26, bb, rsi or macd; repeatable
        #[arg(short = 'o', long = "overlay")]
        overlays: Vec<String>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the market heatmap: stocks with sparklines, then sector totals
    Heatmap {
        #[arg(short, long, default_value_t = 0)]
        refresh: u64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Replay a trade file through the ledger and print the resulting portfolio
    Trades {
        #[arg(short, long)]
        file: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Candles {
            symbol,
            timeframe,
            overlays,
            config,
        } => run_candles(&symbol, &timeframe, &overlays, config.as_deref()),
        Command::Heatmap { refresh, config } => run_heatmap(refresh, config.as_deref()),
        Command::Trades { file, config } => run_trades(&file, config.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Settings from the INI file at `path`, or built-in defaults when no file is given.
pub fn load_settings(path: Option<&Path>) -> Result<DashboardSettings, TickerdeckError> {
    match path {
        Some(path) => {
            let adapter = FileConfigAdapter::from_file(path)?;
            DashboardSettings::from_config(&adapter)
        }
        None => Ok(DashboardSettings::default()),
    }
}

pub fn build_source(settings: &DashboardSettings) -> CandleSource {
    let source = CandleSource::new(CandleCache::new(settings.cache_capacity, settings.anchor_date));
    match &settings.quotes_dir {
        Some(dir) => source.with_quotes(Box::new(CsvQuoteAdapter::new(dir.clone()))),
        None => source,
    }
}

pub fn parse_overlays(ids: &[String]) -> Result<Vec<Overlay>, TickerdeckError> {
    let mut overlays: Vec<Overlay> = Vec::with_capacity(ids.len());
    for id in ids {
        let overlay: Overlay = id.parse()?;
        if !overlays.contains(&overlay) {
            overlays.push(overlay);
        }
    }
    Ok(overlays)
}

fn run_candles(
    symbol: &str,
    timeframe: &str,
    overlay_ids: &[String],
    config: Option<&Path>,
) -> Result<(), TickerdeckError> {
    let timeframe: Timeframe = timeframe.parse()?;
    let overlays = parse_overlays(overlay_ids)?;
    let settings = load_settings(config)?;
    let symbol = symbol.trim().to_uppercase();

    let mut source = build_source(&settings);
    let candles = source.candles(&symbol, timeframe);
    info!(symbol = %symbol, %timeframe, bars = candles.len(), overlays = overlays.len(), "candles ready");

    write_candles(io::stdout().lock(), &candles, &overlays)
}

/// Column headers contributed by one overlay.
pub fn overlay_columns(overlay: Overlay) -> Vec<String> {
    let id = overlay.id();
    match overlay {
        Overlay::Bollinger => vec![format!("{id}_upper"), format!("{id}_middle"), format!("{id}_lower")],
        Overlay::Macd => vec![id.to_string(), format!("{id}_signal"), format!("{id}_hist")],
        _ => vec![id.to_string()],
    }
}

fn by_date(points: &[TimeSeriesPoint]) -> HashMap<NaiveDate, f64> {
    points.iter().map(|p| (p.time, p.value)).collect()
}

fn overlay_series(output: &OverlayOutput) -> Vec<HashMap<NaiveDate, f64>> {
    match output {
        OverlayOutput::Line(points) => vec![by_date(points)],
        OverlayOutput::Bands(bands) => vec![by_date(&bands.upper), by_date(&bands.middle), by_date(&bands.lower)],
        OverlayOutput::Macd(macd) => vec![
            by_date(&macd.macd),
            by_date(&macd.signal),
            macd.histogram.iter().map(|h| (h.time, h.value)).collect(),
        ],
    }
}

/// One row per candle; overlay cells are empty until the indicator's warmup is over.
pub fn write_candles<W: Write>(out: W, candles: &[Candle], overlays: &[Overlay]) -> Result<(), TickerdeckError> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header: Vec<String> = ["date", "open", "high", "low", "close", "volume"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let mut series = Vec::new();
    for &overlay in overlays {
        header.extend(overlay_columns(overlay));
        series.extend(overlay_series(&overlay.compute(candles)));
    }
    wtr.write_record(&header)?;

    for candle in candles {
        let mut row = vec![
            candle.time.to_string(),
            format!("{:.2}", candle.open),
            format!("{:.2}", candle.high),
            format!("{:.2}", candle.low),
            format!("{:.2}", candle.close),
            candle.volume.to_string(),
        ];
        row.extend(
            series
                .iter()
                .map(|s| s.get(&candle.time).map(|v| format!("{v:.4}")).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

fn run_heatmap(refresh: u64, config: Option<&Path>) -> Result<(), TickerdeckError> {
    // Parsed only to reject a broken file; the heatmap has no tunables.
    load_settings(config)?;

    let stocks = generate_stocks(refresh);
    let mood = compute_market_mood(&stocks);
    info!(
        refresh,
        mood = mood.label,
        advancers = mood.advancers,
        decliners = mood.decliners,
        breadth = mood.breadth,
        "market mood"
    );

    write_heatmap(io::stdout().lock(), &stocks)
}

pub fn write_heatmap<W: Write>(out: W, stocks: &[Stock]) -> Result<(), TickerdeckError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "kind", "symbol", "name", "sector", "market_cap", "price", "change", "volume", "sparkline",
    ])?;

    let sparklines = generate_all_sparklines(stocks);
    for stock in stocks {
        let sparkline = sparklines
            .get(&stock.symbol)
            .map(|points| points.iter().map(|v| format!("{v:.4}")).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        wtr.write_record([
            "stock".to_string(),
            stock.symbol.clone(),
            stock.name.clone(),
            stock.sector.clone(),
            format!("{:.0}", stock.market_cap),
            format!("{:.2}", stock.price),
            format!("{:.2}", stock.change),
            stock.volume.to_string(),
            sparkline,
        ])?;
    }

    for sector in group_by_sector(stocks) {
        let volume: u64 = sector.stocks.iter().map(|s| s.volume).sum();
        wtr.write_record([
            "sector".to_string(),
            String::new(),
            sector.name.clone(),
            sector.name,
            format!("{:.0}", sector.total_market_cap),
            String::new(),
            format!("{:.2}", sector.avg_change),
            volume.to_string(),
            String::new(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// One row of a trade file.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeInstruction {
    pub line: usize,
    pub symbol: String,
    pub trade_type: TradeType,
    pub shares: f64,
    pub price: f64,
}

/// Parse a `symbol,side,shares,price` file with a header row.
///
/// Malformed rows fail the whole file; rows the ledger refuses are a replay
/// concern, not a parse error.
pub fn parse_trade_file(path: &Path) -> Result<Vec<TradeInstruction>, TickerdeckError> {
    let content = fs::read_to_string(path)?;
    parse_trades(&content, &path.display().to_string())
}

pub fn parse_trades(content: &str, file: &str) -> Result<Vec<TradeInstruction>, TickerdeckError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(content.as_bytes());
    let mut instructions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let line = index + 2;
        let file_err = |reason: String| TickerdeckError::TradeFile {
            file: file.to_string(),
            line,
            reason,
        };
        let record = result.map_err(|e| file_err(e.to_string()))?;
        if record.len() != 4 {
            return Err(file_err(format!("expected 4 fields, found {}", record.len())));
        }

        let symbol = record[0].to_uppercase();
        if symbol.is_empty() {
            return Err(file_err("empty symbol".into()));
        }
        let trade_type: TradeType = record[1].parse().map_err(|e: TickerdeckError| file_err(e.to_string()))?;
        let shares: f64 = record[2]
            .parse()
            .map_err(|e| file_err(format!("invalid shares {:?}: {}", &record[2], e)))?;
        let price: f64 = record[3]
            .parse()
            .map_err(|e| file_err(format!("invalid price {:?}: {}", &record[3], e)))?;

        instructions.push(TradeInstruction {
            line,
            symbol,
            trade_type,
            shares,
            price,
        });
    }

    Ok(instructions)
}

#[derive(Debug, Clone)]
pub struct ReplaySummary {
    pub portfolio: Portfolio,
    pub rejected: Vec<(usize, TradeError)>,
}

/// Apply instructions in order; refused trades are recorded and skipped.
pub fn replay_trades(start: Portfolio, instructions: &[TradeInstruction]) -> ReplaySummary {
    let mut portfolio = start;
    let mut rejected = Vec::new();

    for ins in instructions {
        let outcome = execute_trade(&portfolio, &ins.symbol, ins.trade_type, ins.shares, ins.price);
        match outcome.error {
            Some(error) => {
                warn!(line = ins.line, symbol = %ins.symbol, %error, "skipping trade");
                rejected.push((ins.line, error));
            }
            None => portfolio = outcome.portfolio,
        }
    }

    ReplaySummary { portfolio, rejected }
}

/// Latest close per held symbol, from the one-month window.
pub fn latest_prices(source: &mut CandleSource, portfolio: &Portfolio) -> HashMap<String, f64> {
    let mut prices = HashMap::new();
    for position in &portfolio.positions {
        if let Some(last) = source.candles(&position.symbol, Timeframe::M1).last() {
            prices.insert(position.symbol.clone(), last.close);
        }
    }
    prices
}

fn run_trades(file: &Path, config: Option<&Path>) -> Result<(), TickerdeckError> {
    let settings = load_settings(config)?;
    let instructions = parse_trade_file(file)?;

    let summary = replay_trades(Portfolio::new(settings.starting_cash), &instructions);

    let mut source = build_source(&settings);
    let prices = latest_prices(&mut source, &summary.portfolio);
    let marked = summary.portfolio.mark_to_market(&prices);
    info!(
        trades = marked.trades.len(),
        rejected = summary.rejected.len(),
        value = marked.value(),
        "replay finished"
    );

    write_portfolio(io::stdout().lock(), &marked)
}

/// Positions, then allocation slices, then cash and total rows.
pub fn write_portfolio<W: Write>(out: W, portfolio: &Portfolio) -> Result<(), TickerdeckError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record([
        "section", "symbol", "shares", "avg_cost", "price", "value", "pnl", "pnl_percent", "weight",
    ])?;

    for position in &portfolio.positions {
        let pnl = position.pnl();
        wtr.write_record([
            "position".to_string(),
            position.symbol.clone(),
            position.shares.to_string(),
            format!("{:.2}", position.avg_cost),
            format!("{:.2}", position.current_price),
            format!("{:.2}", position.market_value()),
            format!("{:.2}", pnl.amount),
            format!("{:.2}", pnl.percent),
            String::new(),
        ])?;
    }

    for slice in portfolio.allocation() {
        wtr.write_record([
            "allocation".to_string(),
            slice.symbol.unwrap_or_else(|| "CASH".to_string()),
            String::new(),
            String::new(),
            String::new(),
            format!("{:.2}", slice.value),
            String::new(),
            String::new(),
            format!("{:.4}", slice.weight),
        ])?;
    }

    let ret = portfolio.total_return();
    wtr.write_record([
        "total".to_string(),
        String::new(),
        String::new(),
        String::new(),
        String::new(),
        format!("{:.2}", portfolio.value()),
        format!("{:.2}", ret.amount),
        format!("{:.2}", ret.percent),
        String::new(),
    ])?;

    wtr.flush()?;
    Ok(())
}
