//! Core domain types and logic.

pub mod candle;
pub mod timeframe;
pub mod random;
pub mod generator;
pub mod cache;
pub mod candle_source;
pub mod indicator;
pub mod sparkline;
pub mod market;
pub mod mood;
pub mod position;
pub mod portfolio;
pub mod execution;
pub mod settings;
pub mod error;
