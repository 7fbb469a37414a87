//! Market-cycle indicator engine.
//!
//! Converts a daily price history into discrete cycle signals (Pi Cycle,
//! 2-Year MA Multiplier, RSI, Rainbow, Mayer Multiple, Golden Ratio
//! Multiplier, Fear & Greed), interprets them, and compares assets.

pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;

pub use error::{AnalysisError, ComparisonError, ConfigError, ProviderError, SeriesError, ServiceError};
pub use models::{AnalysisReport, ComparisonReport, DailyBar, IndicatorResult, PriceSeries};
pub use signals::engine::AnalysisEngine;
