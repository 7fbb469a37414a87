//! Error types shared across the engine and its collaborators.

use chrono::NaiveDate;
use thiserror::Error;

/// Rejection of a price series at ingestion. Any of these makes the whole
/// analysis untrustworthy, so no indicator runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeriesError {
    #[error("duplicate date {date} at index {index}")]
    DuplicateDate { date: NaiveDate, index: usize },

    #[error("date {date} at index {index} precedes previous date {previous}")]
    NonChronological {
        previous: NaiveDate,
        date: NaiveDate,
        index: usize,
    },

    #[error("non-finite {field} on {date}")]
    NonFinite { date: NaiveDate, field: &'static str },

    #[error("non-positive {field} {value} on {date}")]
    NonPositive {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },
}

/// Report-level failure of a single asset analysis.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("malformed price series for {symbol}: {source}")]
    MalformedSeries {
        symbol: String,
        #[source]
        source: SeriesError,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComparisonError {
    #[error("comparison needs at least 2 assets, got {count}")]
    TooFewAssets { count: usize },

    #[error("{symbol} appears more than once in the comparison")]
    DuplicateSymbol { symbol: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("window for {indicator} must be greater than zero")]
    ZeroWindow { indicator: &'static str },

    #[error("thresholds for {indicator} must be finite and strictly increasing")]
    NonIncreasingThresholds { indicator: &'static str },

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures of the remote data collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unsupported symbol {0}")]
    UnsupportedSymbol(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected payload: {0}")]
    Decode(String),
}

impl ProviderError {
    /// Transport failures are worth retrying; bad symbols and payloads are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().map(|s| s.is_server_error() || s.as_u16() == 429).unwrap_or(false)
            }
            _ => false,
        }
    }
}

/// Failures surfaced by the analysis service to its callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unsupported symbol {symbol}; supported: {supported}")]
    UnsupportedSymbol { symbol: String, supported: String },

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    #[error("sentiment provider unavailable: {0}")]
    Sentiment(#[source] ProviderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build data provider: {0}")]
    Provider(#[from] ProviderError),
}
