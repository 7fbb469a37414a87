//! Data source interfaces the analysis service depends on.

use crate::error::ProviderError;
use crate::models::series::DailyBar;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars for `symbol` over the last `days` days, oldest first.
    async fn daily_history(&self, symbol: &str, days: u32) -> Result<Vec<DailyBar>, ProviderError>;
}

/// Latest published Fear & Greed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedReading {
    pub score: u16,
    pub classification: String,
    pub date: Option<NaiveDate>,
}

#[async_trait::async_trait]
pub trait SentimentProvider: Send + Sync {
    async fn fear_greed(&self) -> Result<FearGreedReading, ProviderError>;
}

/// Provider that serves fixed data, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    pub bars: std::collections::HashMap<String, Vec<DailyBar>>,
    pub fear_greed: Option<FearGreedReading>,
}

impl StaticMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<DailyBar>) -> Self {
        self.bars.insert(symbol.to_uppercase(), bars);
        self
    }

    pub fn with_fear_greed(mut self, reading: FearGreedReading) -> Self {
        self.fear_greed = Some(reading);
        self
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn daily_history(&self, symbol: &str, days: u32) -> Result<Vec<DailyBar>, ProviderError> {
        let bars = self
            .bars
            .get(&symbol.to_uppercase())
            .ok_or_else(|| ProviderError::UnsupportedSymbol(symbol.to_string()))?;
        let keep = (days as usize).min(bars.len());
        Ok(bars[bars.len() - keep..].to_vec())
    }
}

#[async_trait::async_trait]
impl SentimentProvider for StaticMarketData {
    async fn fear_greed(&self) -> Result<FearGreedReading, ProviderError> {
        self.fear_greed
            .clone()
            .ok_or_else(|| ProviderError::Decode("no fear & greed reading configured".to_string()))
    }
}
