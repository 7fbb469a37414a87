//! Fetch, cache and analyze: the layer between the data providers and the
//! engine. Fetch failures degrade to empty inputs so the engine reports
//! indicators as unavailable instead of failing the request.

use crate::config::{AppConfig, SupportedCoins};
use crate::error::{ConfigError, ServiceError};
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorResult;
use crate::models::report::{AnalysisReport, ComparisonReport};
use crate::models::series::DailyBar;
use crate::services::cache::TtlCache;
use crate::services::coingecko::CoinGeckoClient;
use crate::services::fear_greed::FearGreedClient;
use crate::services::market_data::{FearGreedReading, MarketDataProvider, SentimentProvider};
use crate::signals::engine::AnalysisEngine;
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AnalysisService {
    engine: AnalysisEngine,
    market: Arc<dyn MarketDataProvider>,
    sentiment: Arc<dyn SentimentProvider>,
    coins: SupportedCoins,
    history_days: u32,
    history_cache: TtlCache<(String, u32), Vec<DailyBar>>,
    sentiment_cache: TtlCache<(), FearGreedReading>,
    metrics: Option<Arc<Metrics>>,
}

impl AnalysisService {
    pub fn new(
        config: &AppConfig,
        market: Arc<dyn MarketDataProvider>,
        sentiment: Arc<dyn SentimentProvider>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            engine: AnalysisEngine::new(config.engine.clone())?,
            market,
            sentiment,
            coins: config.supported_coins.clone(),
            history_days: config.history_days,
            history_cache: TtlCache::new(config.cache_ttl),
            sentiment_cache: TtlCache::new(config.cache_ttl),
            metrics: None,
        })
    }

    /// Service wired to the public CoinGecko and alternative.me endpoints.
    pub fn from_config(config: &AppConfig) -> Result<Self, ServiceError> {
        let market = CoinGeckoClient::new(
            config.coingecko_base_url.clone(),
            config.supported_coins.clone(),
            config.http_timeout,
        )?;
        let sentiment = FearGreedClient::new(config.fear_greed_url.clone(), config.http_timeout)?;
        Ok(Self::new(config, Arc::new(market), Arc::new(sentiment))?)
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn supported_coins(&self) -> &SupportedCoins {
        &self.coins
    }

    pub fn engine(&self) -> &AnalysisEngine {
        &self.engine
    }

    fn normalize(&self, symbol: &str) -> Result<String, ServiceError> {
        let symbol = symbol.trim().to_uppercase();
        if self.coins.contains(&symbol) {
            Ok(symbol)
        } else {
            Err(ServiceError::UnsupportedSymbol {
                symbol,
                supported: self.coins.symbols().join(", "),
            })
        }
    }

    async fn history(&self, symbol: &str, days: u32) -> Vec<DailyBar> {
        let key = (symbol.to_string(), days);
        if let Some(bars) = self.history_cache.get(&key).await {
            return bars;
        }
        match self.market.daily_history(symbol, days).await {
            Ok(bars) => {
                self.history_cache.insert(key, bars.clone()).await;
                bars
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Price history fetch failed, analyzing empty series");
                self.record_provider_failure("market_data");
                Vec::new()
            }
        }
    }

    /// Latest Fear & Greed reading, from cache when fresh.
    pub async fn fear_greed(&self) -> Result<FearGreedReading, ServiceError> {
        if let Some(reading) = self.sentiment_cache.get(&()).await {
            return Ok(reading);
        }
        let reading = self.sentiment.fear_greed().await.map_err(|e| {
            self.record_provider_failure("sentiment");
            ServiceError::Sentiment(e)
        })?;
        self.sentiment_cache.insert((), reading.clone()).await;
        Ok(reading)
    }

    /// Reading plus its classified, interpreted indicator result.
    pub async fn fear_greed_result(&self) -> Result<(FearGreedReading, IndicatorResult), ServiceError> {
        let reading = self.fear_greed().await?;
        let result = self.engine.evaluate_fear_greed(Some(reading.score));
        Ok((reading, result))
    }

    async fn fear_greed_score(&self) -> Option<u16> {
        match self.fear_greed().await {
            Ok(reading) => Some(reading.score),
            Err(e) => {
                warn!(error = %e, "Fear & Greed unavailable, continuing without sentiment");
                None
            }
        }
    }

    async fn analyze_normalized(
        &self,
        symbol: &str,
        days: u32,
        fear_greed: Option<u16>,
    ) -> Result<AnalysisReport, ServiceError> {
        let bars = self.history(symbol, days).await;
        let report = self.engine.analyze(symbol, bars, fear_greed)?;
        if let Some(metrics) = &self.metrics {
            metrics.record_analysis(&report);
        }
        info!(
            symbol = %report.symbol,
            observations = report.observations,
            available = report.confluence.available,
            assessment = ?report.confluence.assessment,
            "Analysis complete"
        );
        Ok(report)
    }

    pub async fn analyze(&self, symbol: &str, days: Option<u32>) -> Result<AnalysisReport, ServiceError> {
        let symbol = self.normalize(symbol)?;
        let days = days.unwrap_or(self.history_days);
        let fear_greed = self.fear_greed_score().await;
        self.analyze_normalized(&symbol, days, fear_greed).await
    }

    /// Analyze every symbol concurrently and compare. Duplicates are
    /// collapsed before the count check.
    pub async fn compare(
        &self,
        symbols: &[String],
        days: Option<u32>,
    ) -> Result<ComparisonReport, ServiceError> {
        let mut normalized = symbols
            .iter()
            .map(|s| self.normalize(s))
            .collect::<Result<Vec<_>, _>>()?;
        normalized.sort();
        normalized.dedup();

        let days = days.unwrap_or(self.history_days);
        let fear_greed = self.fear_greed_score().await;
        let reports = join_all(
            normalized
                .iter()
                .map(|symbol| self.analyze_normalized(symbol, days, fear_greed)),
        )
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

        Ok(self.engine.compare(reports)?)
    }

    /// Drop expired cache entries; returns how many were removed.
    pub async fn purge_cache(&self) -> usize {
        self.history_cache.purge_expired().await + self.sentiment_cache.purge_expired().await
    }

    fn record_provider_failure(&self, provider: &str) {
        if let Some(metrics) = &self.metrics {
            metrics
                .provider_failures_total
                .with_label_values(&[provider])
                .inc();
        }
    }
}
