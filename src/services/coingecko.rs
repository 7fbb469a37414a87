//! CoinGecko REST client for daily price history

use crate::config::SupportedCoins;
use crate::error::ProviderError;
use crate::models::series::DailyBar;
use crate::services::market_data::MarketDataProvider;
use backon::{ExponentialBuilder, Retryable};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct MarketChart {
    prices: Vec<(f64, f64)>,
    #[serde(default)]
    total_volumes: Vec<(f64, f64)>,
}

pub struct CoinGeckoClient {
    base_url: String,
    coins: SupportedCoins,
    client: reqwest::Client,
    backoff: ExponentialBuilder,
}

impl CoinGeckoClient {
    pub fn new(
        base_url: impl Into<String>,
        coins: SupportedCoins,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cyclescope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(base_url, coins, client))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        coins: SupportedCoins,
        client: reqwest::Client,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            coins,
            client,
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(500))
                .with_max_times(3),
        }
    }

    /// Override the retry schedule (tests use a near-zero delay).
    pub fn with_retry(mut self, min_delay: Duration, max_times: usize) -> Self {
        self.backoff = ExponentialBuilder::default()
            .with_min_delay(min_delay)
            .with_max_times(max_times);
        self
    }

    async fn fetch_chart(&self, coin_id: &str, days: u32) -> Result<MarketChart, ProviderError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        let days = days.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("days", days.as_str()),
                ("interval", "daily"),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<MarketChart>().await?)
    }
}

/// Collapse `[timestamp_ms, value]` pairs into one value per UTC date. The
/// feed repeats the current day as a live point at the end; the last point
/// for a date wins.
fn by_date(points: &[(f64, f64)]) -> Result<BTreeMap<NaiveDate, f64>, ProviderError> {
    let mut out = BTreeMap::new();
    for (timestamp, value) in points {
        let date = DateTime::from_timestamp_millis(*timestamp as i64)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| ProviderError::Decode(format!("invalid timestamp {}", timestamp)))?;
        out.insert(date, *value);
    }
    Ok(out)
}

fn to_bars(chart: &MarketChart) -> Result<Vec<DailyBar>, ProviderError> {
    let prices = by_date(&chart.prices)?;
    let volumes = by_date(&chart.total_volumes)?;
    Ok(prices
        .into_iter()
        .map(|(date, close)| {
            DailyBar::from_close(date, close).with_volume(volumes.get(&date).copied().unwrap_or(0.0))
        })
        .collect())
}

#[async_trait::async_trait]
impl MarketDataProvider for CoinGeckoClient {
    async fn daily_history(&self, symbol: &str, days: u32) -> Result<Vec<DailyBar>, ProviderError> {
        let coin_id = self
            .coins
            .resolve(symbol)
            .ok_or_else(|| ProviderError::UnsupportedSymbol(symbol.to_string()))?;

        let chart = (|| self.fetch_chart(coin_id, days))
            .retry(self.backoff.clone())
            .when(ProviderError::is_retryable)
            .notify(|err, delay| {
                warn!(symbol = %symbol, error = %err, delay_ms = delay.as_millis() as u64, "Retrying CoinGecko request");
            })
            .await?;

        let bars = to_bars(&chart)?;
        debug!(symbol = %symbol, coin_id = %coin_id, bars = bars.len(), "Fetched daily history");
        Ok(bars)
    }
}
