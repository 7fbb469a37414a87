//! alternative.me Fear & Greed Index client

use crate::error::ProviderError;
use crate::services::market_data::{FearGreedReading, SentimentProvider};
use backon::{ExponentialBuilder, Retryable};
use chrono::DateTime;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct FngResponse {
    data: Vec<FngEntry>,
}

/// The feed encodes numbers as strings.
#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
    timestamp: Option<String>,
}

impl FngEntry {
    fn into_reading(self) -> Result<FearGreedReading, ProviderError> {
        let score = self
            .value
            .trim()
            .parse::<u16>()
            .map_err(|_| ProviderError::Decode(format!("invalid fear & greed value {:?}", self.value)))?;
        let date = self
            .timestamp
            .as_deref()
            .and_then(|ts| ts.trim().parse::<i64>().ok())
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|dt| dt.date_naive());

        Ok(FearGreedReading {
            score,
            classification: self.value_classification,
            date,
        })
    }
}

pub struct FearGreedClient {
    url: String,
    client: reqwest::Client,
    backoff: ExponentialBuilder,
}

impl FearGreedClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
            backoff: ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(500))
                .with_max_times(2),
        }
    }

    pub fn with_retry(mut self, min_delay: Duration, max_times: usize) -> Self {
        self.backoff = ExponentialBuilder::default()
            .with_min_delay(min_delay)
            .with_max_times(max_times);
        self
    }

    async fn fetch(&self) -> Result<FngResponse, ProviderError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("limit", "1")])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<FngResponse>().await?)
    }
}

#[async_trait::async_trait]
impl SentimentProvider for FearGreedClient {
    async fn fear_greed(&self) -> Result<FearGreedReading, ProviderError> {
        let response = (|| self.fetch())
            .retry(self.backoff.clone())
            .when(ProviderError::is_retryable)
            .notify(|err, delay| {
                warn!(error = %err, delay_ms = delay.as_millis() as u64, "Retrying Fear & Greed request");
            })
            .await?;

        let entry = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Decode("empty fear & greed data".to_string()))?;
        let reading = entry.into_reading()?;
        debug!(score = reading.score, classification = %reading.classification, "Fetched Fear & Greed");
        Ok(reading)
    }
}
