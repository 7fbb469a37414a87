//! Test utilities for API server integration tests

use axum_test::TestServer;
use chrono::{Duration, NaiveDate};
use cyclescope::config::AppConfig;
use cyclescope::core::http::{create_router, AppState};
use cyclescope::metrics::Metrics;
use cyclescope::models::DailyBar;
use cyclescope::services::analysis::AnalysisService;
use cyclescope::services::market_data::{FearGreedReading, StaticMarketData};
use std::sync::Arc;

/// Daily bars on a gentle uptrend with a weekly wobble.
pub fn history(days: i64, start_price: f64) -> Vec<DailyBar> {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    (0..days)
        .map(|i| {
            let t = i as f64;
            let close = start_price * (1.0 + 0.001 * t) + (t * 0.9).sin();
            DailyBar::from_close(start + Duration::days(i), close)
        })
        .collect()
}

pub fn greed_reading() -> FearGreedReading {
    FearGreedReading {
        score: 72,
        classification: "Greed".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 5, 1),
    }
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
}

impl TestApiServer {
    /// BTC and ETH have history, SOL is supported but has none.
    pub async fn new() -> Self {
        let data = StaticMarketData::new()
            .with_bars("BTC", history(720, 30_000.0))
            .with_bars("ETH", history(720, 2_000.0))
            .with_fear_greed(greed_reading());
        Self::with_data(data)
    }

    pub fn with_data(data: StaticMarketData) -> Self {
        let data = Arc::new(data);
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let service = AnalysisService::new(&AppConfig::default(), data.clone(), data)
            .expect("default config is valid")
            .with_metrics(metrics.clone());

        let state = AppState::new(Arc::new(service), metrics.clone());
        let server = TestServer::new(create_router(state)).expect("start test server");

        Self { server, metrics }
    }
}
