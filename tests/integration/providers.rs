//! Integration tests for the remote data clients against mocked upstreams

use cyclescope::config::{AppConfig, SupportedCoins};
use cyclescope::error::{ProviderError, ServiceError};
use cyclescope::services::analysis::AnalysisService;
use cyclescope::services::coingecko::CoinGeckoClient;
use cyclescope::services::fear_greed::FearGreedClient;
use cyclescope::services::market_data::{MarketDataProvider, SentimentProvider};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DAY_MS: i64 = 86_400_000;
// 2024-01-01T00:00:00Z
const START_MS: i64 = 1_704_067_200_000;

fn market_chart(days: i64) -> Value {
    let prices: Vec<Value> = (0..days)
        .map(|i| json!([START_MS + i * DAY_MS, 100.0 + i as f64]))
        .collect();
    let volumes: Vec<Value> = (0..days)
        .map(|i| json!([START_MS + i * DAY_MS, 1_000.0]))
        .collect();
    json!({ "prices": prices, "total_volumes": volumes })
}

fn fng_body(value: &str, classification: &str) -> Value {
    json!({
        "name": "Fear and Greed Index",
        "data": [{
            "value": value,
            "value_classification": classification,
            "timestamp": "1704067200"
        }]
    })
}

async fn mock_chart(server: &MockServer, coin_id: &str, days: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/coins/{}/market_chart", coin_id)))
        .and(query_param("vs_currency", "usd"))
        .and(query_param("interval", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(market_chart(days)))
        .mount(server)
        .await;
}

async fn mock_fng(server: &MockServer, value: &str, classification: &str) {
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fng_body(value, classification)))
        .mount(server)
        .await;
}

fn coingecko(server: &MockServer) -> CoinGeckoClient {
    CoinGeckoClient::new(server.uri(), SupportedCoins::default(), Duration::from_secs(5))
        .expect("client builds")
        .with_retry(Duration::from_millis(1), 1)
}

fn fear_greed(server: &MockServer) -> FearGreedClient {
    FearGreedClient::new(format!("{}/fng/", server.uri()), Duration::from_secs(5))
        .expect("client builds")
        .with_retry(Duration::from_millis(1), 1)
}

#[tokio::test]
async fn coingecko_history_becomes_daily_bars() {
    let server = MockServer::start().await;
    mock_chart(&server, "bitcoin", 30).await;

    let bars = coingecko(&server).daily_history("btc", 30).await.unwrap();
    assert_eq!(bars.len(), 30);
    assert_eq!(bars[0].date.to_string(), "2024-01-01");
    assert_eq!(bars[29].close, 129.0);
    assert_eq!(bars[0].volume, 1_000.0);
    assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
}

#[tokio::test]
async fn coingecko_retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/ethereum/market_chart"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let err = coingecko(&server).daily_history("ETH", 10).await.unwrap_err();
    assert!(matches!(err, ProviderError::Http(_)));
}

#[tokio::test]
async fn coingecko_does_not_retry_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/coins/solana/market_chart"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert!(coingecko(&server).daily_history("SOL", 10).await.is_err());
}

#[tokio::test]
async fn coingecko_rejects_unknown_symbol_without_request() {
    let server = MockServer::start().await;
    let err = coingecko(&server).daily_history("DOGE", 10).await.unwrap_err();
    assert!(matches!(err, ProviderError::UnsupportedSymbol(symbol) if symbol == "DOGE"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn fear_greed_reading_is_parsed() {
    let server = MockServer::start().await;
    mock_fng(&server, "27", "Fear").await;

    let reading = fear_greed(&server).fear_greed().await.unwrap();
    assert_eq!(reading.score, 27);
    assert_eq!(reading.classification, "Fear");
    assert_eq!(reading.date.map(|d| d.to_string()).as_deref(), Some("2024-01-01"));
}

#[tokio::test]
async fn fear_greed_empty_payload_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let err = fear_greed(&server).fear_greed().await.unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)));
}

#[tokio::test]
async fn service_analyzes_from_mocked_upstreams() {
    let server = MockServer::start().await;
    mock_chart(&server, "bitcoin", 250).await;
    mock_fng(&server, "81", "Extreme Greed").await;

    let config = AppConfig {
        coingecko_base_url: server.uri(),
        fear_greed_url: format!("{}/fng/", server.uri()),
        ..AppConfig::default()
    };
    let service = AnalysisService::from_config(&config).unwrap();

    let report = service.analyze("BTC", Some(250)).await.unwrap();
    assert_eq!(report.observations, 250);
    assert_eq!(report.latest_close, Some(349.0));
    let market = report.market.as_ref().expect("market snapshot");
    assert_eq!(market.price, 349.0);
    assert_eq!(market.high, 349.0);
    assert_eq!(market.low, 100.0);
    assert_eq!(market.volume_24h, 1_000.0);
    assert!(report.fear_greed.is_available());

    // second call is served from cache
    let again = service.analyze("BTC", Some(250)).await.unwrap();
    assert_eq!(again, report);
    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn service_reports_sentiment_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/fng/"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let config = AppConfig {
        fear_greed_url: format!("{}/fng/", server.uri()),
        ..AppConfig::default()
    };
    let service = AnalysisService::from_config(&config).unwrap();
    let err = service.fear_greed().await.unwrap_err();
    assert!(matches!(err, ServiceError::Sentiment(_)));
}
