//! Integration tests for the API Server
//!
//! Tests HTTP endpoints, health checks, metrics, and error mapping.

#[path = "api_server/test_utils.rs"]
mod test_utils;

use cyclescope::services::market_data::StaticMarketData;
use serde_json::Value;

use test_utils::{history, TestApiServer};

#[tokio::test]
async fn health_endpoint_reports_healthy_status() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].as_u64().is_some());
    assert_eq!(body["service"], "cyclescope");
}

#[tokio::test]
async fn metrics_endpoint_exposes_prometheus_metrics() {
    let app = TestApiServer::new().await;
    let _ = app.server.get("/api/analyze/BTC").await;

    let response = app.server.get("/metrics").await;
    assert_eq!(response.status_code(), 200);

    let body = response.text();
    assert!(
        body.contains("http_requests_total"),
        "Expected http_requests_total metric"
    );
    assert!(
        body.contains("http_request_duration_seconds"),
        "Expected http_request_duration_seconds metric"
    );
    assert!(
        body.contains("analyses_total"),
        "Expected analyses_total metric"
    );
}

#[tokio::test]
async fn coins_endpoint_lists_supported_coins() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/coins").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let symbols: Vec<&str> = body
        .as_array()
        .expect("array of coins")
        .iter()
        .filter_map(|coin| coin["symbol"].as_str())
        .collect();
    assert_eq!(symbols, vec!["BTC", "ETH", "SOL"]);
    assert_eq!(body[0]["id"], "bitcoin");
}

#[tokio::test]
async fn analyze_returns_full_report() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analyze/btc").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["symbol"], "BTC");
    assert_eq!(body["observations"], 720);
    assert_eq!(body["indicators"].as_array().map(Vec::len), Some(6));
    assert_eq!(body["fear_greed"]["reading"]["status"], "available");
    assert_eq!(body["fear_greed"]["reading"]["state"], "GREED");
    assert!(body["confluence"]["composite_score"].is_number());

    // 720 days covers the Pi Cycle but not the 2-Year MA
    assert_eq!(body["indicators"][0]["reading"]["status"], "available");
    assert_eq!(body["indicators"][1]["reading"]["status"], "unavailable");
    assert_eq!(
        body["indicators"][1]["reading"]["reason"]["code"],
        "insufficient_history"
    );
}

#[tokio::test]
async fn analyze_honours_days_parameter() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analyze/ETH?days=100").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["observations"], 100);
    // only RSI and Fear & Greed fit in 100 days
    assert_eq!(body["confluence"]["available"], 2);
}

#[tokio::test]
async fn analyze_unknown_symbol_is_bad_request() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analyze/XRP").await;
    assert_eq!(response.status_code(), 400);

    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap_or_default().contains("XRP"));
}

#[tokio::test]
async fn analyze_without_history_degrades_to_unavailable() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/analyze/SOL").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["observations"], 0);
    assert!(body["as_of"].is_null());
    assert_eq!(body["confluence"]["available"], 1);
}

#[tokio::test]
async fn fear_greed_endpoint_returns_reading_and_indicator() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/feargreed").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["score"], 72);
    assert_eq!(body["classification"], "Greed");
    assert_eq!(body["indicator"]["reading"]["state"], "GREED");
    assert!(body["indicator"]["interpretation"]["headline"].is_string());
}

#[tokio::test]
async fn fear_greed_endpoint_reports_upstream_failure() {
    let app = TestApiServer::with_data(StaticMarketData::new().with_bars("BTC", history(30, 100.0)));
    let response = app.server.get("/api/feargreed").await;
    assert_eq!(response.status_code(), 502);

    // analyses still succeed without sentiment
    let response = app.server.get("/api/analyze/BTC").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["fear_greed"]["reading"]["status"], "unavailable");
}

#[tokio::test]
async fn compare_ranks_requested_symbols() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/compare?symbols=eth,BTC").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    let rankings = body["rankings"].as_array().expect("rankings");
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings[0]["rank"], 1);
    assert_eq!(body["reports"][0]["symbol"], "BTC");
    assert_eq!(body["reports"][1]["symbol"], "ETH");
    for rank in rankings {
        assert!(rank["price"].is_number());
        assert!(rank["change_7d_pct"].is_number());
    }
    assert!(body["reports"][0]["market"]["change_30d_pct"].is_number());
}

#[tokio::test]
async fn compare_defaults_to_every_coin() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/compare").await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["rankings"].as_array().map(Vec::len), Some(3));
    // SOL has no price history, only sentiment
    let sol = body["reports"]
        .as_array()
        .and_then(|reports| reports.iter().find(|r| r["symbol"] == "SOL"))
        .expect("SOL report");
    assert!(sol["market"].is_null());
    let notes = body["notes"].as_array().expect("notes");
    assert!(notes
        .iter()
        .any(|n| n["kind"] == "missing_as_of" && n["symbol"] == "SOL"));
}

#[tokio::test]
async fn compare_single_symbol_is_bad_request() {
    let app = TestApiServer::new().await;
    let response = app.server.get("/api/compare?symbols=BTC,btc").await;
    assert_eq!(response.status_code(), 400);
}
