//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{debug, error, info, Level};

use crate::config::AppConfig;
use crate::error::{AnalysisError, ComparisonError, ServiceError};
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorResult;
use crate::models::report::{AnalysisReport, ComparisonReport};
use crate::services::analysis::AnalysisService;
use crate::services::market_data::FearGreedReading;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub service: Arc<AnalysisService>,
}

impl AppState {
    pub fn new(service: Arc<AnalysisService>, metrics: Arc<Metrics>) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            service,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Service error rendered as a JSON body with a matching status code.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ServiceError::UnsupportedSymbol { .. } => StatusCode::BAD_REQUEST,
            ServiceError::Comparison(
                ComparisonError::TooFewAssets { .. } | ComparisonError::DuplicateSymbol { .. },
            ) => StatusCode::BAD_REQUEST,
            ServiceError::Analysis(AnalysisError::MalformedSeries { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ServiceError::Sentiment(_) => StatusCode::BAD_GATEWAY,
            ServiceError::Config(_) | ServiceError::Provider(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        } else {
            debug!(error = %self.0, status = %status, "Request rejected");
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "cyclescope"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Serialize)]
struct CoinEntry {
    symbol: String,
    id: String,
}

async fn list_coins(State(state): State<AppState>) -> Json<Vec<CoinEntry>> {
    let coins = state
        .service
        .supported_coins()
        .iter()
        .map(|(symbol, id)| CoinEntry {
            symbol: symbol.to_string(),
            id: id.to_string(),
        })
        .collect();
    Json(coins)
}

#[derive(Debug, Deserialize)]
struct AnalyzeQuery {
    days: Option<u32>,
}

async fn analyze(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<AnalyzeQuery>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let report = state.service.analyze(&symbol, params.days).await?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
struct FearGreedResponse {
    #[serde(flatten)]
    reading: FearGreedReading,
    indicator: IndicatorResult,
}

async fn fear_greed(State(state): State<AppState>) -> Result<Json<FearGreedResponse>, ApiError> {
    let (reading, indicator) = state.service.fear_greed_result().await?;
    Ok(Json(FearGreedResponse { reading, indicator }))
}

#[derive(Debug, Deserialize)]
struct CompareQuery {
    /// Comma-separated symbols; every supported coin when omitted.
    symbols: Option<String>,
    days: Option<u32>,
}

async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<ComparisonReport>, ApiError> {
    let symbols: Vec<String> = match params.symbols.as_deref() {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => state.service.supported_coins().symbols(),
    };
    let comparison = state.service.compare(&symbols, params.days).await?;
    Ok(Json(comparison))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/coins", get(list_coins))
        .route("/api/analyze/{symbol}", get(analyze))
        .route("/api/feargreed", get(fear_greed))
        .route("/api/compare", get(compare))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Serve the API until `shutdown` resolves.
pub async fn start_server(
    config: AppConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let service = Arc::new(AnalysisService::from_config(&config)?.with_metrics(metrics.clone()));

    let purge_service = service.clone();
    let purge_every = config.cache_ttl.max(std::time::Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(purge_every);
        loop {
            interval.tick().await;
            let removed = purge_service.purge_cache().await;
            if removed > 0 {
                debug!(removed = removed, "Purged expired cache entries");
            }
        }
    });

    let app = create_router(AppState::new(service, metrics));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
