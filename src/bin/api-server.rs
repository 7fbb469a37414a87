//! Cyclescope API Server
//!
//! HTTP API serving per-asset analyses, comparisons and the Fear & Greed
//! reading, plus health and metrics endpoints. Holds no state besides a
//! short-lived fetch cache, so it can be horizontally scaled.

use cyclescope::config::AppConfig;
use cyclescope::core::http::start_server;
use cyclescope::logging;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = AppConfig::from_env()?;
    info!("Starting Cyclescope API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);
    info!(
        coins = %config.supported_coins.symbols().join(","),
        history_days = config.history_days,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Analysis settings"
    );

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Shutting down API server...");
    };

    if let Err(e) = start_server(config, shutdown).await {
        error!(error = %e, "HTTP server error");
        return Err(e);
    }

    info!("API server stopped");
    Ok(())
}
