//! Runtime configuration: engine thresholds plus the environment-driven
//! settings of the service binaries.

pub mod engine;

pub use engine::*;

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";
pub const DEFAULT_FEAR_GREED_URL: &str = "https://api.alternative.me/fng/";

/// Deployment environment, read from `APP_ENV` (`sandbox` when unset).
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Ticker symbol to market-data id (e.g. `BTC` -> `bitcoin`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupportedCoins(BTreeMap<String, String>);

impl SupportedCoins {
    pub fn new(coins: impl IntoIterator<Item = (String, String)>) -> Self {
        Self(
            coins
                .into_iter()
                .map(|(symbol, id)| (symbol.to_uppercase(), id))
                .collect(),
        )
    }

    /// Case-insensitive lookup of the provider id for a symbol.
    pub fn resolve(&self, symbol: &str) -> Option<&str> {
        self.0.get(&symbol.to_uppercase()).map(String::as_str)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.resolve(symbol).is_some()
    }

    pub fn symbols(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(s, id)| (s.as_str(), id.as_str()))
    }
}

impl Default for SupportedCoins {
    fn default() -> Self {
        Self::new([
            ("BTC".to_string(), "bitcoin".to_string()),
            ("ETH".to_string(), "ethereum".to_string()),
            ("SOL".to_string(), "solana".to_string()),
        ])
    }
}

impl FromStr for SupportedCoins {
    type Err = ConfigError;

    /// Parses `BTC:bitcoin,ETH:ethereum`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut coins = Vec::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (symbol, id) = entry
                .split_once(':')
                .filter(|(s, i)| !s.trim().is_empty() && !i.trim().is_empty())
                .ok_or_else(|| ConfigError::InvalidEnv {
                    key: "SUPPORTED_COINS",
                    value: raw.to_string(),
                })?;
            coins.push((symbol.trim().to_string(), id.trim().to_string()));
        }
        if coins.is_empty() {
            return Err(ConfigError::InvalidEnv {
                key: "SUPPORTED_COINS",
                value: raw.to_string(),
            });
        }
        Ok(Self::new(coins))
    }
}

/// Settings shared by the CLI and the API server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: String,
    pub port: u16,
    pub coingecko_base_url: String,
    pub fear_greed_url: String,
    pub history_days: u32,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,
    pub supported_coins: SupportedCoins,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            port: 8080,
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            fear_greed_url: DEFAULT_FEAR_GREED_URL.to_string(),
            history_days: 1100,
            cache_ttl: Duration::from_secs(300),
            http_timeout: Duration::from_secs(10),
            supported_coins: SupportedCoins::default(),
            engine: EngineConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from environment variables. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let engine = match env::var("ENGINE_CONFIG_PATH") {
            Ok(path) => load_engine_config(path)?,
            Err(_) => EngineConfig::default(),
        };

        let supported_coins = match env::var("SUPPORTED_COINS") {
            Ok(raw) => raw.parse()?,
            Err(_) => defaults.supported_coins,
        };

        Ok(Self {
            environment: get_environment(),
            port: env_or("PORT", defaults.port)?,
            coingecko_base_url: env::var("COINGECKO_BASE_URL")
                .unwrap_or(defaults.coingecko_base_url),
            fear_greed_url: env::var("FEAR_GREED_URL").unwrap_or(defaults.fear_greed_url),
            history_days: env_or("HISTORY_DAYS", defaults.history_days)?,
            cache_ttl: Duration::from_secs(env_or("CACHE_TTL_SECONDS", 300u64)?),
            http_timeout: Duration::from_secs(env_or("HTTP_TIMEOUT_SECONDS", 10u64)?),
            supported_coins,
            engine,
        })
    }
}

fn env_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidEnv { key, value }),
        Err(_) => Ok(default),
    }
}
