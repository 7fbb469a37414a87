//! Data collaborators around the engine: remote providers, caching and the
//! analysis service the binaries talk to.

pub mod analysis;
pub mod cache;
pub mod coingecko;
pub mod fear_greed;
pub mod market_data;

pub use analysis::AnalysisService;
pub use cache::TtlCache;
pub use coingecko::CoinGeckoClient;
pub use fear_greed::FearGreedClient;
pub use market_data::{FearGreedReading, MarketDataProvider, SentimentProvider, StaticMarketData};
