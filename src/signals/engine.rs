//! Per-asset analysis: validate the series, run every indicator, summarize.

use crate::config::EngineConfig;
use crate::error::{AnalysisError, ComparisonError, ConfigError};
use crate::indicators::cycle::{GoldenRatio, PiCycle, TwoYearMa};
use crate::indicators::momentum::Rsi;
use crate::indicators::moving_average::MovingAverageEngine;
use crate::indicators::registry::IndicatorRegistry;
use crate::indicators::sentiment::FearGreed;
use crate::indicators::valuation::{MayerMultiple, Rainbow};
use crate::models::indicators::IndicatorResult;
use crate::models::report::{AnalysisReport, ComparisonReport};
use crate::models::series::{DailyBar, PriceSeries};
use crate::models::snapshot::MarketSnapshot;
use crate::signals::aggregation::summarize;
use crate::signals::comparison::ComparisonAggregator;
use crate::signals::interpretation::interpret_result;
use tracing::debug;

/// Holds the validated configuration and the indicators built from it.
/// Carries no per-analysis state, so one engine can serve any number of
/// analyses, including concurrent ones.
pub struct AnalysisEngine {
    config: EngineConfig,
    registry: IndicatorRegistry,
    fear_greed: FearGreed,
}

impl AnalysisEngine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let registry = IndicatorRegistry::new()
            .register(PiCycle::new(&config.pi_cycle)?)
            .register(TwoYearMa::new(&config.two_year_ma)?)
            .register(Rsi::new(&config.rsi)?)
            .register(Rainbow::new(&config.rainbow)?)
            .register(MayerMultiple::new(&config.mayer)?)
            .register(GoldenRatio::new(&config.golden_ratio)?);
        let fear_greed = FearGreed::new(&config.fear_greed)?;

        Ok(Self {
            config,
            registry,
            fear_greed,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validate raw bars and analyze them. A malformed series fails the
    /// whole report; short history only makes individual indicators
    /// unavailable.
    pub fn analyze(
        &self,
        symbol: &str,
        bars: Vec<DailyBar>,
        fear_greed: Option<u16>,
    ) -> Result<AnalysisReport, AnalysisError> {
        let series =
            PriceSeries::new(symbol, bars).map_err(|source| AnalysisError::MalformedSeries {
                symbol: symbol.to_string(),
                source,
            })?;
        Ok(self.analyze_series(&series, fear_greed))
    }

    pub fn analyze_series(&self, series: &PriceSeries, fear_greed: Option<u16>) -> AnalysisReport {
        let averages = MovingAverageEngine::new(series);

        let indicators: Vec<IndicatorResult> = self
            .registry
            .evaluate_all(&averages)
            .into_iter()
            .map(|result| self.finish(series.symbol(), result))
            .collect();
        let fear_greed = self.finish(series.symbol(), self.fear_greed.evaluate(fear_greed));

        let confluence = summarize(
            indicators.iter().chain(std::iter::once(&fear_greed)),
            self.config.comparison.min_agreeing,
        );

        AnalysisReport {
            symbol: series.symbol().to_string(),
            as_of: series.as_of(),
            latest_close: series.latest_close(),
            market: MarketSnapshot::from_series(series),
            observations: series.len(),
            indicators,
            fear_greed,
            confluence,
        }
    }

    /// Classified and interpreted Fear & Greed reading on its own.
    pub fn evaluate_fear_greed(&self, score: Option<u16>) -> IndicatorResult {
        self.finish("market", self.fear_greed.evaluate(score))
    }

    pub fn compare(&self, reports: Vec<AnalysisReport>) -> Result<ComparisonReport, ComparisonError> {
        ComparisonAggregator::compare(reports, &self.config.comparison)
    }

    fn finish(&self, symbol: &str, result: IndicatorResult) -> IndicatorResult {
        if let Some(reason) = result.unavailable_reason() {
            debug!(
                symbol = %symbol,
                indicator = result.kind.key(),
                reason = %reason,
                "Indicator unavailable"
            );
        }
        let interpretation = interpret_result(&result);
        result.with_interpretation(interpretation)
    }
}
