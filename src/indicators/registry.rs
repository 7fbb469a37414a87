//! Indicator registry and trait system

use crate::indicators::moving_average::MovingAverageEngine;
use crate::models::indicators::IndicatorResult;
use serde::{Deserialize, Serialize};

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorCategory {
    Cycle,
    Momentum,
    Valuation,
    Sentiment,
}

/// The seven indicators the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    PiCycle,
    TwoYearMa,
    Rsi,
    Rainbow,
    MayerMultiple,
    GoldenRatio,
    FearGreed,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::PiCycle,
        IndicatorKind::TwoYearMa,
        IndicatorKind::Rsi,
        IndicatorKind::Rainbow,
        IndicatorKind::MayerMultiple,
        IndicatorKind::GoldenRatio,
        IndicatorKind::FearGreed,
    ];

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::PiCycle => "Pi Cycle Top Indicator",
            IndicatorKind::TwoYearMa => "2-Year MA Multiplier",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Rainbow => "Rainbow Chart",
            IndicatorKind::MayerMultiple => "Mayer Multiple",
            IndicatorKind::GoldenRatio => "Golden Ratio Multiplier",
            IndicatorKind::FearGreed => "Fear & Greed Index",
        }
    }

    /// Stable identifier used in logs and metric labels
    pub fn key(&self) -> &'static str {
        match self {
            IndicatorKind::PiCycle => "pi_cycle",
            IndicatorKind::TwoYearMa => "two_year_ma",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Rainbow => "rainbow",
            IndicatorKind::MayerMultiple => "mayer_multiple",
            IndicatorKind::GoldenRatio => "golden_ratio",
            IndicatorKind::FearGreed => "fear_greed",
        }
    }

    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKind::PiCycle | IndicatorKind::TwoYearMa | IndicatorKind::GoldenRatio => {
                IndicatorCategory::Cycle
            }
            IndicatorKind::Rsi => IndicatorCategory::Momentum,
            IndicatorKind::Rainbow | IndicatorKind::MayerMultiple => IndicatorCategory::Valuation,
            IndicatorKind::FearGreed => IndicatorCategory::Sentiment,
        }
    }
}

/// Trait for all price-based indicators
pub trait Indicator {
    fn kind(&self) -> IndicatorKind;

    /// Get the category this indicator belongs to
    fn category(&self) -> IndicatorCategory {
        self.kind().category()
    }

    /// Get the name of the indicator
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Compute and classify against one series. Insufficient history comes
    /// back as an unavailable result, never a panic.
    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult;
}

/// Registry of configured price indicators, evaluated in a fixed order
pub struct IndicatorRegistry {
    indicators: Vec<Box<dyn Indicator + Send + Sync>>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self {
            indicators: Vec::new(),
        }
    }

    pub fn register(mut self, indicator: impl Indicator + Send + Sync + 'static) -> Self {
        self.indicators.push(Box::new(indicator));
        self
    }

    pub fn evaluate_all(&self, averages: &MovingAverageEngine<'_>) -> Vec<IndicatorResult> {
        self.indicators
            .iter()
            .map(|indicator| indicator.evaluate(averages))
            .collect()
    }

    pub fn kinds(&self) -> Vec<IndicatorKind> {
        self.indicators.iter().map(|i| i.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
