//! Threshold and window configuration for the indicator engine.
//!
//! Every number the classifiers use lives here and is handed to
//! [`crate::AnalysisEngine::new`], so analyses with different threshold sets
//! can run side by side.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PiCycleConfig {
    pub fast_window: usize,
    pub slow_window: usize,
    pub slow_multiplier: f64,
    /// Trailing days searched for a crossing event.
    pub lookback_days: usize,
    /// Ratio of fast MA to scaled slow MA at which the warning band starts.
    pub warning_ratio: f64,
}

impl Default for PiCycleConfig {
    fn default() -> Self {
        Self {
            fast_window: 111,
            slow_window: 350,
            slow_multiplier: 2.0,
            lookback_days: 365,
            warning_ratio: 0.95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TwoYearMaConfig {
    pub window: usize,
    pub neutral_from: f64,
    pub bullish_from: f64,
    pub extreme_top_from: f64,
}

impl Default for TwoYearMaConfig {
    fn default() -> Self {
        Self {
            window: 730,
            neutral_from: 1.0,
            bullish_from: 2.0,
            extreme_top_from: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

/// Upper boundaries of the first eight rainbow bands as multiples of the
/// baseline average; the ninth band is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainbowConfig {
    pub window: usize,
    pub band_multipliers: [f64; 8],
}

impl Default for RainbowConfig {
    fn default() -> Self {
        Self {
            window: 200,
            band_multipliers: [0.6, 0.75, 0.9, 1.0, 1.2, 1.45, 1.75, 2.1],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MayerConfig {
    pub window: usize,
    pub normal_from: f64,
    pub overvalued_from: f64,
    /// Long-run average of the multiple. Reported, never classified on.
    pub historical_mean: f64,
}

impl Default for MayerConfig {
    fn default() -> Self {
        Self {
            window: 200,
            normal_from: 0.8,
            overvalued_from: 2.4,
            historical_mean: 1.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenRatioConfig {
    pub window: usize,
    pub multipliers: [f64; 5],
}

impl Default for GoldenRatioConfig {
    fn default() -> Self {
        Self {
            window: 350,
            multipliers: [1.618, 2.0, 2.618, 3.0, 3.618],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FearGreedConfig {
    pub fear_from: f64,
    pub neutral_from: f64,
    pub greed_from: f64,
    pub extreme_greed_from: f64,
}

impl Default for FearGreedConfig {
    fn default() -> Self {
        Self {
            fear_from: 25.0,
            neutral_from: 45.0,
            greed_from: 55.0,
            extreme_greed_from: 75.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Indicators that must share a sign for an asset to count as confluent.
    pub min_agreeing: usize,
    /// As-of dates further apart than this get flagged.
    pub max_as_of_divergence_days: i64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            min_agreeing: 3,
            max_as_of_divergence_days: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub pi_cycle: PiCycleConfig,
    pub two_year_ma: TwoYearMaConfig,
    pub rsi: RsiConfig,
    pub rainbow: RainbowConfig,
    pub mayer: MayerConfig,
    pub golden_ratio: GoldenRatioConfig,
    pub fear_greed: FearGreedConfig,
    pub comparison: ComparisonConfig,
}

impl EngineConfig {
    /// Reject windows of zero and thresholds that are not strictly ascending.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("pi_cycle.fast_window", self.pi_cycle.fast_window),
            ("pi_cycle.slow_window", self.pi_cycle.slow_window),
            ("two_year_ma", self.two_year_ma.window),
            ("rsi", self.rsi.period),
            ("rainbow", self.rainbow.window),
            ("mayer", self.mayer.window),
            ("golden_ratio", self.golden_ratio.window),
        ];
        for (indicator, window) in windows {
            if window == 0 {
                return Err(ConfigError::ZeroWindow { indicator });
            }
        }

        let pi = &self.pi_cycle;
        if !(pi.slow_multiplier.is_finite() && pi.slow_multiplier > 0.0) {
            return Err(ConfigError::NonIncreasingThresholds { indicator: "pi_cycle" });
        }
        ensure_increasing("pi_cycle", &[0.0, pi.warning_ratio, 1.0])?;

        let two_year = &self.two_year_ma;
        ensure_increasing(
            "two_year_ma",
            &[two_year.neutral_from, two_year.bullish_from, two_year.extreme_top_from],
        )?;
        ensure_increasing("rsi", &[0.0, self.rsi.oversold, self.rsi.overbought, 100.0])?;
        ensure_increasing("rainbow", &self.rainbow.band_multipliers)?;
        ensure_increasing("mayer", &[self.mayer.normal_from, self.mayer.overvalued_from])?;
        ensure_increasing("golden_ratio", &self.golden_ratio.multipliers)?;

        let fg = &self.fear_greed;
        ensure_increasing(
            "fear_greed",
            &[fg.fear_from, fg.neutral_from, fg.greed_from, fg.extreme_greed_from],
        )?;

        Ok(())
    }
}

fn ensure_increasing(indicator: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    let finite = values.iter().all(|v| v.is_finite());
    let increasing = values.windows(2).all(|w| w[0] < w[1]);
    if finite && increasing {
        Ok(())
    } else {
        Err(ConfigError::NonIncreasingThresholds { indicator })
    }
}

/// Load an engine configuration from a JSON file. Missing sections fall back
/// to their defaults.
pub fn load_engine_config(path: impl AsRef<Path>) -> Result<EngineConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EngineConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
