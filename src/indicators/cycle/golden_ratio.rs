//! Golden Ratio Multiplier
//!
//! Places price against Fibonacci multiples of the 350-day average. Each
//! level crossed moves the state one step closer to a cycle top.

use crate::config::GoldenRatioConfig;
use crate::error::ConfigError;
use crate::indicators::moving_average::MovingAverageEngine;
use crate::indicators::registry::{Indicator, IndicatorKind};
use crate::models::indicators::IndicatorResult;
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoldenRatioState {
    Safe,
    Warning,
    ElevatedWarning,
    Top,
    MajorTop,
    ExtremeTop,
}

impl GoldenRatioState {
    pub const ALL: [GoldenRatioState; 6] = [
        GoldenRatioState::Safe,
        GoldenRatioState::Warning,
        GoldenRatioState::ElevatedWarning,
        GoldenRatioState::Top,
        GoldenRatioState::MajorTop,
        GoldenRatioState::ExtremeTop,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoldenRatioState::Safe => "SAFE",
            GoldenRatioState::Warning => "WARNING",
            GoldenRatioState::ElevatedWarning => "ELEVATED_WARNING",
            GoldenRatioState::Top => "TOP",
            GoldenRatioState::MajorTop => "MAJOR_TOP",
            GoldenRatioState::ExtremeTop => "EXTREME_TOP",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoldenRatio {
    window: usize,
    multipliers: [f64; 5],
    table: ThresholdTable<GoldenRatioState>,
}

impl GoldenRatio {
    pub fn new(config: &GoldenRatioConfig) -> Result<Self, ConfigError> {
        if config.window == 0 {
            return Err(ConfigError::ZeroWindow {
                indicator: "golden_ratio",
            });
        }
        let table = ThresholdTable::from_lower_bounds(
            "golden_ratio",
            &config.multipliers,
            &GoldenRatioState::ALL,
        )?;

        Ok(Self {
            window: config.window,
            multipliers: config.multipliers,
            table,
        })
    }

    pub fn classify(&self, ratio: f64) -> GoldenRatioState {
        self.table.classify(ratio)
    }

    /// Aux key for one band level, e.g. `level_1_618`.
    fn level_key(multiplier: f64) -> String {
        let fixed = format!("{:.3}", multiplier);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        format!("level_{}", trimmed.replace('.', "_"))
    }
}

impl Indicator for GoldenRatio {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::GoldenRatio
    }

    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult {
        let baseline = match averages.latest(self.window) {
            Ok(baseline) => baseline,
            Err(shortfall) => return IndicatorResult::unavailable(self.kind(), shortfall),
        };
        let close = averages.latest_close().unwrap_or(baseline);
        let ratio = close / baseline;

        self.multipliers.iter().fold(
            IndicatorResult::available(self.kind(), ratio, self.classify(ratio))
                .with_aux("baseline", baseline)
                .with_aux("window", self.window as f64),
            |result, multiplier| {
                result.with_aux(Self::level_key(*multiplier), baseline * multiplier)
            },
        )
    }
}
