//! 2-Year MA Multiplier

use crate::config::TwoYearMaConfig;
use crate::error::ConfigError;
use crate::indicators::moving_average::MovingAverageEngine;
use crate::indicators::registry::{Indicator, IndicatorKind};
use crate::models::indicators::IndicatorResult;
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TwoYearMaState {
    Bottom,
    Neutral,
    Bullish,
    ExtremeTop,
}

impl TwoYearMaState {
    pub const ALL: [TwoYearMaState; 4] = [
        TwoYearMaState::Bottom,
        TwoYearMaState::Neutral,
        TwoYearMaState::Bullish,
        TwoYearMaState::ExtremeTop,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TwoYearMaState::Bottom => "BOTTOM",
            TwoYearMaState::Neutral => "NEUTRAL",
            TwoYearMaState::Bullish => "BULLISH",
            TwoYearMaState::ExtremeTop => "EXTREME_TOP",
        }
    }
}

/// Close divided by the 730-day average.
#[derive(Debug, Clone)]
pub struct TwoYearMa {
    window: usize,
    top_multiplier: f64,
    table: ThresholdTable<TwoYearMaState>,
}

impl TwoYearMa {
    pub fn new(config: &TwoYearMaConfig) -> Result<Self, ConfigError> {
        if config.window == 0 {
            return Err(ConfigError::ZeroWindow {
                indicator: "two_year_ma",
            });
        }
        let table = ThresholdTable::from_lower_bounds(
            "two_year_ma",
            &[config.neutral_from, config.bullish_from, config.extreme_top_from],
            &TwoYearMaState::ALL,
        )?;

        Ok(Self {
            window: config.window,
            top_multiplier: config.extreme_top_from,
            table,
        })
    }

    pub fn classify(&self, multiplier: f64) -> TwoYearMaState {
        self.table.classify(multiplier)
    }
}

impl Indicator for TwoYearMa {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::TwoYearMa
    }

    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult {
        let baseline = match averages.latest(self.window) {
            Ok(baseline) => baseline,
            Err(shortfall) => return IndicatorResult::unavailable(self.kind(), shortfall),
        };
        let close = averages.latest_close().unwrap_or(baseline);
        let multiplier = close / baseline;

        IndicatorResult::available(self.kind(), multiplier, self.classify(multiplier))
            .with_aux("baseline", baseline)
            .with_aux("top_band", baseline * self.top_multiplier)
            .with_aux("window", self.window as f64)
    }
}
