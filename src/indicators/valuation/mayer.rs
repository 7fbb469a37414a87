//! Mayer Multiple: close over the 200-day average.

use crate::config::MayerConfig;
use crate::error::ConfigError;
use crate::indicators::moving_average::MovingAverageEngine;
use crate::indicators::registry::{Indicator, IndicatorKind};
use crate::models::indicators::IndicatorResult;
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MayerState {
    Undervalued,
    Normal,
    Overvalued,
}

impl MayerState {
    pub const ALL: [MayerState; 3] = [
        MayerState::Undervalued,
        MayerState::Normal,
        MayerState::Overvalued,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MayerState::Undervalued => "UNDERVALUED",
            MayerState::Normal => "NORMAL",
            MayerState::Overvalued => "OVERVALUED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct MayerMultiple {
    window: usize,
    historical_mean: f64,
    table: ThresholdTable<MayerState>,
}

impl MayerMultiple {
    pub fn new(config: &MayerConfig) -> Result<Self, ConfigError> {
        if config.window == 0 {
            return Err(ConfigError::ZeroWindow { indicator: "mayer" });
        }
        let table = ThresholdTable::from_lower_bounds(
            "mayer",
            &[config.normal_from, config.overvalued_from],
            &MayerState::ALL,
        )?;
        Ok(Self {
            window: config.window,
            historical_mean: config.historical_mean,
            table,
        })
    }

    pub fn classify(&self, multiple: f64) -> MayerState {
        self.table.classify(multiple)
    }
}

impl Indicator for MayerMultiple {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::MayerMultiple
    }

    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult {
        let ma = match averages.latest(self.window) {
            Ok(ma) => ma,
            Err(shortfall) => return IndicatorResult::unavailable(self.kind(), shortfall),
        };
        let close = averages.latest_close().unwrap_or(ma);
        let multiple = close / ma;

        IndicatorResult::available(self.kind(), multiple, self.classify(multiple))
            .with_aux("baseline", ma)
            .with_aux("historical_mean", self.historical_mean)
            .with_aux("window", self.window as f64)
    }
}
