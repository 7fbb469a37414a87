//! Rainbow position
//!
//! Nine colour bands stacked on a baseline average. The first eight are
//! capped at a multiple of the baseline; the ninth has no ceiling.

use crate::config::RainbowConfig;
use crate::error::ConfigError;
use crate::indicators::moving_average::MovingAverageEngine;
use crate::indicators::registry::{Indicator, IndicatorKind};
use crate::models::indicators::IndicatorResult;
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RainbowBand {
    FireSale,
    Buy,
    Accumulate,
    StillCheap,
    Hold,
    IsThisABubble,
    FomoIntensifies,
    SellSeriously,
    MaximumBubble,
}

impl RainbowBand {
    pub const ALL: [RainbowBand; 9] = [
        RainbowBand::FireSale,
        RainbowBand::Buy,
        RainbowBand::Accumulate,
        RainbowBand::StillCheap,
        RainbowBand::Hold,
        RainbowBand::IsThisABubble,
        RainbowBand::FomoIntensifies,
        RainbowBand::SellSeriously,
        RainbowBand::MaximumBubble,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RainbowBand::FireSale => "FIRE_SALE",
            RainbowBand::Buy => "BUY",
            RainbowBand::Accumulate => "ACCUMULATE",
            RainbowBand::StillCheap => "STILL_CHEAP",
            RainbowBand::Hold => "HOLD",
            RainbowBand::IsThisABubble => "IS_THIS_A_BUBBLE",
            RainbowBand::FomoIntensifies => "FOMO_INTENSIFIES",
            RainbowBand::SellSeriously => "SELL_SERIOUSLY",
            RainbowBand::MaximumBubble => "MAXIMUM_BUBBLE",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

#[derive(Debug, Clone)]
pub struct Rainbow {
    window: usize,
    multipliers: [f64; 8],
    table: ThresholdTable<RainbowBand>,
}

impl Rainbow {
    pub fn new(config: &RainbowConfig) -> Result<Self, ConfigError> {
        if config.window == 0 {
            return Err(ConfigError::ZeroWindow {
                indicator: "rainbow",
            });
        }
        if config.band_multipliers.iter().any(|m| *m <= 0.0) {
            return Err(ConfigError::NonIncreasingThresholds {
                indicator: "rainbow",
            });
        }
        let table = ThresholdTable::from_lower_bounds(
            "rainbow",
            &config.band_multipliers,
            &RainbowBand::ALL,
        )?;
        Ok(Self {
            window: config.window,
            multipliers: config.band_multipliers,
            table,
        })
    }

    /// Band for a price expressed as a multiple of the baseline.
    pub fn band_for(&self, ratio: f64) -> RainbowBand {
        self.table.classify(ratio)
    }
}

impl Indicator for Rainbow {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rainbow
    }

    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult {
        let baseline = match averages.latest(self.window) {
            Ok(baseline) => baseline,
            Err(shortfall) => return IndicatorResult::unavailable(self.kind(), shortfall),
        };
        let close = averages.latest_close().unwrap_or(baseline);
        let ratio = close / baseline;
        let band = self.band_for(ratio);

        let result = IndicatorResult::available(self.kind(), ratio, band)
            .with_aux("baseline", baseline)
            .with_aux("band_index", band.index() as f64)
            .with_aux("window", self.window as f64);

        RainbowBand::ALL
            .iter()
            .zip(self.multipliers.iter())
            .fold(result, |result, (band, multiplier)| {
                result.with_aux(
                    format!("upper_{}", band.label().to_lowercase()),
                    baseline * multiplier,
                )
            })
    }
}
