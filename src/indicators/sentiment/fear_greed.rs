//! Fear & Greed Index classification.
//!
//! The score is supplied from outside the price series, so this indicator
//! does not go through the registry.

use crate::config::FearGreedConfig;
use crate::error::ConfigError;
use crate::indicators::registry::IndicatorKind;
use crate::models::indicators::{IndicatorResult, UnavailableReason};
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u16 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FearGreedState {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl FearGreedState {
    pub const ALL: [FearGreedState; 5] = [
        FearGreedState::ExtremeFear,
        FearGreedState::Fear,
        FearGreedState::Neutral,
        FearGreedState::Greed,
        FearGreedState::ExtremeGreed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FearGreedState::ExtremeFear => "EXTREME_FEAR",
            FearGreedState::Fear => "FEAR",
            FearGreedState::Neutral => "NEUTRAL",
            FearGreedState::Greed => "GREED",
            FearGreedState::ExtremeGreed => "EXTREME_GREED",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FearGreed {
    table: ThresholdTable<FearGreedState>,
}

impl FearGreed {
    pub fn new(config: &FearGreedConfig) -> Result<Self, ConfigError> {
        let table = ThresholdTable::from_lower_bounds(
            "fear_greed",
            &[
                config.fear_from,
                config.neutral_from,
                config.greed_from,
                config.extreme_greed_from,
            ],
            &FearGreedState::ALL,
        )?;
        Ok(Self { table })
    }

    pub fn classify(&self, score: u16) -> FearGreedState {
        self.table.classify(f64::from(score))
    }

    pub fn evaluate(&self, score: Option<u16>) -> IndicatorResult {
        let kind = IndicatorKind::FearGreed;
        match score {
            None => IndicatorResult::unavailable(kind, UnavailableReason::MissingSentimentScore),
            Some(score) if score > MAX_SCORE => {
                IndicatorResult::unavailable(kind, UnavailableReason::InvalidSentimentScore { score })
            }
            Some(score) => IndicatorResult::available(kind, f64::from(score), self.classify(score)),
        }
    }
}
