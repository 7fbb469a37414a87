//! RSI (Relative Strength Index) indicator

use crate::config::RsiConfig;
use crate::error::ConfigError;
use crate::indicators::moving_average::MovingAverageEngine;
use crate::indicators::registry::{Indicator, IndicatorKind};
use crate::models::indicators::{IndicatorResult, InsufficientHistory};
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RsiState {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiState {
    pub const ALL: [RsiState; 3] = [RsiState::Oversold, RsiState::Neutral, RsiState::Overbought];

    pub fn label(&self) -> &'static str {
        match self {
            RsiState::Oversold => "OVERSOLD",
            RsiState::Neutral => "NEUTRAL",
            RsiState::Overbought => "OVERBOUGHT",
        }
    }
}

/// Calculate Wilder's RSI over the whole series
///
/// Average gain and loss are seeded with the simple mean of the first
/// `period` deltas, then smoothed:
/// avg_t = (avg_{t-1} * (period - 1) + x_t) / period
///
/// RSI = 100 - (100 / (1 + avg_gain / avg_loss)), and 100 when avg_loss is 0.
pub fn wilder_rsi(closes: &[f64], period: usize) -> Option<f64> {
    if period == 0 || closes.len() < period + 1 {
        return None;
    }

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let (seed, rest) = deltas.split_at(period);

    let mut avg_gain = seed.iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
    let mut avg_loss = seed.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;

    let smoothing = (period - 1) as f64;
    for delta in rest {
        avg_gain = (avg_gain * smoothing + delta.max(0.0)) / period as f64;
        avg_loss = (avg_loss * smoothing + (-delta).max(0.0)) / period as f64;
    }

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some((100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0))
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    table: ThresholdTable<RsiState>,
}

impl Rsi {
    pub fn new(config: &RsiConfig) -> Result<Self, ConfigError> {
        if config.period == 0 {
            return Err(ConfigError::ZeroWindow { indicator: "rsi" });
        }
        let table = ThresholdTable::from_lower_bounds(
            "rsi",
            &[config.oversold, config.overbought],
            &RsiState::ALL,
        )?;
        Ok(Self {
            period: config.period,
            table,
        })
    }

    pub fn classify(&self, value: f64) -> RsiState {
        self.table.classify(value)
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult {
        match wilder_rsi(averages.closes(), self.period) {
            Some(value) => IndicatorResult::available(self.kind(), value, self.classify(value))
                .with_aux("period", self.period as f64),
            None => IndicatorResult::unavailable(
                self.kind(),
                InsufficientHistory::new(
                    format!("{}-period RSI", self.period),
                    self.period + 1,
                    averages.len(),
                ),
            ),
        }
    }
}
