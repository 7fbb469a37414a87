//! Pi Cycle Top indicator
//!
//! Compares the 111-day average with twice the 350-day average. A cross of
//! the fast line up through the scaled slow line has historically lined up
//! with cycle peaks, so the signal is edge-triggered: once a cross happens
//! it is remembered for the configured lookback.

use crate::common::math;
use crate::config::PiCycleConfig;
use crate::error::ConfigError;
use crate::indicators::moving_average::{MovingAverage, MovingAverageEngine};
use crate::indicators::registry::{Indicator, IndicatorKind};
use crate::models::indicators::{IndicatorResult, InsufficientHistory};
use crate::signals::classifier::ThresholdTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiCycleState {
    Safe,
    Warning,
    ExtremeTop,
}

impl PiCycleState {
    pub const ALL: [PiCycleState; 3] = [
        PiCycleState::Safe,
        PiCycleState::Warning,
        PiCycleState::ExtremeTop,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PiCycleState::Safe => "SAFE",
            PiCycleState::Warning => "WARNING",
            PiCycleState::ExtremeTop => "EXTREME_TOP",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PiCycle {
    config: PiCycleConfig,
    proximity: ThresholdTable<PiCycleState>,
}

impl PiCycle {
    pub fn new(config: &PiCycleConfig) -> Result<Self, ConfigError> {
        if config.fast_window == 0 || config.slow_window == 0 {
            return Err(ConfigError::ZeroWindow {
                indicator: "pi_cycle",
            });
        }
        let proximity = ThresholdTable::new(
            "pi_cycle",
            [
                (config.warning_ratio, PiCycleState::Safe),
                (1.0, PiCycleState::Warning),
                (f64::INFINITY, PiCycleState::Safe),
            ],
        )?;

        Ok(Self {
            config: config.clone(),
            proximity,
        })
    }

    /// Observations needed for both averages plus a full lookback.
    pub fn required_history(&self) -> usize {
        self.config.slow_window.max(self.config.fast_window) + self.config.lookback_days
    }

    /// Ratio of the fast average to the scaled slow one, classified without
    /// regard to crossing history.
    pub fn classify_ratio(&self, ratio: f64) -> PiCycleState {
        self.proximity.classify(ratio)
    }
}

/// Index of the most recent observation inside the trailing `lookback` at
/// which `fast` moved from strictly below `slow * multiplier` to at or
/// above it.
pub fn find_last_cross(
    fast: &MovingAverage,
    slow: &MovingAverage,
    multiplier: f64,
    len: usize,
    lookback: usize,
) -> Option<usize> {
    let start = len.saturating_sub(lookback).max(1);
    (start..len).rev().find(|&i| {
        match (fast.at(i - 1), slow.at(i - 1), fast.at(i), slow.at(i)) {
            (Some(prev_fast), Some(prev_slow), Some(fast_now), Some(slow_now)) => {
                prev_fast < prev_slow * multiplier && fast_now >= slow_now * multiplier
            }
            _ => false,
        }
    })
}

impl Indicator for PiCycle {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::PiCycle
    }

    fn evaluate(&self, averages: &MovingAverageEngine<'_>) -> IndicatorResult {
        let required = self.required_history();
        let slow = match averages.require(self.config.slow_window, required) {
            Ok(slow) => slow,
            Err(shortfall) => return IndicatorResult::unavailable(self.kind(), shortfall),
        };
        let fast = averages.average(self.config.fast_window);

        let (fast_now, slow_now) = match (fast.latest(), slow.latest()) {
            (Some(f), Some(s)) => (f, s * self.config.slow_multiplier),
            _ => {
                return IndicatorResult::unavailable(
                    self.kind(),
                    InsufficientHistory::moving_average(
                        self.config.slow_window,
                        required,
                        averages.len(),
                    ),
                )
            }
        };

        let ratio = fast_now / slow_now;
        let cross = find_last_cross(
            &fast,
            &slow,
            self.config.slow_multiplier,
            averages.len(),
            self.config.lookback_days,
        );
        let state = match cross {
            Some(_) => PiCycleState::ExtremeTop,
            None => self.classify_ratio(ratio),
        };

        let mut result = IndicatorResult::available(self.kind(), ratio, state)
            .with_aux("fast_ma", fast_now)
            .with_aux("slow_ma_scaled", slow_now)
            .with_aux("distance_pct", math::pct_distance(fast_now, slow_now))
            .with_aux("fast_window", self.config.fast_window as f64)
            .with_aux("slow_window", self.config.slow_window as f64);
        if let Some(index) = cross {
            result = result.with_aux("days_since_cross", (averages.len() - 1 - index) as f64);
        }
        result
    }
}
