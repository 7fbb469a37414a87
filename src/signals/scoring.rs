//! Signed strength of each indicator state
//!
//! Every state maps to a fixed point on a -1 (deep bottom) to +1 (cycle top)
//! scale so indicators with different vocabularies can be averaged.

use crate::indicators::cycle::{GoldenRatioState, PiCycleState, TwoYearMaState};
use crate::indicators::momentum::RsiState;
use crate::indicators::sentiment::FearGreedState;
use crate::indicators::valuation::{MayerState, RainbowBand};
use crate::models::indicators::{IndicatorResult, SignalState};

/// Strength of a single state in [-1, +1]. Positive leans toward a top.
pub fn state_strength(state: SignalState) -> f64 {
    match state {
        SignalState::PiCycle(s) => match s {
            PiCycleState::Safe => 0.0,
            PiCycleState::Warning => 0.5,
            PiCycleState::ExtremeTop => 1.0,
        },
        SignalState::TwoYearMa(s) => match s {
            TwoYearMaState::Bottom => -1.0,
            TwoYearMaState::Neutral => 0.0,
            TwoYearMaState::Bullish => 0.5,
            TwoYearMaState::ExtremeTop => 1.0,
        },
        SignalState::Rsi(s) => match s {
            RsiState::Oversold => -1.0,
            RsiState::Neutral => 0.0,
            RsiState::Overbought => 1.0,
        },
        SignalState::Rainbow(band) => rainbow_strength(band),
        SignalState::MayerMultiple(s) => match s {
            MayerState::Undervalued => -1.0,
            MayerState::Normal => 0.0,
            MayerState::Overvalued => 1.0,
        },
        SignalState::GoldenRatio(s) => match s {
            GoldenRatioState::Safe => 0.0,
            GoldenRatioState::Warning => 0.2,
            GoldenRatioState::ElevatedWarning => 0.4,
            GoldenRatioState::Top => 0.6,
            GoldenRatioState::MajorTop => 0.8,
            GoldenRatioState::ExtremeTop => 1.0,
        },
        SignalState::FearGreed(s) => match s {
            FearGreedState::ExtremeFear => -1.0,
            FearGreedState::Fear => -0.5,
            FearGreedState::Neutral => 0.0,
            FearGreedState::Greed => 0.5,
            FearGreedState::ExtremeGreed => 1.0,
        },
    }
}

/// Bands are evenly spaced from -1 (fire sale) through 0 (hold) to +1.
fn rainbow_strength(band: RainbowBand) -> f64 {
    match band {
        RainbowBand::FireSale => -1.0,
        RainbowBand::Buy => -0.75,
        RainbowBand::Accumulate => -0.5,
        RainbowBand::StillCheap => -0.25,
        RainbowBand::Hold => 0.0,
        RainbowBand::IsThisABubble => 0.25,
        RainbowBand::FomoIntensifies => 0.5,
        RainbowBand::SellSeriously => 0.75,
        RainbowBand::MaximumBubble => 1.0,
    }
}

/// Strength of a result, absent when the indicator is unavailable.
pub fn result_strength(result: &IndicatorResult) -> Option<f64> {
    result.state().map(state_strength)
}

/// Mean strength over the available results only. Unavailable results are
/// skipped rather than counted as zero; `None` when nothing is available.
pub fn composite_score<'a>(results: impl IntoIterator<Item = &'a IndicatorResult>) -> Option<f64> {
    let strengths: Vec<f64> = results.into_iter().filter_map(result_strength).collect();
    crate::common::math::mean(&strengths)
}
