//! Unit tests for signed strengths and the composite score

use cyclescope::indicators::cycle::PiCycleState;
use cyclescope::indicators::momentum::RsiState;
use cyclescope::indicators::valuation::RainbowBand;
use cyclescope::indicators::IndicatorKind;
use cyclescope::models::{IndicatorResult, InsufficientHistory, SignalState};
use cyclescope::signals::{composite_score, state_strength};

#[test]
fn unavailable_indicator_is_excluded_not_zeroed() {
    let results = vec![
        IndicatorResult::available(IndicatorKind::Rsi, 82.0, RsiState::Overbought),
        IndicatorResult::unavailable(
            IndicatorKind::MayerMultiple,
            InsufficientHistory::moving_average(200, 200, 120),
        ),
    ];
    assert_eq!(composite_score(&results), Some(1.0));
}

#[test]
fn composite_is_mean_of_available_strengths() {
    let results = vec![
        IndicatorResult::available(IndicatorKind::Rsi, 20.0, RsiState::Oversold),
        IndicatorResult::available(IndicatorKind::PiCycle, 0.97, PiCycleState::Warning),
    ];
    assert_eq!(composite_score(&results), Some(-0.25));
}

#[test]
fn every_state_strength_is_bounded() {
    for state in SignalState::all() {
        let strength = state_strength(state);
        assert!((-1.0..=1.0).contains(&strength), "{} -> {}", state, strength);
    }
}

#[test]
fn rainbow_extremes_are_full_strength() {
    assert_eq!(state_strength(RainbowBand::FireSale.into()), -1.0);
    assert_eq!(state_strength(RainbowBand::MaximumBubble.into()), 1.0);
    assert_eq!(state_strength(PiCycleState::ExtremeTop.into()), 1.0);
}
