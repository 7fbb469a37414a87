//! Unit tests for the long-horizon cycle indicators

use crate::fixtures::{flat, series};
use cyclescope::config::{GoldenRatioConfig, PiCycleConfig, TwoYearMaConfig};
use cyclescope::indicators::cycle::{
    GoldenRatio, GoldenRatioState, PiCycle, PiCycleState, TwoYearMa, TwoYearMaState,
};
use cyclescope::indicators::{Indicator, MovingAverageEngine};
use cyclescope::models::{SignalState, UnavailableReason};

#[test]
fn pi_cycle_needs_slow_window_plus_lookback() {
    let pi = PiCycle::new(&PiCycleConfig::default()).unwrap();
    assert_eq!(pi.required_history(), 715);

    let short = series("BTC", &flat(714, 100.0));
    let result = pi.evaluate(&MovingAverageEngine::new(&short));
    match result.unavailable_reason() {
        Some(UnavailableReason::InsufficientHistory(shortfall)) => {
            assert_eq!(shortfall.required, 715);
            assert_eq!(shortfall.available, 714);
        }
        other => panic!("expected insufficient history, got {:?}", other),
    }

    let enough = series("BTC", &flat(715, 100.0));
    let result = pi.evaluate(&MovingAverageEngine::new(&enough));
    assert_eq!(result.value(), Some(0.5));
    assert_eq!(result.state(), Some(SignalState::PiCycle(PiCycleState::Safe)));
    assert!(result.aux("days_since_cross").is_none());
}

#[test]
fn pi_cycle_proximity_without_cross() {
    let pi = PiCycle::new(&PiCycleConfig::default()).unwrap();
    assert_eq!(pi.classify_ratio(0.94), PiCycleState::Safe);
    assert_eq!(pi.classify_ratio(0.95), PiCycleState::Warning);
    assert_eq!(pi.classify_ratio(0.999), PiCycleState::Warning);
    // above the line with no recent cross
    assert_eq!(pi.classify_ratio(1.0), PiCycleState::Safe);
}

#[test]
fn pi_cycle_recent_cross_is_extreme_top() {
    let config = PiCycleConfig {
        fast_window: 2,
        slow_window: 4,
        slow_multiplier: 1.0,
        lookback_days: 3,
        warning_ratio: 0.95,
    };
    let pi = PiCycle::new(&config).unwrap();
    let series = series("BTC", &[10.0, 10.0, 10.0, 10.0, 8.0, 20.0, 20.0]);

    let result = pi.evaluate(&MovingAverageEngine::new(&series));
    assert_eq!(
        result.state(),
        Some(SignalState::PiCycle(PiCycleState::ExtremeTop))
    );
    assert_eq!(result.aux("days_since_cross"), Some(1.0));
}

#[test]
fn two_year_multiplier_on_flat_history() {
    let ma = TwoYearMa::new(&TwoYearMaConfig::default()).unwrap();

    let short = series("BTC", &flat(729, 100.0));
    assert!(!ma.evaluate(&MovingAverageEngine::new(&short)).is_available());

    let full = series("BTC", &flat(730, 100.0));
    let result = ma.evaluate(&MovingAverageEngine::new(&full));
    assert_eq!(result.value(), Some(1.0));
    assert_eq!(
        result.state(),
        Some(SignalState::TwoYearMa(TwoYearMaState::Neutral))
    );
}

#[test]
fn two_year_multiplier_edges() {
    let ma = TwoYearMa::new(&TwoYearMaConfig::default()).unwrap();
    assert_eq!(ma.classify(0.99), TwoYearMaState::Bottom);
    assert_eq!(ma.classify(2.0), TwoYearMaState::Bullish);
    assert_eq!(ma.classify(5.0), TwoYearMaState::ExtremeTop);
}

#[test]
fn golden_ratio_levels_scale_the_baseline() {
    let golden = GoldenRatio::new(&GoldenRatioConfig::default()).unwrap();
    let series = series("BTC", &flat(350, 100.0));

    let result = golden.evaluate(&MovingAverageEngine::new(&series));
    assert_eq!(
        result.state(),
        Some(SignalState::GoldenRatio(GoldenRatioState::Safe))
    );
    assert_eq!(result.aux("baseline"), Some(100.0));
    let level = result.aux("level_1_618").unwrap();
    assert!((level - 161.8).abs() < 1e-9);
    assert_eq!(result.aux("level_2"), Some(200.0));
}

#[test]
fn golden_ratio_grades_each_level() {
    let golden = GoldenRatio::new(&GoldenRatioConfig::default()).unwrap();
    assert_eq!(golden.classify(1.617), GoldenRatioState::Safe);
    assert_eq!(golden.classify(1.618), GoldenRatioState::Warning);
    assert_eq!(golden.classify(2.0), GoldenRatioState::ElevatedWarning);
    assert_eq!(golden.classify(2.618), GoldenRatioState::Top);
    assert_eq!(golden.classify(3.0), GoldenRatioState::MajorTop);
    assert_eq!(golden.classify(3.618), GoldenRatioState::ExtremeTop);
}

#[test]
fn golden_ratio_state_never_decreases_as_price_rises() {
    let golden = GoldenRatio::new(&GoldenRatioConfig::default()).unwrap();
    let mut previous = GoldenRatioState::Safe;
    for step in 1..=500 {
        let ratio = step as f64 * 0.01;
        let state = golden.classify(ratio);
        assert!(state >= previous, "state fell at ratio {}", ratio);
        previous = state;
    }
    assert_eq!(previous, GoldenRatioState::ExtremeTop);
}
