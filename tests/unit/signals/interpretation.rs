//! Unit tests for interpretation text

use cyclescope::indicators::momentum::RsiState;
use cyclescope::indicators::IndicatorKind;
use cyclescope::models::{IndicatorResult, InsufficientHistory, SignalState};
use cyclescope::signals::{interpret, interpret_result};
use std::collections::BTreeMap;

#[test]
fn identical_inputs_render_identical_text() {
    let mut aux = BTreeMap::new();
    aux.insert("distance_pct".to_string(), -3.25);
    for state in SignalState::all() {
        let first = interpret(state, 1.2345, &aux);
        let second = interpret(state, 1.2345, &aux);
        assert_eq!(first, second, "{}", state);
    }
}

#[test]
fn every_state_has_complete_text() {
    for state in SignalState::all() {
        let text = interpret(state, 1.0, &BTreeMap::new());
        assert!(!text.headline.is_empty(), "{}", state);
        assert!(!text.explanation.is_empty(), "{}", state);
        assert!(!text.historical_note.is_empty(), "{}", state);
        assert!(!text.suggested_action.is_empty(), "{}", state);
    }
}

#[test]
fn different_states_of_one_indicator_read_differently() {
    let oversold = interpret(RsiState::Oversold.into(), 25.0, &BTreeMap::new());
    let overbought = interpret(RsiState::Overbought.into(), 25.0, &BTreeMap::new());
    assert_ne!(oversold.headline, overbought.headline);
}

#[test]
fn unavailable_result_explains_the_shortfall() {
    let result = IndicatorResult::unavailable(
        IndicatorKind::TwoYearMa,
        InsufficientHistory::moving_average(730, 730, 400),
    );
    let text = interpret_result(&result);
    assert!(text.explanation.contains("730"));
    assert_eq!(text, interpret_result(&result));
}
