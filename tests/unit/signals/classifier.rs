//! Unit tests for threshold tables and boundary handling

use cyclescope::config::{FearGreedConfig, MayerConfig};
use cyclescope::error::ConfigError;
use cyclescope::indicators::sentiment::{FearGreed, FearGreedState};
use cyclescope::indicators::valuation::{MayerMultiple, MayerState};
use cyclescope::signals::ThresholdTable;

#[test]
fn boundary_values_classify_the_same_every_time() {
    let mayer = MayerMultiple::new(&MayerConfig::default()).unwrap();
    for _ in 0..10 {
        assert_eq!(mayer.classify(0.8), MayerState::Normal);
        assert_eq!(mayer.classify(2.4), MayerState::Overvalued);
    }
    assert_eq!(mayer.classify(0.7999), MayerState::Undervalued);
    assert_eq!(mayer.classify(2.3999), MayerState::Normal);
}

#[test]
fn sentiment_edges_belong_to_the_higher_band() {
    let fg = FearGreed::new(&FearGreedConfig::default()).unwrap();
    assert_eq!(fg.classify(24), FearGreedState::ExtremeFear);
    assert_eq!(fg.classify(25), FearGreedState::Fear);
    assert_eq!(fg.classify(44), FearGreedState::Fear);
    assert_eq!(fg.classify(45), FearGreedState::Neutral);
    assert_eq!(fg.classify(54), FearGreedState::Neutral);
    assert_eq!(fg.classify(55), FearGreedState::Greed);
    assert_eq!(fg.classify(74), FearGreedState::Greed);
    assert_eq!(fg.classify(75), FearGreedState::ExtremeGreed);
}

#[test]
fn values_above_every_bound_take_the_last_state() {
    let table = ThresholdTable::new("test", [(1.0, 'a'), (2.0, 'b')]).unwrap();
    assert_eq!(table.classify(f64::MAX), 'b');
    assert_eq!(table.classify_indexed(-5.0), (0, 'a'));
}

#[test]
fn unordered_thresholds_are_rejected() {
    let result = ThresholdTable::from_lower_bounds("test", &[2.0, 1.0], &['a', 'b', 'c']);
    assert!(matches!(
        result,
        Err(ConfigError::NonIncreasingThresholds { indicator: "test" })
    ));

    let mut config = MayerConfig::default();
    config.overvalued_from = config.normal_from;
    assert!(MayerMultiple::new(&config).is_err());
}
