//! Unit tests for the Mayer Multiple and the Rainbow bands

use crate::fixtures::{flat, series};
use cyclescope::config::{MayerConfig, RainbowConfig};
use cyclescope::indicators::valuation::{MayerMultiple, MayerState, Rainbow, RainbowBand};
use cyclescope::indicators::{Indicator, MovingAverageEngine};
use cyclescope::models::SignalState;

#[test]
fn flat_200_days_is_multiple_one_and_normal() {
    let series = series("BTC", &flat(200, 100.0));
    let averages = MovingAverageEngine::new(&series);
    let mayer = MayerMultiple::new(&MayerConfig::default()).unwrap();

    let result = mayer.evaluate(&averages);
    assert_eq!(result.value(), Some(1.0));
    assert_eq!(
        result.state(),
        Some(SignalState::MayerMultiple(MayerState::Normal))
    );
    assert_eq!(result.aux("baseline"), Some(100.0));
}

#[test]
fn mayer_needs_a_full_window() {
    let series = series("BTC", &flat(199, 100.0));
    let averages = MovingAverageEngine::new(&series);
    let mayer = MayerMultiple::new(&MayerConfig::default()).unwrap();
    assert!(!mayer.evaluate(&averages).is_available());
}

#[test]
fn rainbow_band_never_decreases_as_price_rises() {
    let rainbow = Rainbow::new(&RainbowConfig::default()).unwrap();
    let mut previous = RainbowBand::FireSale;
    for step in 1..=400 {
        let ratio = step as f64 * 0.01;
        let band = rainbow.band_for(ratio);
        assert!(band >= previous, "band fell at ratio {}", ratio);
        previous = band;
    }
    assert_eq!(previous, RainbowBand::MaximumBubble);
}

#[test]
fn rainbow_reports_every_band_edge() {
    let series = series("ETH", &flat(250, 2000.0));
    let averages = MovingAverageEngine::new(&series);
    let rainbow = Rainbow::new(&RainbowConfig::default()).unwrap();

    let result = rainbow.evaluate(&averages);
    assert_eq!(result.state(), Some(SignalState::Rainbow(RainbowBand::Hold)));
    assert_eq!(result.aux("baseline"), Some(2000.0));
    let edges = result
        .auxiliary
        .keys()
        .filter(|key| key.starts_with("upper_"))
        .count();
    assert_eq!(edges, 8);
}
