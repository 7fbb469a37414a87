//! Unit tests for the analysis engine

use crate::fixtures::{bars_from_closes, choppy, flat, growth, series, start_date};
use cyclescope::config::{EngineConfig, MayerConfig};
use cyclescope::error::AnalysisError;
use cyclescope::indicators::sentiment::FearGreedState;
use cyclescope::indicators::IndicatorKind;
use cyclescope::models::{OverallAssessment, SignalState};
use cyclescope::signals::{composite_score, AnalysisEngine};

fn engine() -> AnalysisEngine {
    AnalysisEngine::new(EngineConfig::default()).expect("default config is valid")
}

#[test]
fn long_history_makes_every_indicator_available() {
    let report = engine()
        .analyze("BTC", bars_from_closes(&growth(1100, 100.0, 0.002)), Some(80))
        .unwrap();

    assert_eq!(report.symbol, "BTC");
    assert_eq!(report.observations, 1100);
    assert!(report.all_indicators().all(|r| r.is_available()));
    assert_eq!(report.confluence.available, 7);
    assert_eq!(
        report.fear_greed.state(),
        Some(SignalState::FearGreed(FearGreedState::ExtremeGreed))
    );
}

#[test]
fn indicators_come_in_registry_order() {
    let report = engine().analyze_series(&series("ETH", &choppy(800)), None);
    let kinds: Vec<IndicatorKind> = report.indicators.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            IndicatorKind::PiCycle,
            IndicatorKind::TwoYearMa,
            IndicatorKind::Rsi,
            IndicatorKind::Rainbow,
            IndicatorKind::MayerMultiple,
            IndicatorKind::GoldenRatio,
        ]
    );
    assert_eq!(report.fear_greed.kind, IndicatorKind::FearGreed);
}

#[test]
fn report_composite_matches_indicator_strengths() {
    let report = engine().analyze_series(&series("SOL", &choppy(900)), Some(30));
    assert_eq!(report.composite_score(), composite_score(report.all_indicators()));
    assert!(report.composite_score().is_some());
}

#[test]
fn same_series_same_report() {
    let engine = engine();
    let series = series("BTC", &choppy(760));
    assert_eq!(engine.analyze_series(&series, Some(50)), engine.analyze_series(&series, Some(50)));
}

#[test]
fn flat_market_has_no_confluence() {
    let report = engine().analyze_series(&series("BTC", &flat(800, 100.0)), Some(50));
    // a loss-free window reads RSI 100, the only leaning indicator
    assert_eq!(report.confluence.top_leaning, 1);
    assert_eq!(report.confluence.bottom_leaning, 0);
    assert!(!report.confluence.confluent);
    assert_eq!(report.confluence.assessment, OverallAssessment::Mixed);
    let composite = report.composite_score().unwrap();
    assert!((composite - 1.0 / 7.0).abs() < 1e-12);
}

#[test]
fn unsorted_bars_are_rejected() {
    let mut bars = bars_from_closes(&flat(5, 1.0));
    bars.swap(1, 3);
    let err = engine().analyze("BTC", bars, None).unwrap_err();
    assert!(matches!(err, AnalysisError::MalformedSeries { .. }));
}

#[test]
fn custom_windows_flow_into_readings_and_text() {
    let config = EngineConfig {
        mayer: MayerConfig {
            window: 50,
            ..MayerConfig::default()
        },
        ..EngineConfig::default()
    };
    let engine = AnalysisEngine::new(config).unwrap();
    let report = engine.analyze_series(&series("BTC", &flat(60, 100.0)), None);

    let mayer = report.indicator(IndicatorKind::MayerMultiple).unwrap();
    assert!(mayer.is_available());
    assert_eq!(mayer.aux("baseline"), Some(100.0));
    assert_eq!(mayer.aux("window"), Some(50.0));
    let text = mayer.interpretation.as_ref().unwrap();
    assert!(text.explanation.contains("50-day average"));
}

#[test]
fn report_carries_a_market_snapshot() {
    let report = engine().analyze_series(&series("ETH", &growth(40, 100.0, 0.01)), None);
    let market = report.market.as_ref().expect("snapshot for a non-empty series");
    assert_eq!(Some(market.price), report.latest_close);
    assert!(market.change_24h_pct.unwrap() > 0.0);
    assert!(market.change_30d_pct.unwrap() > market.change_7d_pct.unwrap());
    assert_eq!(market.low_date, start_date());

    let empty = engine().analyze_series(&series("SOL", &[]), None);
    assert!(empty.market.is_none());
}

