//! Shared series builders for unit tests

use chrono::{Duration, NaiveDate};
use cyclescope::models::{DailyBar, PriceSeries};

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

pub fn bars_from_closes(closes: &[f64]) -> Vec<DailyBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| DailyBar::from_close(start_date() + Duration::days(i as i64), *close))
        .collect()
}

pub fn series(symbol: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(symbol, bars_from_closes(closes)).expect("valid test series")
}

pub fn flat(len: usize, price: f64) -> Vec<f64> {
    vec![price; len]
}

/// Steady compounding uptrend.
pub fn growth(len: usize, start: f64, daily_rate: f64) -> Vec<f64> {
    (0..len)
        .map(|i| start * (1.0 + daily_rate).powi(i as i32))
        .collect()
}

/// Deterministic choppy walk that stays positive.
pub fn choppy(len: usize) -> Vec<f64> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            100.0 + 10.0 * (t * 0.7).sin() + 4.0 * (t * 1.9).cos() + 0.05 * t
        })
        .collect()
}

use cyclescope::config::ComparisonConfig;
use cyclescope::indicators::IndicatorKind;
use cyclescope::models::{AnalysisReport, IndicatorResult, UnavailableReason};
use cyclescope::signals::summarize;

/// Report assembled from hand-picked indicator results, Fear & Greed absent.
pub fn report(symbol: &str, as_of_day: Option<i64>, indicators: Vec<IndicatorResult>) -> AnalysisReport {
    let fear_greed = IndicatorResult::unavailable(
        IndicatorKind::FearGreed,
        UnavailableReason::MissingSentimentScore,
    );
    let confluence = summarize(
        indicators.iter().chain(std::iter::once(&fear_greed)),
        ComparisonConfig::default().min_agreeing,
    );
    AnalysisReport {
        symbol: symbol.to_string(),
        as_of: as_of_day.map(|d| start_date() + Duration::days(d)),
        latest_close: Some(100.0),
        market: None,
        observations: indicators.len(),
        indicators,
        fear_greed,
        confluence,
    }
}
