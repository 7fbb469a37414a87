//! Recent price action for an asset, read straight off its series.

use crate::common::math::pct_distance;
use crate::models::series::{DailyBar, PriceSeries};
use chrono::NaiveDate;
use serde::Serialize;

/// Price and volume summary shown next to an analysis.
///
/// Changes are measured against the close that many observations back and
/// are absent when the series is too short. High and low span the whole
/// series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub price: f64,
    pub change_24h_pct: Option<f64>,
    pub change_7d_pct: Option<f64>,
    pub change_30d_pct: Option<f64>,
    pub volume_24h: f64,
    pub high: f64,
    pub high_date: NaiveDate,
    pub low: f64,
    pub low_date: NaiveDate,
}

impl MarketSnapshot {
    /// `None` for an empty series.
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let bars = series.bars();
        let last = bars.last()?;

        // earliest bar wins on ties
        let high = bars.iter().fold(last, |best, bar| {
            if bar.high > best.high || (bar.high == best.high && bar.date < best.date) {
                bar
            } else {
                best
            }
        });
        let low = bars.iter().fold(last, |best, bar| {
            if bar.low < best.low || (bar.low == best.low && bar.date < best.date) {
                bar
            } else {
                best
            }
        });

        Some(Self {
            price: last.close,
            change_24h_pct: change_over(bars, 1),
            change_7d_pct: change_over(bars, 7),
            change_30d_pct: change_over(bars, 30),
            volume_24h: last.volume,
            high: high.high,
            high_date: high.date,
            low: low.low,
            low_date: low.date,
        })
    }
}

fn change_over(bars: &[DailyBar], observations: usize) -> Option<f64> {
    let last = bars.last()?;
    let index = bars.len().checked_sub(observations + 1)?;
    Some(pct_distance(last.close, bars[index].close))
}
