//! Simple moving averages over a [`PriceSeries`].

use crate::common::math;
use crate::models::indicators::InsufficientHistory;
use crate::models::series::PriceSeries;
use chrono::NaiveDate;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Trailing mean of closes for one window, aligned to the series dates.
/// Dates without a full window behind them are omitted, not zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverage {
    pub window: usize,
    pub points: Vec<MaPoint>,
}

impl MovingAverage {
    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|p| p.value)
    }

    /// Value at a position of the underlying series.
    pub fn at(&self, series_index: usize) -> Option<f64> {
        if self.window == 0 || series_index + 1 < self.window {
            return None;
        }
        self.points
            .get(series_index + 1 - self.window)
            .map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Simple moving average of `close` for every date with a full window.
pub fn moving_average(series: &PriceSeries, window: usize) -> MovingAverage {
    let values = math::rolling_mean(&series.closes(), window);
    let points = series
        .bars()
        .iter()
        .skip(window.saturating_sub(1))
        .zip(values)
        .map(|(bar, value)| MaPoint {
            date: bar.date,
            value,
        })
        .collect();

    MovingAverage { window, points }
}

/// Latest moving average value, or the shortfall when the series is too short.
pub fn latest(series: &PriceSeries, window: usize) -> Result<f64, InsufficientHistory> {
    if window == 0 || series.len() < window {
        return Err(InsufficientHistory::moving_average(window, window, series.len()));
    }
    math::sma(&series.closes(), window)
        .ok_or_else(|| InsufficientHistory::moving_average(window, window, series.len()))
}

/// Per-run view over one series that computes each window at most once.
///
/// Lives for a single analysis and is never shared between threads.
pub struct MovingAverageEngine<'a> {
    series: &'a PriceSeries,
    closes: Vec<f64>,
    cache: RefCell<HashMap<usize, Rc<MovingAverage>>>,
}

impl<'a> MovingAverageEngine<'a> {
    pub fn new(series: &'a PriceSeries) -> Self {
        Self {
            series,
            closes: series.closes(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn series(&self) -> &'a PriceSeries {
        self.series
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }

    pub fn average(&self, window: usize) -> Rc<MovingAverage> {
        if let Some(cached) = self.cache.borrow().get(&window) {
            return Rc::clone(cached);
        }
        let computed = Rc::new(moving_average(self.series, window));
        self.cache
            .borrow_mut()
            .insert(window, Rc::clone(&computed));
        computed
    }

    /// The average for `window`, provided the series has at least
    /// `required` observations (which may exceed the window when a
    /// lookback is also needed).
    pub fn require(
        &self,
        window: usize,
        required: usize,
    ) -> Result<Rc<MovingAverage>, InsufficientHistory> {
        let required = required.max(window);
        if window == 0 || self.len() < required {
            return Err(InsufficientHistory::moving_average(
                window,
                required,
                self.len(),
            ));
        }
        Ok(self.average(window))
    }

    pub fn latest(&self, window: usize) -> Result<f64, InsufficientHistory> {
        let average = self.require(window, window)?;
        average
            .latest()
            .ok_or_else(|| InsufficientHistory::moving_average(window, window, self.len()))
    }

    pub fn cached_windows(&self) -> usize {
        self.cache.borrow().len()
    }
}
