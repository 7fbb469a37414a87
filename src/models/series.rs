//! Daily price history handed to the engine by the data collaborators.

use crate::error::SeriesError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
}

impl DailyBar {
    pub fn new(date: NaiveDate, close: f64, high: f64, low: f64, volume: f64) -> Self {
        Self {
            date,
            close,
            high,
            low,
            volume,
        }
    }

    /// Bar for sources that only publish a closing price.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self::new(date, close, close, close, 0.0)
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    fn validate(&self) -> Result<(), SeriesError> {
        let fields = [
            ("close", self.close),
            ("high", self.high),
            ("low", self.low),
            ("volume", self.volume),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SeriesError::NonFinite {
                    date: self.date,
                    field,
                });
            }
        }
        if self.close <= 0.0 {
            return Err(SeriesError::NonPositive {
                date: self.date,
                field: "close",
                value: self.close,
            });
        }
        Ok(())
    }
}

/// Validated, strictly chronological daily history for one asset.
///
/// Construction is the only place bars are checked; once built the series is
/// immutable and every indicator can trust it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<DailyBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<DailyBar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            bar.validate()?;
            if index > 0 {
                let previous = bars[index - 1].date;
                if bar.date == previous {
                    return Err(SeriesError::DuplicateDate {
                        date: bar.date,
                        index,
                    });
                }
                if bar.date < previous {
                    return Err(SeriesError::NonChronological {
                        previous,
                        date: bar.date,
                        index,
                    });
                }
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// A series with no observations, used when a fetch failed.
    pub fn empty(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: Vec::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&DailyBar> {
        self.bars.last()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.last().map(|b| b.close)
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.last().map(|b| b.date)
    }
}
