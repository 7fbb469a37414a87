//! Ordered threshold tables mapping a numeric value to a discrete state.
//!
//! Every band is inclusive of its lower bound and exclusive of its upper
//! bound: a value sitting exactly on a boundary belongs to the higher band.
//! All indicators classify through this one rule.

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Band<S> {
    pub upper: f64,
    pub state: S,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdTable<S> {
    bands: Vec<Band<S>>,
}

impl<S: Copy> ThresholdTable<S> {
    /// Build a table from `(upper_bound, state)` pairs. Bounds must be
    /// strictly increasing; only the last one may be `+inf`. Values above
    /// every bound fall into the last state.
    pub fn new(
        indicator: &'static str,
        bands: impl IntoIterator<Item = (f64, S)>,
    ) -> Result<Self, ConfigError> {
        let bands: Vec<Band<S>> = bands
            .into_iter()
            .map(|(upper, state)| Band { upper, state })
            .collect();

        let last = bands.len().saturating_sub(1);
        let valid_bounds = bands
            .iter()
            .enumerate()
            .all(|(i, b)| b.upper.is_finite() || (i == last && b.upper == f64::INFINITY));
        let increasing = bands.windows(2).all(|w| w[0].upper < w[1].upper);

        if bands.is_empty() || !valid_bounds || !increasing {
            return Err(ConfigError::NonIncreasingThresholds { indicator });
        }
        Ok(Self { bands })
    }

    /// Lower thresholds form the boundaries between consecutive states:
    /// `states[0]` below `thresholds[0]`, `states[i]` in
    /// `[thresholds[i-1], thresholds[i])`, the last state from the last
    /// threshold upward.
    pub fn from_lower_bounds(
        indicator: &'static str,
        thresholds: &[f64],
        states: &[S],
    ) -> Result<Self, ConfigError> {
        if states.len() != thresholds.len() + 1 {
            return Err(ConfigError::NonIncreasingThresholds { indicator });
        }
        let uppers = thresholds.iter().copied().chain(std::iter::once(f64::INFINITY));
        Self::new(indicator, uppers.zip(states.iter().copied()))
    }

    /// State of the first band whose upper bound exceeds `value`, or the
    /// last state when none does.
    pub fn classify(&self, value: f64) -> S {
        self.classify_indexed(value).1
    }

    /// Like [`classify`](Self::classify) but also returns the band index.
    pub fn classify_indexed(&self, value: f64) -> (usize, S) {
        self.bands
            .iter()
            .enumerate()
            .find(|(_, band)| value < band.upper)
            .map(|(i, band)| (i, band.state))
            .unwrap_or_else(|| {
                let last = self.bands.len() - 1;
                (last, self.bands[last].state)
            })
    }

    pub fn bands(&self) -> &[Band<S>] {
        &self.bands
    }
}
