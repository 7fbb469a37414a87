use crate::indicators::cycle::golden_ratio::GoldenRatioState;
use crate::indicators::cycle::pi_cycle::PiCycleState;
use crate::indicators::cycle::two_year_ma::TwoYearMaState;
use crate::indicators::momentum::rsi::RsiState;
use crate::indicators::registry::IndicatorKind;
use crate::indicators::sentiment::fear_greed::FearGreedState;
use crate::indicators::valuation::mayer::MayerState;
use crate::indicators::valuation::rainbow::RainbowBand;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Discrete state of one indicator, tagged by the indicator it belongs to.
/// Each variant carries that indicator's own closed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum SignalState {
    PiCycle(PiCycleState),
    TwoYearMa(TwoYearMaState),
    Rsi(RsiState),
    Rainbow(RainbowBand),
    MayerMultiple(MayerState),
    GoldenRatio(GoldenRatioState),
    FearGreed(FearGreedState),
}

impl SignalState {
    pub fn kind(&self) -> IndicatorKind {
        match self {
            SignalState::PiCycle(_) => IndicatorKind::PiCycle,
            SignalState::TwoYearMa(_) => IndicatorKind::TwoYearMa,
            SignalState::Rsi(_) => IndicatorKind::Rsi,
            SignalState::Rainbow(_) => IndicatorKind::Rainbow,
            SignalState::MayerMultiple(_) => IndicatorKind::MayerMultiple,
            SignalState::GoldenRatio(_) => IndicatorKind::GoldenRatio,
            SignalState::FearGreed(_) => IndicatorKind::FearGreed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SignalState::PiCycle(s) => s.label(),
            SignalState::TwoYearMa(s) => s.label(),
            SignalState::Rsi(s) => s.label(),
            SignalState::Rainbow(s) => s.label(),
            SignalState::MayerMultiple(s) => s.label(),
            SignalState::GoldenRatio(s) => s.label(),
            SignalState::FearGreed(s) => s.label(),
        }
    }

    /// Every declared state of every indicator.
    pub fn all() -> Vec<SignalState> {
        let mut states = Vec::new();
        states.extend(PiCycleState::ALL.iter().copied().map(SignalState::from));
        states.extend(TwoYearMaState::ALL.iter().copied().map(SignalState::from));
        states.extend(RsiState::ALL.iter().copied().map(SignalState::from));
        states.extend(RainbowBand::ALL.iter().copied().map(SignalState::from));
        states.extend(MayerState::ALL.iter().copied().map(SignalState::from));
        states.extend(GoldenRatioState::ALL.iter().copied().map(SignalState::from));
        states.extend(FearGreedState::ALL.iter().copied().map(SignalState::from));
        states
    }
}

impl fmt::Display for SignalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<PiCycleState> for SignalState {
    fn from(state: PiCycleState) -> Self {
        SignalState::PiCycle(state)
    }
}

impl From<TwoYearMaState> for SignalState {
    fn from(state: TwoYearMaState) -> Self {
        SignalState::TwoYearMa(state)
    }
}

impl From<RsiState> for SignalState {
    fn from(state: RsiState) -> Self {
        SignalState::Rsi(state)
    }
}

impl From<RainbowBand> for SignalState {
    fn from(state: RainbowBand) -> Self {
        SignalState::Rainbow(state)
    }
}

impl From<MayerState> for SignalState {
    fn from(state: MayerState) -> Self {
        SignalState::MayerMultiple(state)
    }
}

impl From<GoldenRatioState> for SignalState {
    fn from(state: GoldenRatioState) -> Self {
        SignalState::GoldenRatio(state)
    }
}

impl From<FearGreedState> for SignalState {
    fn from(state: FearGreedState) -> Self {
        SignalState::FearGreed(state)
    }
}

/// Typed absence: the series is shorter than a computation needs.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("insufficient history for {label}: need {required} observations, have {available}")]
pub struct InsufficientHistory {
    pub label: String,
    pub required: usize,
    pub available: usize,
}

impl InsufficientHistory {
    pub fn new(label: impl Into<String>, required: usize, available: usize) -> Self {
        Self {
            label: label.into(),
            required,
            available,
        }
    }

    /// Shortfall for a `window`-day moving average.
    pub fn moving_average(window: usize, required: usize, available: usize) -> Self {
        Self::new(format!("{}-day average", window), required, available)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum UnavailableReason {
    #[error(transparent)]
    InsufficientHistory(#[from] InsufficientHistory),

    #[error("fear & greed score not supplied")]
    MissingSentimentScore,

    #[error("fear & greed score {score} is outside 0-100")]
    InvalidSentimentScore { score: u16 },
}

/// Either a classified value or the reason there is none. Never collapses
/// an unavailable indicator into a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reading {
    Available { value: f64, state: SignalState },
    Unavailable { reason: UnavailableReason },
}

/// Structured explanation attached to an indicator result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Interpretation {
    pub headline: String,
    pub explanation: String,
    pub historical_note: String,
    pub suggested_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    pub kind: IndicatorKind,
    pub name: &'static str,
    pub reading: Reading,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub auxiliary: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<Interpretation>,
}

impl IndicatorResult {
    pub fn available(kind: IndicatorKind, value: f64, state: impl Into<SignalState>) -> Self {
        let state = state.into();
        debug_assert_eq!(state.kind(), kind);
        Self {
            kind,
            name: kind.name(),
            reading: Reading::Available { value, state },
            auxiliary: BTreeMap::new(),
            interpretation: None,
        }
    }

    pub fn unavailable(kind: IndicatorKind, reason: impl Into<UnavailableReason>) -> Self {
        Self {
            kind,
            name: kind.name(),
            reading: Reading::Unavailable {
                reason: reason.into(),
            },
            auxiliary: BTreeMap::new(),
            interpretation: None,
        }
    }

    pub fn with_aux(mut self, key: impl Into<String>, value: f64) -> Self {
        self.auxiliary.insert(key.into(), value);
        self
    }

    pub fn with_interpretation(mut self, interpretation: Interpretation) -> Self {
        self.interpretation = Some(interpretation);
        self
    }

    pub fn is_available(&self) -> bool {
        matches!(self.reading, Reading::Available { .. })
    }

    pub fn value(&self) -> Option<f64> {
        match self.reading {
            Reading::Available { value, .. } => Some(value),
            Reading::Unavailable { .. } => None,
        }
    }

    pub fn state(&self) -> Option<SignalState> {
        match self.reading {
            Reading::Available { state, .. } => Some(state),
            Reading::Unavailable { .. } => None,
        }
    }

    pub fn unavailable_reason(&self) -> Option<&UnavailableReason> {
        match &self.reading {
            Reading::Available { .. } => None,
            Reading::Unavailable { reason } => Some(reason),
        }
    }

    pub fn aux(&self, key: &str) -> Option<f64> {
        self.auxiliary.get(key).copied()
    }
}
