//! Per-asset and cross-asset report structures.

use crate::indicators::registry::IndicatorKind;
use crate::models::indicators::IndicatorResult;
use crate::models::snapshot::MarketSnapshot;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Side of the cycle a signed strength leans toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Top,
    Bottom,
}

impl Direction {
    pub fn from_strength(strength: f64) -> Option<Self> {
        if strength > 0.0 {
            Some(Direction::Top)
        } else if strength < 0.0 {
            Some(Direction::Bottom)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Top => f.write_str("top"),
            Direction::Bottom => f.write_str("bottom"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallAssessment {
    ApproachingTop,
    ApproachingBottom,
    Mixed,
}

impl OverallAssessment {
    pub fn description(&self) -> &'static str {
        match self {
            OverallAssessment::ApproachingTop => {
                "Approaching top: multiple indicators show overvaluation"
            }
            OverallAssessment::ApproachingBottom => {
                "Approaching bottom: multiple indicators show undervaluation"
            }
            OverallAssessment::Mixed => "Mixed signals: market in transition",
        }
    }
}

/// How strongly an asset's indicators agree with each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfluenceSummary {
    /// Mean signed strength over available indicators; absent when none are.
    pub composite_score: Option<f64>,
    pub available: usize,
    pub top_leaning: usize,
    pub bottom_leaning: usize,
    pub confluent: bool,
    pub direction: Option<Direction>,
    pub assessment: OverallAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub as_of: Option<NaiveDate>,
    pub latest_close: Option<f64>,
    pub market: Option<MarketSnapshot>,
    pub observations: usize,
    pub indicators: Vec<IndicatorResult>,
    pub fear_greed: IndicatorResult,
    pub confluence: ConfluenceSummary,
}

impl AnalysisReport {
    pub fn indicator(&self, kind: IndicatorKind) -> Option<&IndicatorResult> {
        self.all_indicators().find(|r| r.kind == kind)
    }

    /// Price indicators followed by Fear & Greed.
    pub fn all_indicators(&self) -> impl Iterator<Item = &IndicatorResult> {
        self.indicators.iter().chain(std::iter::once(&self.fear_greed))
    }

    pub fn composite_score(&self) -> Option<f64> {
        self.confluence.composite_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRank {
    pub rank: usize,
    pub symbol: String,
    pub price: Option<f64>,
    pub change_24h_pct: Option<f64>,
    pub change_7d_pct: Option<f64>,
    pub composite_score: Option<f64>,
    pub confluent: bool,
    pub direction: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonNote {
    AsOfDivergence {
        earliest: NaiveDate,
        latest: NaiveDate,
        days: i64,
    },
    MissingAsOf {
        symbol: String,
    },
    SharedConfluence {
        direction: Direction,
        symbols: Vec<String>,
    },
    NoComposite {
        symbol: String,
    },
}

impl fmt::Display for ComparisonNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonNote::AsOfDivergence {
                earliest,
                latest,
                days,
            } => write!(
                f,
                "as-of dates diverge by {} days ({} to {})",
                days, earliest, latest
            ),
            ComparisonNote::MissingAsOf { symbol } => {
                write!(f, "{} has no price history", symbol)
            }
            ComparisonNote::SharedConfluence { direction, symbols } => write!(
                f,
                "{} show {}-leaning confluence",
                symbols.join(", "),
                direction
            ),
            ComparisonNote::NoComposite { symbol } => {
                write!(f, "{} has no available indicators", symbol)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub reports: Vec<AnalysisReport>,
    pub rankings: Vec<AssetRank>,
    pub notes: Vec<ComparisonNote>,
}

impl ComparisonReport {
    pub fn ranked_symbols(&self) -> Vec<&str> {
        self.rankings.iter().map(|r| r.symbol.as_str()).collect()
    }
}
