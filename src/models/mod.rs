//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod report;
pub mod series;
pub mod snapshot;

pub use indicators::{
    IndicatorResult, InsufficientHistory, Interpretation, Reading, SignalState, UnavailableReason,
};
pub use report::{
    AnalysisReport, AssetRank, ComparisonNote, ComparisonReport, ConfluenceSummary, Direction,
    OverallAssessment,
};
pub use series::{DailyBar, PriceSeries};
pub use snapshot::MarketSnapshot;
