//! Classification, scoring and aggregation of indicator readings.

pub mod aggregation;
pub mod classifier;
pub mod comparison;
pub mod engine;
pub mod interpretation;
pub mod scoring;

pub use aggregation::summarize;
pub use classifier::ThresholdTable;
pub use comparison::ComparisonAggregator;
pub use engine::AnalysisEngine;
pub use interpretation::{interpret, interpret_result};
pub use scoring::{composite_score, state_strength};
