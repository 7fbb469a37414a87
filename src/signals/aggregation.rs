//! Per-asset confluence: how many indicators lean the same way.

use crate::models::indicators::IndicatorResult;
use crate::models::report::{ConfluenceSummary, Direction, OverallAssessment};
use crate::signals::scoring::{composite_score, result_strength};

/// Summarize a set of indicator results for one asset.
///
/// An asset is confluent when at least `min_agreeing` available indicators
/// share the same non-zero sign. When both sides reach the threshold the
/// larger side sets the direction; an exact tie falls back to the
/// composite's sign and stays `Mixed` when that is zero.
pub fn summarize<'a>(
    results: impl IntoIterator<Item = &'a IndicatorResult> + Clone,
    min_agreeing: usize,
) -> ConfluenceSummary {
    let strengths: Vec<f64> = results.clone().into_iter().filter_map(result_strength).collect();
    let composite = composite_score(results);

    let top_leaning = strengths.iter().filter(|s| **s > 0.0).count();
    let bottom_leaning = strengths.iter().filter(|s| **s < 0.0).count();
    let min_agreeing = min_agreeing.max(1);

    let top = top_leaning >= min_agreeing;
    let bottom = bottom_leaning >= min_agreeing;
    let direction = match (top, bottom) {
        (true, false) => Some(Direction::Top),
        (false, true) => Some(Direction::Bottom),
        (true, true) if top_leaning > bottom_leaning => Some(Direction::Top),
        (true, true) if bottom_leaning > top_leaning => Some(Direction::Bottom),
        (true, true) => composite.and_then(Direction::from_strength),
        (false, false) => None,
    };

    let assessment = match direction {
        Some(Direction::Top) => OverallAssessment::ApproachingTop,
        Some(Direction::Bottom) => OverallAssessment::ApproachingBottom,
        None => OverallAssessment::Mixed,
    };

    ConfluenceSummary {
        composite_score: composite,
        available: strengths.len(),
        top_leaning,
        bottom_leaning,
        confluent: top || bottom,
        direction,
        assessment,
    }
}
