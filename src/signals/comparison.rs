//! Cross-asset ranking and confluence notes.

use crate::config::ComparisonConfig;
use crate::error::ComparisonError;
use crate::models::report::{AnalysisReport, AssetRank, ComparisonNote, ComparisonReport, Direction};
use std::cmp::Ordering;

pub const MIN_ASSETS: usize = 2;

pub struct ComparisonAggregator;

impl ComparisonAggregator {
    /// Rank reports from most bottom-leaning to most top-leaning.
    ///
    /// The result does not depend on input order: reports are sorted by
    /// symbol, equal composites rank by symbol, and assets without a
    /// composite score rank last. Each symbol may appear only once.
    pub fn compare(
        mut reports: Vec<AnalysisReport>,
        config: &ComparisonConfig,
    ) -> Result<ComparisonReport, ComparisonError> {
        if reports.len() < MIN_ASSETS {
            return Err(ComparisonError::TooFewAssets {
                count: reports.len(),
            });
        }
        reports.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        if let Some(pair) = reports.windows(2).find(|pair| pair[0].symbol == pair[1].symbol) {
            return Err(ComparisonError::DuplicateSymbol {
                symbol: pair[0].symbol.clone(),
            });
        }

        let rankings = Self::rank(&reports);
        let notes = Self::notes(&reports, config);

        Ok(ComparisonReport {
            reports,
            rankings,
            notes,
        })
    }

    fn rank(reports: &[AnalysisReport]) -> Vec<AssetRank> {
        let mut ordered: Vec<&AnalysisReport> = reports.iter().collect();
        ordered.sort_by(|a, b| {
            compare_composites(a.composite_score(), b.composite_score())
                .then_with(|| a.symbol.cmp(&b.symbol))
        });

        ordered
            .into_iter()
            .enumerate()
            .map(|(i, report)| AssetRank {
                rank: i + 1,
                symbol: report.symbol.clone(),
                price: report.latest_close,
                change_24h_pct: report.market.as_ref().and_then(|m| m.change_24h_pct),
                change_7d_pct: report.market.as_ref().and_then(|m| m.change_7d_pct),
                composite_score: report.composite_score(),
                confluent: report.confluence.confluent,
                direction: report.confluence.direction,
            })
            .collect()
    }

    fn notes(reports: &[AnalysisReport], config: &ComparisonConfig) -> Vec<ComparisonNote> {
        let mut notes = Vec::new();

        let dates: Vec<_> = reports.iter().filter_map(|r| r.as_of).collect();
        if let (Some(earliest), Some(latest)) = (dates.iter().min(), dates.iter().max()) {
            let days = (*latest - *earliest).num_days();
            if days > config.max_as_of_divergence_days {
                notes.push(ComparisonNote::AsOfDivergence {
                    earliest: *earliest,
                    latest: *latest,
                    days,
                });
            }
        }

        notes.extend(
            reports
                .iter()
                .filter(|r| r.as_of.is_none())
                .map(|r| ComparisonNote::MissingAsOf {
                    symbol: r.symbol.clone(),
                }),
        );

        for direction in [Direction::Top, Direction::Bottom] {
            let symbols: Vec<String> = reports
                .iter()
                .filter(|r| r.confluence.direction == Some(direction))
                .map(|r| r.symbol.clone())
                .collect();
            if symbols.len() >= MIN_ASSETS {
                notes.push(ComparisonNote::SharedConfluence { direction, symbols });
            }
        }

        notes.extend(
            reports
                .iter()
                .filter(|r| r.composite_score().is_none())
                .map(|r| ComparisonNote::NoComposite {
                    symbol: r.symbol.clone(),
                }),
        );

        notes
    }
}

/// Ascending by score; absent scores sort after every present one.
fn compare_composites(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
