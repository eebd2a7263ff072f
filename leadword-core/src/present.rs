//! Display ordering for frequency tables.
//!
//! The presenter is a deterministic sort-and-shape step. It never filters:
//! every token in the table shows up in the ranked sequence, and the chart
//! series follows the same order.

use crate::analyzer::Token;
use crate::frequency::FrequencyTable;
use core::cmp::Ordering;
use core::fmt;
use leadword_types::{AnalysisConfig, ChartPoint, Count, Rank};

/// A token with its count and 1-based display rank.
///
/// Ranks are distinct and consecutive; equal counts are ordered by token so
/// that rank is a total order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based position in display order.
    pub rank: Rank,
    /// The counted token.
    pub token: Token,
    /// Occurrences of the token.
    pub count: Count,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({})", self.rank, self.token, self.count)
    }
}

/// Ranked table plus chart series for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    /// Entries in display order.
    pub ranked: Vec<RankedEntry>,
    /// `(label, value)` points in the same order as `ranked`.
    pub chart: Vec<ChartPoint>,
}

/// Count descending, then token ascending.
#[inline]
fn display_order(a: &(&Token, Count), b: &(&Token, Count)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Ranks the table's entries.
///
/// ```
/// use leadword_core::{aggregate, present, IgnoreSet};
///
/// let table = aggregate([Some("b x"), Some("a y"), Some("b z")], &IgnoreSet::new());
/// let ranked = present(&table);
/// assert_eq!(ranked[0].token.as_str(), "b");
/// assert_eq!(ranked[1].rank, 2);
/// ```
pub fn present(table: &FrequencyTable) -> Vec<RankedEntry> {
    let mut entries: Vec<(&Token, Count)> = table.iter().collect();
    // Tokens are unique keys, so the unstable sort is still deterministic.
    entries.sort_unstable_by(display_order);

    entries
        .into_iter()
        .zip(1..=Rank::MAX)
        .map(|((token, count), rank)| RankedEntry {
            rank,
            token: token.clone(),
            count,
        })
        .collect()
}

/// Builds chart points from ranked entries, keeping at most `limit`.
pub fn chart_series(ranked: &[RankedEntry], limit: Option<usize>) -> Vec<ChartPoint> {
    let take = limit.unwrap_or(ranked.len());
    ranked
        .iter()
        .take(take)
        .map(|e| ChartPoint::new(e.token.as_str(), e.count))
        .collect()
}

/// Produces [`Presentation`]s with a fixed chart limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    chart_limit: Option<usize>,
}

impl Presenter {
    /// Creates a presenter that charts every entry.
    pub const fn new() -> Self {
        Self { chart_limit: None }
    }

    /// Creates a presenter matching `config`.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            chart_limit: config.chart_limit,
        }
    }

    /// Charts only the first `limit` entries.
    pub const fn with_chart_limit(mut self, limit: usize) -> Self {
        self.chart_limit = Some(limit);
        self
    }

    /// Ranks the table and builds the chart series.
    pub fn present(&self, table: &FrequencyTable) -> Presentation {
        let ranked = present(table);
        let chart = chart_series(&ranked, self.chart_limit);
        Presentation { ranked, chart }
    }
}
