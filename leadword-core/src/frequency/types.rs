//! Frequency table type.

use crate::analyzer::Token;
use leadword_types::Count;
use rustc_hash::FxHashMap;

/// Token counts and row accounting for one analysis pass.
///
/// Every input row lands in exactly one bucket:
///
/// ```text
/// counted_rows() + ignored_rows() + empty_rows() == total_rows()
/// ```
///
/// A table is built from scratch by [`Aggregator`](super::Aggregator) and never
/// patched afterwards; a changed ignore list means a new table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    pub(crate) counts: FxHashMap<Token, Count>,
    pub(crate) total_rows: Count,
    pub(crate) ignored_rows: Count,
    pub(crate) empty_rows: Count,
}

impl FrequencyTable {
    /// Creates an empty table with zero totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the count for a token, if it was counted at all.
    #[inline]
    pub fn get(&self, token: &str) -> Option<Count> {
        self.counts.get(token).copied()
    }

    /// Returns the token -> count mapping.
    #[inline(always)]
    pub fn counts(&self) -> &FxHashMap<Token, Count> {
        &self.counts
    }

    /// Iterates `(token, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Token, Count)> {
        self.counts.iter().map(|(t, &c)| (t, c))
    }

    /// Number of distinct counted tokens.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no token was counted.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of input rows processed.
    #[inline(always)]
    pub fn total_rows(&self) -> Count {
        self.total_rows
    }

    /// Rows whose token was excluded by the ignore set or the length filter.
    #[inline(always)]
    pub fn ignored_rows(&self) -> Count {
        self.ignored_rows
    }

    /// Rows with no extractable word.
    #[inline(always)]
    pub fn empty_rows(&self) -> Count {
        self.empty_rows
    }

    /// Sum of all token counts.
    pub fn counted_rows(&self) -> Count {
        self.counts.values().sum()
    }
}
