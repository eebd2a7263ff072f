//! Aggregation of descriptions into a frequency table.

use crate::analyzer::Token;
use crate::frequency::types::FrequencyTable;
use crate::ignore::IgnoreSet;
use leadword_types::AnalysisConfig;
use tracing::debug;

/// Counts first words across a sequence of descriptions.
///
/// The aggregator holds only configuration. Descriptions are normalized with
/// the ignore set's own [`TextNormalizer`](crate::analyzer::TextNormalizer),
/// so extracted tokens and ignore entries can never disagree on folding.
/// [`aggregate`](Self::aggregate) is a pure function of its inputs: calling
/// it twice with the same rows and the same ignore set yields equal tables.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    min_token_len: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Creates an aggregator with no length filter.
    pub const fn new() -> Self {
        Self { min_token_len: 1 }
    }

    /// Creates an aggregator matching `config`.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new().with_min_token_len(config.min_token_len)
    }

    /// Excludes tokens shorter than `len` characters.
    pub const fn with_min_token_len(mut self, len: usize) -> Self {
        self.min_token_len = len;
        self
    }

    /// Minimum token length in characters.
    #[inline(always)]
    pub const fn min_token_len(&self) -> usize {
        self.min_token_len
    }

    /// Builds a frequency table.
    ///
    /// For each description:
    /// - no extractable word: counted in `empty_rows`
    /// - token in `ignore`, or shorter than the minimum: counted in
    ///   `ignored_rows`
    /// - otherwise: the token's count is incremented
    ///
    /// Every description also increments `total_rows`.
    pub fn aggregate<I, S>(&self, descriptions: I, ignore: &IgnoreSet) -> FrequencyTable
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let normalizer = ignore.normalizer();
        let mut table = FrequencyTable::new();
        let mut buf = String::with_capacity(64);

        for description in descriptions {
            table.total_rows += 1;

            let found = match &description {
                Some(text) => normalizer.normalize_into(text.as_ref(), &mut buf),
                None => false,
            };
            if !found {
                table.empty_rows += 1;
                continue;
            }

            if ignore.contains_str(&buf) || self.too_short(&buf) {
                table.ignored_rows += 1;
                continue;
            }

            match table.counts.get_mut(buf.as_str()) {
                Some(count) => *count += 1,
                None => {
                    table.counts.insert(Token::from_canonical(buf.as_str()), 1);
                }
            }
        }

        debug!(
            total = table.total_rows,
            distinct = table.counts.len(),
            ignored = table.ignored_rows,
            empty = table.empty_rows,
            "aggregated descriptions"
        );
        table
    }

    #[inline]
    fn too_short(&self, token: &str) -> bool {
        self.min_token_len > 1 && token.chars().count() < self.min_token_len
    }
}

/// Aggregates with no length filter.
///
/// ```
/// use leadword_core::{aggregate, IgnoreSet};
///
/// let table = aggregate(
///     [Some("Apple pie"), Some("apple tart"), Some("Banana split")],
///     &IgnoreSet::new(),
/// );
/// assert_eq!(table.get("apple"), Some(2));
/// assert_eq!(table.get("banana"), Some(1));
/// ```
pub fn aggregate<I, S>(descriptions: I, ignore: &IgnoreSet) -> FrequencyTable
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    Aggregator::new().aggregate(descriptions, ignore)
}
