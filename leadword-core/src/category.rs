//! Word categories.
//!
//! An optional word -> category lookup (for example "arroz" -> "Alimentos",
//! "parafuso" -> "Ferramentas") and a per-category breakdown of ranked
//! entries. Words are normalized like tokens, so lookups are insensitive to
//! case and edge punctuation.

use crate::analyzer::{TextNormalizer, Token};
use crate::present::RankedEntry;
use leadword_types::Count;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Total count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Category name as supplied by the user.
    pub category: Box<str>,
    /// Sum of the counts of every ranked token in the category.
    pub count: Count,
}

/// Category breakdown; most uploads define only a handful of categories.
pub type Breakdown = SmallVec<[CategoryCount; 8]>;

/// Word -> category mapping.
///
/// The raw `(word, category)` pairs are kept alongside the normalized
/// lookup, so the map can be re-keyed for a different normalizer with
/// [`with_normalizer`](Self::with_normalizer).
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    normalizer: TextNormalizer,
    entries: Vec<(Box<str>, Box<str>)>,
    map: FxHashMap<Token, Box<str>>,
}

impl CategoryMap {
    /// Creates an empty map using `normalizer` for words.
    pub fn new(normalizer: TextNormalizer) -> Self {
        Self {
            normalizer,
            ..Self::default()
        }
    }

    /// Returns the normalizer applied to every word.
    #[inline(always)]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Re-keys every entry with `normalizer`, replaying insertions in order.
    pub fn with_normalizer(self, normalizer: TextNormalizer) -> Self {
        if self.normalizer == normalizer {
            return self;
        }
        let mut rekeyed = Self::new(normalizer);
        for (word, category) in &self.entries {
            rekeyed.insert(word, category);
        }
        rekeyed
    }

    /// Maps `word` to `category`, replacing any previous category.
    ///
    /// Returns `false` (and changes nothing) when the word has no token or the
    /// category is blank.
    pub fn insert(&mut self, word: &str, category: &str) -> bool {
        let category = category.trim();
        if category.is_empty() {
            return false;
        }
        match self.normalizer.normalize_str(word) {
            Some(token) => {
                self.map.insert(token, category.into());
                self.entries.push((word.into(), category.into()));
                true
            }
            None => false,
        }
    }

    /// Returns the category of a token.
    pub fn category_of(&self, token: &Token) -> Option<&str> {
        self.map.get(token).map(|c| &**c)
    }

    /// Number of mapped words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if no word is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Sums ranked counts per category.
    ///
    /// Uncategorized tokens are skipped. Sorted by count descending, then
    /// category name ascending.
    pub fn breakdown(&self, ranked: &[RankedEntry]) -> Breakdown {
        let mut totals: FxHashMap<&str, Count> = FxHashMap::default();
        for entry in ranked {
            if let Some(category) = self.category_of(&entry.token) {
                *totals.entry(category).or_insert(0) += entry.count;
            }
        }

        let mut out: Breakdown = totals
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.into(),
                count,
            })
            .collect();
        out.sort_unstable_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.category.cmp(&b.category))
        });
        out
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for CategoryMap {
    /// Builds a map with the default normalizer, skipping unusable pairs.
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut map = Self::default();
        for (word, category) in iter {
            map.insert(word, category);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::aggregate;
    use crate::ignore::IgnoreSet;
    use crate::present::present;

    fn ranked(rows: &[&str]) -> Vec<RankedEntry> {
        present(&aggregate(rows.iter().map(|r| Some(*r)), &IgnoreSet::new()))
    }

    #[test]
    fn lookups_are_normalized() {
        let map: CategoryMap = [("Maçã", "Alimentos"), ("PARAFUSO!", "Ferramentas")]
            .into_iter()
            .collect();
        let ranked = ranked(&["maçã verde", "Parafuso 3mm"]);
        let categories: Vec<Option<&str>> =
            ranked.iter().map(|e| map.category_of(&e.token)).collect();
        assert_eq!(categories, [Some("Alimentos"), Some("Ferramentas")]);
    }

    #[test]
    fn rejects_unusable_pairs() {
        let mut map = CategoryMap::default();
        assert!(!map.insert("!!!", "Alimentos"));
        assert!(!map.insert("arroz", "   "));
        assert!(map.is_empty());
        assert!(map.insert("arroz", " Alimentos "));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn later_insert_replaces() {
        let mut map = CategoryMap::default();
        map.insert("arroz", "Alimentos");
        map.insert("Arroz", "Grãos");
        let ranked = ranked(&["arroz"]);
        assert_eq!(map.category_of(&ranked[0].token), Some("Grãos"));
    }

    #[test]
    fn breakdown_sums_and_sorts() {
        let map: CategoryMap = [
            ("maçã", "Alimentos"),
            ("arroz", "Alimentos"),
            ("parafuso", "Ferramentas"),
            ("martelo", "Ferramentas"),
        ]
        .into_iter()
        .collect();
        let ranked = ranked(&[
            "Maçã", "Maçã", "Arroz", "Parafuso", "Martelo", "Caneta", "Caneta", "Caneta",
        ]);

        let breakdown = map.breakdown(&ranked);
        assert_eq!(breakdown.len(), 2);
        assert_eq!(&*breakdown[0].category, "Alimentos");
        assert_eq!(breakdown[0].count, 3);
        assert_eq!(&*breakdown[1].category, "Ferramentas");
        assert_eq!(breakdown[1].count, 2);
    }

    #[test]
    fn breakdown_ties_by_name() {
        let map: CategoryMap = [("b", "Zeta"), ("a", "Alpha")].into_iter().collect();
        let breakdown = map.breakdown(&ranked(&["a", "b"]));
        let names: Vec<&str> = breakdown.iter().map(|c| &*c.category).collect();
        assert_eq!(names, ["Alpha", "Zeta"]);
    }

    #[test]
    fn rekeying_follows_the_new_normalizer() {
        let map: CategoryMap = [("Café", "Bebidas"), ("Arroz", "Alimentos"), ("cafe", "Grãos")]
            .into_iter()
            .collect();
        let strip = TextNormalizer::new(crate::analyzer::NormalizerConfig {
            strip_diacritics: true,
        });

        let rekeyed = map.with_normalizer(strip);
        assert_eq!(rekeyed.normalizer(), &strip);
        // Both spellings fold to "cafe"; the later insertion wins.
        assert_eq!(rekeyed.len(), 2);
        let ignore = IgnoreSet::with_normalizer(strip);
        let ranked = present(&aggregate([Some("Café forte"), Some("arroz")], &ignore));
        let categories: Vec<Option<&str>> =
            ranked.iter().map(|e| rekeyed.category_of(&e.token)).collect();
        assert_eq!(categories, [Some("Alimentos"), Some("Grãos")]);
    }

    #[test]
    fn empty_map_breakdown() {
        assert!(CategoryMap::default().breakdown(&ranked(&["x"])).is_empty());
    }
}
