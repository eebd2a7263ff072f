//! User-curated ignore list.
//!
//! An [`IgnoreSet`] holds the tokens a user has chosen to exclude from the
//! frequency count. Every word passes through the set's own
//! [`TextNormalizer`] before insertion, removal or lookup, so "The", "the "
//! and "THE!" all refer to the same entry.
//!
//! The set keeps insertion order for display while membership is decided by
//! a hash set. It is owned by the session and only ever changes through
//! explicit calls: the aggregator reads it, nothing else writes it.

mod stopwords;

pub use stopwords::DEFAULT_STOPWORDS;

use crate::analyzer::{TextNormalizer, Token};
use leadword_types::AnalysisError;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Ordered set of ignored tokens.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    normalizer: TextNormalizer,
    members: FxHashSet<Token>,
    order: Vec<Token>,
}

impl IgnoreSet {
    /// Creates an empty set using the default normalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set that normalizes words with `normalizer`.
    ///
    /// Use the same normalizer as the aggregator, otherwise entries may
    /// never match extracted tokens.
    pub fn with_normalizer(normalizer: TextNormalizer) -> Self {
        Self {
            normalizer,
            ..Self::default()
        }
    }

    /// Creates a set seeded with [`DEFAULT_STOPWORDS`].
    pub fn with_default_stopwords(normalizer: TextNormalizer) -> Self {
        let mut set = Self::with_normalizer(normalizer);
        for word in DEFAULT_STOPWORDS {
            if let Some(token) = set.normalizer.normalize_str(word) {
                set.insert(token);
            }
        }
        set
    }

    /// Returns the normalizer used for every mutation and lookup.
    #[inline(always)]
    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Adds a word. Returns `true` if it was not already present.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidIgnoreWord`] if the word has no
    /// extractable token; the set is left unchanged.
    pub fn add(&mut self, word: &str) -> Result<bool, AnalysisError> {
        let token = self.parse(word)?;
        let added = self.insert(token);
        debug!(word, added, size = self.order.len(), "ignore add");
        Ok(added)
    }

    /// Removes a word. Returns `true` if it was present.
    ///
    /// Removing a word that is not in the set is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidIgnoreWord`] if the word has no
    /// extractable token.
    pub fn remove(&mut self, word: &str) -> Result<bool, AnalysisError> {
        let token = self.parse(word)?;
        let removed = self.members.remove(&token);
        if removed {
            self.order.retain(|t| *t != token);
        }
        debug!(word, removed, size = self.order.len(), "ignore remove");
        Ok(removed)
    }

    /// Adds every word, or none of them.
    ///
    /// Returns the number of words that were newly inserted.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidIgnoreWord`] for the first word with no
    /// extractable token. No word is added in that case.
    pub fn extend<I, S>(&mut self, words: I) -> Result<usize, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = words
            .into_iter()
            .map(|w| self.parse(w.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut added = 0;
        for token in tokens {
            if self.insert(token) {
                added += 1;
            }
        }
        debug!(added, size = self.order.len(), "ignore extend");
        Ok(added)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.members.clear();
        self.order.clear();
        debug!("ignore clear");
    }

    /// Returns `true` if the token is ignored.
    #[inline]
    pub fn contains(&self, token: &Token) -> bool {
        self.members.contains(token)
    }

    /// Membership test on already-normalized text.
    #[inline]
    pub(crate) fn contains_str(&self, token: &str) -> bool {
        self.members.contains(token)
    }

    /// Normalizes `word` and checks membership.
    pub fn contains_word(&self, word: &str) -> bool {
        self.normalizer
            .normalize_str(word)
            .is_some_and(|t| self.members.contains(&t))
    }

    /// Returns all entries in insertion order.
    #[inline]
    pub fn all(&self) -> &[Token] {
        &self.order
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.order.iter()
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is ignored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn parse(&self, word: &str) -> Result<Token, AnalysisError> {
        self.normalizer
            .normalize_str(word)
            .ok_or_else(|| AnalysisError::InvalidIgnoreWord {
                input: word.to_string(),
            })
    }

    fn insert(&mut self, token: Token) -> bool {
        if self.members.contains(&token) {
            return false;
        }
        self.order.push(token.clone());
        self.members.insert(token);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::NormalizerConfig;

    fn words(set: &IgnoreSet) -> Vec<&str> {
        set.all().iter().map(Token::as_str).collect()
    }

    #[test]
    fn starts_empty() {
        let set = IgnoreSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn variants_collapse_to_one_entry() {
        let mut set = IgnoreSet::new();
        assert_eq!(set.add("The"), Ok(true));
        assert_eq!(set.add("the "), Ok(false));
        assert_eq!(set.add("THE!"), Ok(false));
        assert_eq!(words(&set), ["the"]);
    }

    #[test]
    fn contains_uses_same_normalization() {
        let mut set = IgnoreSet::new();
        set.add("The!").unwrap();
        let token = set.normalizer().normalize_str("The Thing").unwrap();
        assert!(set.contains(&token));
        assert!(set.contains_word("  tHe"));
        assert!(!set.contains_word("thing"));
    }

    #[test]
    fn insertion_order_preserved() {
        let mut set = IgnoreSet::new();
        set.add("zebra").unwrap();
        set.add("apple").unwrap();
        set.add("mango").unwrap();
        set.add("Apple").unwrap();
        assert_eq!(words(&set), ["zebra", "apple", "mango"]);
    }

    #[test]
    fn remove_member_and_non_member() {
        let mut set = IgnoreSet::new();
        set.add("cat").unwrap();
        set.add("dog").unwrap();
        assert_eq!(set.remove("CAT."), Ok(true));
        assert_eq!(set.remove("cat"), Ok(false));
        assert_eq!(set.remove("bird"), Ok(false));
        assert_eq!(words(&set), ["dog"]);
    }

    #[test]
    fn re_adding_goes_to_the_end() {
        let mut set = IgnoreSet::new();
        set.add("a1").unwrap();
        set.add("b2").unwrap();
        set.remove("a1").unwrap();
        set.add("a1").unwrap();
        assert_eq!(words(&set), ["b2", "a1"]);
    }

    #[test]
    fn invalid_words_rejected_without_mutation() {
        let mut set = IgnoreSet::new();
        set.add("keep").unwrap();

        for bad in ["", "   ", "!!!", "..."] {
            assert_eq!(
                set.add(bad),
                Err(AnalysisError::InvalidIgnoreWord {
                    input: bad.to_string()
                })
            );
            assert!(set.remove(bad).is_err());
        }
        assert_eq!(words(&set), ["keep"]);
    }

    #[test]
    fn extend_is_all_or_nothing() {
        let mut set = IgnoreSet::new();
        assert!(set.extend(["one", "??", "two"]).is_err());
        assert!(set.is_empty());

        assert_eq!(set.extend(["One", "two", "ONE"]), Ok(2));
        assert_eq!(words(&set), ["one", "two"]);
    }

    #[test]
    fn multi_word_input_keeps_first_word() {
        let mut set = IgnoreSet::new();
        set.add("ampla concorrência").unwrap();
        assert_eq!(words(&set), ["ampla"]);
    }

    #[test]
    fn clear_removes_everything() {
        let mut set = IgnoreSet::new();
        set.extend(["a", "b", "c"]).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains_word("a"));
    }

    #[test]
    fn default_stopwords_seeded() {
        let set = IgnoreSet::with_default_stopwords(TextNormalizer::default());
        assert_eq!(set.len(), DEFAULT_STOPWORDS.len());
        assert!(set.contains_word("De"));
        assert!(set.contains_word("porém"));
        assert_eq!(set.all()[0].as_str(), "de");
    }

    #[test]
    fn default_stopwords_follow_normalizer() {
        let folding = TextNormalizer::new(NormalizerConfig {
            strip_diacritics: true,
        });
        let set = IgnoreSet::with_default_stopwords(folding);
        assert!(set.all().iter().any(|t| t.as_str() == "porem"));
        assert!(set.contains_word("PORÉM"));
    }
}
