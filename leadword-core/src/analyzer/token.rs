//! Canonical first-word token.

use core::borrow::Borrow;
use core::fmt;

/// Normalized first word of a description.
///
/// A `Token` is never empty and is always the output of
/// [`TextNormalizer`](super::TextNormalizer): case-folded, with no surrounding
/// punctuation and no whitespace. The "no extractable word" sentinel is
/// represented as `None` wherever an `Option<Token>` is returned.
///
/// `Token` borrows as `str`, so hash maps keyed by tokens can be queried with
/// plain string slices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Token(Box<str>);

impl Token {
    /// Wraps text already produced by the normalizer.
    #[inline]
    pub(crate) fn from_canonical(text: impl Into<Box<str>>) -> Self {
        let text = text.into();
        debug_assert!(!text.is_empty(), "token: empty text from normalizer");
        Self(text)
    }

    /// Returns the token text.
    #[inline(always)]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    #[inline]
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl Borrow<str> for Token {
    #[inline(always)]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Token {
    #[inline(always)]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Token {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Token {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}
