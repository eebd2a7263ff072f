//! First-word normalization.
//!
//! Turns the leading segment of a raw description into a canonical [`Token`]:
//! case-folded, with leading and trailing punctuation removed. Anything that
//! is neither alphabetic nor numeric counts as punctuation, so symbols and
//! emoji at the edges of a word are stripped as well.
//!
//! Case folding is Unicode simple lowercasing with an ASCII table fast path.
//! It never consults the process locale, so the same input always produces
//! the same token on every machine. Folded text is recomposed to NFC, so a
//! word typed with precomposed accents and the same word with separate
//! combining marks yield one token.

use super::token::Token;
use super::tokenizer::first_segment;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::{is_nfc, UnicodeNormalization};

#[rustfmt::skip]
const ASCII_LOWER: [u8; 128] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
];

#[inline(always)]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// Configuration options for first-word normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// When enabled, strips diacritical marks from Latin characters.
    /// For example, "Café" becomes "cafe".
    pub strip_diacritics: bool,
}

/// Extracts and canonicalizes the first word of a description.
///
/// Steps, in order:
/// - skip leading whitespace and cut at the next whitespace run
/// - lowercase and recompose to NFC (or, with `strip_diacritics`, decompose
///   and drop every accent)
/// - strip non-word characters from both ends
///
/// Folding runs before stripping so that a character whose lowercase form
/// ends in a combining mark ("İ" -> "i\u{307}") keeps that mark attached to
/// its base. This keeps every token a fixed point: normalizing a token's text
/// yields the same token.
///
/// # Examples
///
/// ```
/// use leadword_core::analyzer::{NormalizerConfig, TextNormalizer};
///
/// let normalizer = TextNormalizer::default();
/// let token = normalizer.normalize(Some("  \"Apple\" pie")).unwrap();
/// assert_eq!(token.as_str(), "apple");
/// assert!(normalizer.normalize(Some("!!! ...")).is_none());
///
/// let folding = TextNormalizer::new(NormalizerConfig { strip_diacritics: true });
/// assert_eq!(folding.normalize(Some("Café com leite")).unwrap().as_str(), "cafe");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextNormalizer {
    config: NormalizerConfig,
}

impl TextNormalizer {
    /// Creates a new normalizer with the specified configuration.
    pub const fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[inline(always)]
    pub const fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Returns the token for a description, or `None` when the description is
    /// missing or has no extractable word.
    #[inline]
    pub fn normalize(&self, description: Option<&str>) -> Option<Token> {
        let mut buf = String::new();
        self.normalize_into(description?, &mut buf)
            .then(|| Token::from_canonical(buf))
    }

    /// Convenience for non-null input.
    #[inline]
    pub fn normalize_str(&self, description: &str) -> Option<Token> {
        self.normalize(Some(description))
    }

    /// Writes the canonical first word of `input` into `out`.
    ///
    /// Clears the buffer first and reuses its capacity. Returns `false` (with
    /// `out` left empty) when there is no word to extract.
    pub fn normalize_into(&self, input: &str, out: &mut String) -> bool {
        out.clear();

        let segment = first_segment(input);
        if segment.is_empty() {
            return false;
        }

        self.fold_into(segment, out);
        strip_edges(out);
        !out.is_empty()
    }

    fn fold_into(&self, segment: &str, out: &mut String) {
        out.reserve(segment.len());

        if segment.is_ascii() {
            out.extend(
                segment
                    .bytes()
                    .map(|b| ASCII_LOWER[b as usize] as char),
            );
            return;
        }

        if self.config.strip_diacritics {
            // Decompose so every accent is a separate mark, then drop marks.
            for ch in segment.nfd() {
                for lowered in ch.to_lowercase() {
                    if !is_combining_mark(lowered) {
                        out.push(fold_latin1(lowered));
                    }
                }
            }
            return;
        }

        for ch in segment.chars() {
            if ch.is_ascii() {
                out.push(ASCII_LOWER[ch as usize] as char);
            } else {
                out.extend(ch.to_lowercase());
            }
        }

        // "Cafe\u{301}" and "Café" must meet in one token.
        if !is_nfc(out) {
            let composed: String = out.nfc().collect();
            out.clear();
            out.push_str(&composed);
        }
    }
}

/// Removes leading and trailing non-word characters in place.
///
/// Combining marks directly after the last word character belong to it and
/// are kept; marks with no base before them are stripped like punctuation.
fn strip_edges(word: &mut String) {
    let Some(start) = word.find(is_word_char) else {
        word.clear();
        return;
    };

    let last = word
        .char_indices()
        .rev()
        .find(|&(_, c)| is_word_char(c))
        .map_or(word.len(), |(i, c)| i + c.len_utf8());
    let marks: usize = word[last..]
        .chars()
        .take_while(|&c| is_combining_mark(c))
        .map(char::len_utf8)
        .sum();

    word.truncate(last + marks);
    word.drain(..start);
}

/// Folds a lowercase Latin letter with no canonical decomposition to its
/// ASCII base. Decomposable letters never reach here: NFD splits them first.
#[inline(always)]
fn fold_latin1(c: char) -> char {
    match c {
        'æ' => 'a',
        'ð' | 'đ' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        'ł' => 'l',
        'ø' | 'œ' => 'o',
        'ß' => 's',
        'þ' => 't',
        _ => c,
    }
}
