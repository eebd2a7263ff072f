//! First-Segment Tokenizer
//!
//! Finds the leading word of a description. This is the first stage of the
//! analysis pipeline: the normalizer only ever sees the slice returned here.
//!
//! ## What It Does
//!
//! Given raw input like `"  Apple pie, sliced"`, it skips leading whitespace
//! and returns everything up to the next whitespace run:
//!
//! ```ignore
//! "Apple"
//! ```
//!
//! ## Key Features
//!
//! - **Zero Allocation**: the segment is a slice of the input
//! - **Unicode whitespace**: splits on any `char::is_whitespace`, so tabs,
//!   newlines and no-break spaces from spreadsheet exports all separate words
//! - **No case or punctuation handling**: that is the normalizer's job
//!
//! ## Usage
//!
//! ```rust
//! use leadword_core::analyzer::tokenizer::first_segment;
//!
//! assert_eq!(first_segment("\tBanana split"), "Banana");
//! assert_eq!(first_segment("   "), "");
//! ```

/// Returns the first whitespace-delimited segment of `text`.
///
/// Returns an empty slice when `text` is empty or all whitespace.
#[inline]
#[must_use]
pub fn first_segment(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.find(char::is_whitespace) {
        Some(end) => &trimmed[..end],
        None => trimmed,
    }
}
