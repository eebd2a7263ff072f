//! Text analysis pipeline.
//!
//! This module provides the first-word extraction components:
//! - **Tokenizer**: Finds the leading whitespace-delimited segment
//! - **Normalizer**: Case-folds the segment and strips edge punctuation
//! - **Token**: The canonical result both stages produce

pub mod normalizer;
pub mod token;
pub mod tokenizer;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use token::Token;
pub use tokenizer::first_segment;
