//! Core types, errors and configuration for leadword.
//!
//! This crate holds everything that the analysis core and its callers
//! (upload handlers, the CLI, chart surfaces) need to agree on without
//! depending on the analysis code itself:
//!
//! - **Counters**: [`Count`] and [`Rank`] aliases sized for row accounting
//! - **Errors**: [`AnalysisError`] for the two in-core failure modes, plus
//!   [`TableError`] and [`RuleError`] for the input surfaces around it
//! - **Configuration**: [`AnalysisConfig`] with presets and validation
//! - **Chart shape**: [`ChartPoint`], the unit a chart widget consumes

#![warn(missing_docs)]

use core::fmt;
use thiserror::Error;

/// Row and frequency counter.
///
/// 64 bits so that `total_rows` can never overflow for any file that fits
/// in memory.
pub type Count = u64;

/// 1-based display rank assigned by the presenter.
pub type Rank = u32;

/// Default name of the description column.
pub const DESCRIPTION_COLUMN: &str = "Description";

/// Errors surfaced by the analysis core.
///
/// Both variants propagate to whatever triggered the pass (upload handler or
/// ignore-edit handler); the core never recovers from them on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A record has no field with the requested column name.
    #[error("row {row} has no '{column}' column")]
    MissingColumn {
        /// The column that was looked up.
        column: String,
        /// 0-based index of the first record lacking the column.
        row: usize,
    },
    /// An ignore-list edit normalized to the empty token.
    #[error("ignore word {input:?} contains no word characters")]
    InvalidIgnoreWord {
        /// The raw user input, kept for messaging.
        input: String,
    },
}

/// Errors reading or writing delimited text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Delimiters must be single ASCII bytes so cells split on char
    /// boundaries.
    #[error("delimiter byte 0x{byte:02X} is not ASCII")]
    NonAsciiDelimiter {
        /// The rejected byte.
        byte: u8,
    },
    /// The text could not be split into records.
    #[error("malformed delimited text at line {line}: {message}")]
    Malformed {
        /// 1-based line of the offending record, 0 if unknown.
        line: u64,
        /// Parser message.
        message: String,
    },
    /// Writing an export failed.
    #[error("cannot write delimited text: {message}")]
    Write {
        /// Underlying I/O or encoder message.
        message: String,
    },
}

/// Errors building attribute rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// A rule is missing its attribute name, variation label or patterns.
    #[error("attribute rule has an empty {field}")]
    EmptyField {
        /// Which part of the rule was blank.
        field: &'static str,
    },
    /// The patterns of a variation did not compile.
    #[error("patterns for variation {variation:?} do not compile: {message}")]
    Pattern {
        /// Variation label the patterns belong to.
        variation: String,
        /// Regex compiler message.
        message: String,
    },
    /// The rule table lacks a required column.
    #[error(transparent)]
    Source(#[from] AnalysisError),
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `min_token_len` must be at least 1.
    #[error("min_token_len must be at least 1")]
    ZeroMinTokenLen,
    /// `chart_limit` of zero would produce an empty chart.
    #[error("chart_limit must be at least 1 when set")]
    ZeroChartLimit,
    /// The description column name is blank.
    #[error("description column name is empty")]
    EmptyColumn,
}

/// Analysis configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Name of the column holding descriptions.
    pub description_column: String,
    /// Fold Latin diacritics during normalization ("Café" -> "cafe").
    pub strip_diacritics: bool,
    /// Tokens with fewer characters than this are excluded and counted as
    /// ignored. Default: 1 (no length filtering).
    pub min_token_len: usize,
    /// Keep only the first N chart points. Default: `None` (all).
    pub chart_limit: Option<usize>,
    /// Seed new ignore sets with the built-in stopword list.
    pub seed_default_stopwords: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            description_column: DESCRIPTION_COLUMN.to_string(),
            strip_diacritics: false,
            min_token_len: 1,
            chart_limit: None,
            seed_default_stopwords: false,
        }
    }
}

impl AnalysisConfig {
    /// Behaves like the spreadsheet tool this crate grew out of: stopwords
    /// preloaded, words under 3 characters dropped, top 20 charted.
    pub fn catalog() -> Self {
        Self {
            min_token_len: 3,
            chart_limit: Some(20),
            seed_default_stopwords: true,
            ..Self::default()
        }
    }

    /// Uses a different description column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.description_column = column.into();
        self
    }

    /// Checks field ranges.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.description_column.trim().is_empty() {
            return Err(ConfigError::EmptyColumn);
        }
        if self.min_token_len == 0 {
            return Err(ConfigError::ZeroMinTokenLen);
        }
        if self.chart_limit == Some(0) {
            return Err(ConfigError::ZeroChartLimit);
        }
        Ok(())
    }
}

/// One bar of a frequency chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartPoint {
    /// Bar label (the token text).
    pub label: Box<str>,
    /// Bar height.
    pub value: Count,
}

impl ChartPoint {
    /// Creates a chart point.
    #[inline]
    pub fn new(label: impl Into<Box<str>>, value: Count) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl fmt::Display for ChartPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.label, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.description_column, DESCRIPTION_COLUMN);
        assert_eq!(config.min_token_len, 1);
        assert_eq!(config.chart_limit, None);
    }

    #[test]
    fn catalog_preset() {
        let config = AnalysisConfig::catalog();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_token_len, 3);
        assert_eq!(config.chart_limit, Some(20));
        assert!(config.seed_default_stopwords);
    }

    #[test]
    fn rejects_zero_min_len() {
        let config = AnalysisConfig {
            min_token_len: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinTokenLen));
    }

    #[test]
    fn rejects_zero_chart_limit() {
        let config = AnalysisConfig {
            chart_limit: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroChartLimit));
    }

    #[test]
    fn rejects_blank_column() {
        let config = AnalysisConfig::default().with_column("  ");
        assert_eq!(config.validate(), Err(ConfigError::EmptyColumn));
    }

    #[test]
    fn error_messages() {
        let missing = AnalysisError::MissingColumn {
            column: "Description".into(),
            row: 4,
        };
        assert_eq!(missing.to_string(), "row 4 has no 'Description' column");

        let invalid = AnalysisError::InvalidIgnoreWord { input: "!!".into() };
        assert!(invalid.to_string().contains("\"!!\""));
    }

    #[test]
    fn table_error_messages() {
        let err = TableError::NonAsciiDelimiter { byte: 0xA7 };
        assert_eq!(err.to_string(), "delimiter byte 0xA7 is not ASCII");

        let err = TableError::Malformed {
            line: 3,
            message: "bad quote".into(),
        };
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn rule_error_wraps_missing_column() {
        let err: RuleError = AnalysisError::MissingColumn {
            column: "Patterns".into(),
            row: 0,
        }
        .into();
        assert_eq!(err.to_string(), "row 0 has no 'Patterns' column");
        assert_eq!(
            RuleError::EmptyField { field: "variation" }.to_string(),
            "attribute rule has an empty variation"
        );
    }

    #[test]
    fn chart_point_display() {
        assert_eq!(ChartPoint::new("apple", 2).to_string(), "apple=2");
    }
}
