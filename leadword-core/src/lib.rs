//! First-word frequency analysis.
//!
//! Extracts the first word of every description in an uploaded table, counts
//! how often each word leads a description, and ranks the result for a table
//! and a chart. Users can exclude words through an [`IgnoreSet`], group
//! words through a [`CategoryMap`], tag descriptions with product attributes
//! through [`AttributeRules`], and export the ranked table as delimited text.
//!
//! Pipeline:
//!
//! ```text
//! rows -> TextNormalizer -> Aggregator (+ IgnoreSet) -> Presenter -> Report
//! ```
//!
//! ```
//! use leadword_core::{aggregate, present, IgnoreSet};
//!
//! let mut ignore = IgnoreSet::new();
//! ignore.add("cat").unwrap();
//!
//! let table = aggregate(
//!     [Some("Cat food"), Some("Cat toy"), Some("Dog bone")],
//!     &ignore,
//! );
//! assert_eq!(table.ignored_rows(), 2);
//!
//! let ranked = present(&table);
//! assert_eq!(ranked[0].token.as_str(), "dog");
//! ```

pub mod analyzer;
pub mod attributes;
pub mod category;
pub mod export;
pub mod frequency;
pub mod ignore;
pub mod present;
pub mod session;
pub mod source;

pub use analyzer::{NormalizerConfig, TextNormalizer, Token};
pub use attributes::{AttributeCount, AttributeMatch, AttributeRules, Tags};
pub use category::{CategoryCount, CategoryMap};
pub use frequency::{aggregate, Aggregator, FrequencyTable, RowStats};
pub use ignore::IgnoreSet;
pub use present::{chart_series, present, Presentation, Presenter, RankedEntry};
pub use session::{Report, Session};
pub use source::{Record, RowSource, Table};

pub use leadword_types::{
    AnalysisConfig, AnalysisError, ChartPoint, ConfigError, Count, Rank, RuleError, TableError,
};
