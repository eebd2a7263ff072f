//! Analysis session.
//!
//! A [`Session`] owns the state that outlives a single pass: the ignore set,
//! the optional category map and the most recently loaded rows. Every user
//! action (upload, ignore-list edit, category change) re-runs the whole
//! pipeline over the stored rows and replaces the [`Report`]; nothing is
//! patched incrementally.
//!
//! Threading:
//! - Mutations take `&mut self`, so one pass never observes a half-edited
//!   ignore set. The aggregator and presenter only ever borrow it.

use crate::analyzer::{NormalizerConfig, TextNormalizer};
use crate::attributes::{AttributeCount, AttributeRules};
use crate::category::{Breakdown, CategoryMap};
use crate::frequency::{Aggregator, FrequencyTable, RowStats};
use crate::ignore::IgnoreSet;
use crate::present::{Presentation, Presenter, RankedEntry};
use crate::source::RowSource;
use leadword_types::{AnalysisConfig, AnalysisError, ChartPoint, ConfigError};
use tracing::{debug, info, warn};

/// Everything one analysis pass hands to the presentation surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Raw counts and row accounting.
    pub table: FrequencyTable,
    /// Ranked entries and chart series.
    pub presentation: Presentation,
    /// Per-category totals, when a category map is set.
    pub categories: Option<Breakdown>,
    /// Rows per attribute value, when attribute rules are set.
    pub attributes: Option<Vec<AttributeCount>>,
}

impl Report {
    /// Entries in display order.
    #[inline]
    pub fn ranked(&self) -> &[RankedEntry] {
        &self.presentation.ranked
    }

    /// Chart series in display order.
    #[inline]
    pub fn chart(&self) -> &[ChartPoint] {
        &self.presentation.chart
    }

    /// Row-accounting summary.
    pub fn stats(&self) -> RowStats {
        self.table.stats()
    }
}

/// Owner of the ignore set and the current analysis.
#[derive(Debug, Clone)]
pub struct Session {
    config: AnalysisConfig,
    aggregator: Aggregator,
    presenter: Presenter,
    ignore: IgnoreSet,
    categories: Option<CategoryMap>,
    attributes: Option<AttributeRules>,
    rows: Option<Vec<Option<Box<str>>>>,
    report: Option<Report>,
}

impl Session {
    /// Creates a session with an empty ignore set (or the default stopwords,
    /// if the config asks for them).
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`AnalysisConfig::validate`].
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let normalizer = TextNormalizer::new(NormalizerConfig {
            strip_diacritics: config.strip_diacritics,
        });
        let ignore = if config.seed_default_stopwords {
            IgnoreSet::with_default_stopwords(normalizer)
        } else {
            IgnoreSet::with_normalizer(normalizer)
        };

        debug!(?config, seeded = ignore.len(), "session created");
        Ok(Self {
            aggregator: Aggregator::from_config(&config),
            presenter: Presenter::from_config(&config),
            config,
            ignore,
            categories: None,
            attributes: None,
            rows: None,
            report: None,
        })
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Normalizer shared by the aggregator, the ignore set and category maps
    /// built for this session.
    #[inline]
    pub fn normalizer(&self) -> &TextNormalizer {
        self.ignore.normalizer()
    }

    /// Current ignore set.
    #[inline]
    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Most recent report, if rows have been loaded.
    #[inline]
    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Number of rows currently loaded.
    pub fn loaded_rows(&self) -> Option<usize> {
        self.rows.as_ref().map(Vec::len)
    }

    /// Loads the description column from `source` and analyzes it.
    ///
    /// On failure the previous rows and report are dropped, so no stale
    /// result outlives a rejected upload.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingColumn`] if the source lacks the
    /// configured column.
    pub fn load<S>(&mut self, source: &S) -> Result<&Report, AnalysisError>
    where
        S: RowSource + ?Sized,
    {
        let column = self.config.description_column.as_str();
        let values = match source.column(column) {
            Ok(values) => values,
            Err(err) => {
                warn!(%err, "rejected upload");
                self.rows = None;
                self.report = None;
                return Err(err);
            }
        };

        let rows: Vec<Option<Box<str>>> = values.into_iter().map(|v| v.map(Box::from)).collect();
        info!(rows = rows.len(), column, "loaded rows");

        let report = self.run(&rows);
        self.rows = Some(rows);
        Ok(self.report.insert(report))
    }

    /// Adds an ignore word and re-analyzes the loaded rows.
    ///
    /// Returns `true` if the word was newly added.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidIgnoreWord`] if the word has no
    /// extractable token; nothing changes in that case.
    pub fn add_ignore(&mut self, word: &str) -> Result<bool, AnalysisError> {
        let added = self.ignore.add(word)?;
        if added {
            self.rebuild();
        }
        Ok(added)
    }

    /// Removes an ignore word and re-analyzes the loaded rows.
    ///
    /// Returns `true` if the word was present.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidIgnoreWord`] if the word has no
    /// extractable token.
    pub fn remove_ignore(&mut self, word: &str) -> Result<bool, AnalysisError> {
        let removed = self.ignore.remove(word)?;
        if removed {
            self.rebuild();
        }
        Ok(removed)
    }

    /// Adds several ignore words at once (all or none) and re-analyzes.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidIgnoreWord`] for the first unusable
    /// word; nothing changes in that case.
    pub fn extend_ignore<I, S>(&mut self, words: I) -> Result<usize, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let added = self.ignore.extend(words)?;
        if added > 0 {
            self.rebuild();
        }
        Ok(added)
    }

    /// Empties the ignore set and re-analyzes.
    pub fn clear_ignore(&mut self) {
        if self.ignore.is_empty() {
            return;
        }
        self.ignore.clear();
        self.rebuild();
    }

    /// Replaces the category map and re-analyzes.
    ///
    /// The map is re-keyed with the session's normalizer, so its words fold
    /// exactly like the counted tokens.
    pub fn set_categories(&mut self, categories: Option<CategoryMap>) {
        let normalizer = *self.normalizer();
        self.categories = categories.map(|map| map.with_normalizer(normalizer));
        self.rebuild();
    }

    /// Current category map, keyed with the session's normalizer.
    pub fn categories(&self) -> Option<&CategoryMap> {
        self.categories.as_ref()
    }

    /// Replaces the attribute rules and re-analyzes.
    pub fn set_attributes(&mut self, attributes: Option<AttributeRules>) {
        self.attributes = attributes;
        self.rebuild();
    }

    /// Current attribute rules.
    pub fn attributes(&self) -> Option<&AttributeRules> {
        self.attributes.as_ref()
    }

    /// Runs the pipeline over `descriptions` with the current ignore set,
    /// without storing anything.
    pub fn analyze<S: AsRef<str>>(&self, descriptions: &[Option<S>]) -> Report {
        let rows = || descriptions.iter().map(as_str);

        let table = self.aggregator.aggregate(rows(), &self.ignore);
        let presentation = self.presenter.present(&table);
        let categories = self
            .categories
            .as_ref()
            .map(|map| map.breakdown(&presentation.ranked));
        let attributes = self.attributes.as_ref().map(|rules| rules.tally(rows()));

        Report {
            table,
            presentation,
            categories,
            attributes,
        }
    }

    fn run(&self, rows: &[Option<Box<str>>]) -> Report {
        let report = self.analyze(rows);
        debug!(stats = %report.stats(), "analysis pass");
        report
    }

    fn rebuild(&mut self) {
        let Some(rows) = &self.rows else {
            return;
        };
        let report = self.run(rows);
        self.report = Some(report);
    }
}

fn as_str<S: AsRef<str>>(description: &Option<S>) -> Option<&str> {
    description.as_ref().map(AsRef::as_ref)
}
