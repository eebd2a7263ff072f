//! Attribute tagging.
//!
//! Independently of the first word, a description often names product
//! attributes such as a voltage ("110v", "220 volts"). [`AttributeRules`]
//! holds, per attribute, a list of variations, each recognized by a list of
//! literal patterns:
//!
//! ```text
//! Attribute | Variation | Patterns
//! Voltagem  | 110v      | 110v,110 v,110volts,110 volts
//! Voltagem  | 220v      | 220v,220 v,220volts,220 volts
//! ```
//!
//! A pattern matches when it occurs in the description as whole words,
//! ignoring case. Every attribute yields at most one value per row: the
//! labels of all matching variations, sorted, deduplicated and joined with
//! `/` ("110v/220v" for a bivolt product).

use crate::source::RowSource;
use leadword_types::{Count, RuleError};
use regex::{Regex, RegexBuilder};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Column holding the attribute name in a rule table.
pub const ATTRIBUTE_COLUMN: &str = "Attribute";
/// Column holding the variation label in a rule table.
pub const VARIATION_COLUMN: &str = "Variation";
/// Column holding the comma-separated patterns in a rule table.
pub const PATTERNS_COLUMN: &str = "Patterns";

#[derive(Debug, Clone)]
struct Variation {
    label: Box<str>,
    matcher: Regex,
}

#[derive(Debug, Clone)]
struct Attribute {
    name: Box<str>,
    variations: Vec<Variation>,
}

/// The value one attribute takes in one description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMatch {
    /// Attribute name.
    pub attribute: Box<str>,
    /// Matching variation labels, sorted and joined with `/`.
    pub value: String,
}

/// Rows carrying one attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeCount {
    /// Attribute name.
    pub attribute: Box<str>,
    /// Joined variation labels.
    pub value: Box<str>,
    /// Rows tagged with this value.
    pub count: Count,
}

/// Per-row tags; rule sets rarely define more than a few attributes.
pub type Tags = SmallVec<[AttributeMatch; 4]>;

/// Attribute -> variations -> patterns, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct AttributeRules {
    attributes: Vec<Attribute>,
}

impl AttributeRules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variation of `attribute` recognized by any of `patterns`.
    ///
    /// Names and patterns are trimmed; blank patterns are skipped. Variations
    /// of the same attribute accumulate in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::EmptyField`] when the attribute, the variation or
    /// every pattern is blank, and [`RuleError::Pattern`] when the combined
    /// patterns exceed the regex size limits.
    pub fn add<I, S>(&mut self, attribute: &str, variation: &str, patterns: I) -> Result<(), RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let attribute = attribute.trim();
        let variation = variation.trim();
        if attribute.is_empty() {
            return Err(RuleError::EmptyField { field: "attribute" });
        }
        if variation.is_empty() {
            return Err(RuleError::EmptyField { field: "variation" });
        }

        let matcher = compile(variation, patterns)?;
        let entry = Variation {
            label: variation.into(),
            matcher,
        };

        match self.attributes.iter_mut().find(|a| &*a.name == attribute) {
            Some(existing) => existing.variations.push(entry),
            None => self.attributes.push(Attribute {
                name: attribute.into(),
                variations: vec![entry],
            }),
        }
        Ok(())
    }

    /// Reads rules from a table with [`ATTRIBUTE_COLUMN`],
    /// [`VARIATION_COLUMN`] and [`PATTERNS_COLUMN`]; patterns are
    /// comma-separated.
    ///
    /// Rows with a null cell are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Source`] when a column is missing, or the first
    /// error from [`add`](Self::add) for a row whose patterns are all blank.
    pub fn from_source<S>(source: &S) -> Result<Self, RuleError>
    where
        S: RowSource + ?Sized,
    {
        let names = source.column(ATTRIBUTE_COLUMN)?;
        let variations = source.column(VARIATION_COLUMN)?;
        let patterns = source.column(PATTERNS_COLUMN)?;

        let mut rules = Self::new();
        for ((name, variation), list) in names.into_iter().zip(variations).zip(patterns) {
            if let (Some(name), Some(variation), Some(list)) = (name, variation, list) {
                rules.add(name, variation, list.split(','))?;
            }
        }
        Ok(rules)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no rule was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute names in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| &*a.name)
    }

    /// Tags one description. Attributes with no matching variation are
    /// absent from the result.
    pub fn tag(&self, description: &str) -> Tags {
        self.matches(description)
            .map(|(idx, value)| AttributeMatch {
                attribute: self.attributes[idx].name.clone(),
                value,
            })
            .collect()
    }

    /// Counts rows per attribute value.
    ///
    /// Sorted by attribute in insertion order, then count descending, then
    /// value ascending. Null rows and rows without a match are not counted.
    pub fn tally<'a, I>(&self, descriptions: I) -> Vec<AttributeCount>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut totals: FxHashMap<(usize, String), Count> = FxHashMap::default();
        for description in descriptions.into_iter().flatten() {
            for key in self.matches(description) {
                *totals.entry(key).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<(usize, AttributeCount)> = totals
            .into_iter()
            .map(|((idx, value), count)| {
                let count = AttributeCount {
                    attribute: self.attributes[idx].name.clone(),
                    value: value.into(),
                    count,
                };
                (idx, count)
            })
            .collect();
        counts.sort_unstable_by(|(ia, a), (ib, b)| {
            ia.cmp(ib)
                .then_with(|| b.count.cmp(&a.count))
                .then_with(|| a.value.cmp(&b.value))
        });
        counts.into_iter().map(|(_, count)| count).collect()
    }

    /// `(attribute index, joined labels)` for every attribute that matches.
    fn matches<'s>(&'s self, description: &'s str) -> impl Iterator<Item = (usize, String)> + 's {
        self.attributes
            .iter()
            .enumerate()
            .filter_map(move |(idx, attribute)| {
                let mut labels: SmallVec<[&str; 4]> = attribute
                    .variations
                    .iter()
                    .filter(|v| v.matcher.is_match(description))
                    .map(|v| &*v.label)
                    .collect();
                if labels.is_empty() {
                    return None;
                }
                labels.sort_unstable();
                labels.dedup();
                Some((idx, labels.join("/")))
            })
    }
}

/// Builds one case-insensitive whole-word matcher for all patterns.
fn compile<I, S>(variation: &str, patterns: I) -> Result<Regex, RuleError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let alternatives: Vec<String> = patterns
        .into_iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .filter(|p| !p.is_empty())
        .map(|p| regex::escape(&p))
        .collect();
    if alternatives.is_empty() {
        return Err(RuleError::EmptyField { field: "patterns" });
    }

    RegexBuilder::new(&format!(r"\b(?:{})\b", alternatives.join("|")))
        .case_insensitive(true)
        .build()
        .map_err(|e| RuleError::Pattern {
            variation: variation.to_string(),
            message: e.to_string(),
        })
}
