//! Row sources.
//!
//! The analysis core only needs one capability from uploaded data: "give me
//! the values of a named column, each a string or null". [`RowSource`]
//! expresses that; [`Record`] is the per-row form of the same capability for
//! callers that already hold one map per row.
//!
//! [`Table`] is a small in-memory source for delimited text (CSV or TSV
//! exports of a spreadsheet, quoted fields included). Reading binary
//! workbooks is left to the caller.

use csv::ReaderBuilder;
use leadword_types::{AnalysisError, TableError};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// A single row exposing named string-or-null fields.
pub trait Record {
    /// Looks up a field.
    ///
    /// Returns `None` when the row has no such field at all, and
    /// `Some(None)` when the field exists but holds a null value.
    fn field(&self, name: &str) -> Option<Option<&str>>;
}

impl<S: BuildHasher> Record for HashMap<String, Option<String>, S> {
    fn field(&self, name: &str) -> Option<Option<&str>> {
        self.get(name).map(Option::as_deref)
    }
}

impl Record for BTreeMap<String, Option<String>> {
    fn field(&self, name: &str) -> Option<Option<&str>> {
        self.get(name).map(Option::as_deref)
    }
}

/// A finite, ordered collection of rows.
pub trait RowSource {
    /// Returns the values of `column` in row order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::MissingColumn`] when the rows do not expose
    /// the column. Sources never guess an alternate column.
    fn column<'a>(&'a self, name: &str) -> Result<Vec<Option<&'a str>>, AnalysisError>;
}

impl<R: Record> RowSource for [R] {
    fn column<'a>(&'a self, name: &str) -> Result<Vec<Option<&'a str>>, AnalysisError> {
        descriptions(self, name)
    }
}

impl<R: Record> RowSource for Vec<R> {
    fn column<'a>(&'a self, name: &str) -> Result<Vec<Option<&'a str>>, AnalysisError> {
        descriptions(self.as_slice(), name)
    }
}

/// Collects `column` from every record.
///
/// # Errors
///
/// Fails on the first record lacking the field, reporting its index.
pub fn descriptions<'a, R, I>(records: I, column: &str) -> Result<Vec<Option<&'a str>>, AnalysisError>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            record.field(column).ok_or_else(|| AnalysisError::MissingColumn {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}

/// In-memory table with a header row.
///
/// Cells are string-or-null; blank cells are null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<Box<str>>,
    rows: Vec<Vec<Option<Box<str>>>>,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            header: header.into_iter().map(|h| h.as_ref().trim().into()).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing trailing cells read as null; extra cells are
    /// kept but unreachable by name.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = Option<S>>,
        S: AsRef<str>,
    {
        let row = cells
            .into_iter()
            .map(|cell| cell.and_then(|c| non_blank(c.as_ref())))
            .collect();
        self.rows.push(row);
    }

    /// Parses delimited text: the first record is the header, each following
    /// record a row.
    ///
    /// Fields may be quoted with `"` (RFC 4180), so quoted cells can hold the
    /// delimiter, line breaks and doubled quotes. Records may end in `\n` or
    /// `\r\n`; a leading UTF-8 byte-order mark is dropped; records whose
    /// cells are all blank are skipped. Short records read as null in the
    /// missing columns.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NonAsciiDelimiter`] if `delimiter` is not ASCII,
    /// and [`TableError::Malformed`] if the text cannot be split into records.
    pub fn parse_delimited(text: &str, delimiter: u8) -> Result<Self, TableError> {
        if !delimiter.is_ascii() {
            return Err(TableError::NonAsciiDelimiter { byte: delimiter });
        }

        let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records().filter(|record| match record {
            Ok(record) => record.iter().any(|cell| !cell.trim().is_empty()),
            Err(_) => true,
        });

        let Some(header) = records.next() else {
            return Ok(Self::default());
        };
        let mut table = Self::new(&header.map_err(malformed)?);

        for record in records {
            table.push_row(record.map_err(malformed)?.iter().map(Some));
        }
        Ok(table)
    }

    /// Column names in order.
    #[inline]
    pub fn header(&self) -> &[Box<str>] {
        &self.header
    }

    /// Returns `true` if the header names `column`.
    pub fn has_column(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    /// Number of data rows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no data rows.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| &**h == column)
    }
}

impl RowSource for Table {
    /// Checks the header, so a table without the column fails even when it
    /// has no rows.
    fn column<'a>(&'a self, name: &str) -> Result<Vec<Option<&'a str>>, AnalysisError> {
        let idx = self.position(name).ok_or_else(|| AnalysisError::MissingColumn {
            column: name.to_string(),
            row: 0,
        })?;

        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).and_then(|cell| cell.as_deref()))
            .collect())
    }
}

fn non_blank(cell: &str) -> Option<Box<str>> {
    (!cell.trim().is_empty()).then(|| cell.into())
}

fn malformed(err: csv::Error) -> TableError {
    TableError::Malformed {
        line: err.position().map_or(0, |pos| pos.line()),
        message: err.to_string(),
    }
}
