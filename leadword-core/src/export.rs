//! Delimited-text export of a ranked table.
//!
//! Writes the same rows the report shows, one per ranked word, so the
//! result opens in any spreadsheet. Cells holding the delimiter, a quote or
//! a line break are quoted.

use crate::category::CategoryMap;
use crate::present::RankedEntry;
use csv::WriterBuilder;
use leadword_types::TableError;
use smallvec::SmallVec;
use std::io;

/// Header of the rank column.
pub const RANK_COLUMN: &str = "Rank";
/// Header of the word column.
pub const WORD_COLUMN: &str = "Word";
/// Header of the count column.
pub const COUNT_COLUMN: &str = "Count";
/// Header of the category column, present only when a map is given.
pub const CATEGORY_COLUMN: &str = "Category";

/// Writes `ranked` as delimited text with a header row.
///
/// With a category map, a fourth column holds each word's category, empty
/// for uncategorized words.
///
/// ```
/// use leadword_core::{aggregate, export, present, IgnoreSet};
///
/// let ranked = present(&aggregate([Some("b x"), Some("b y")], &IgnoreSet::new()));
/// let mut out = Vec::new();
/// export::write_ranked(&mut out, &ranked, None, b',').unwrap();
/// assert_eq!(String::from_utf8(out).unwrap().lines().nth(1), Some("1,b,2"));
/// ```
pub fn write_ranked<W: io::Write>(
    writer: W,
    ranked: &[RankedEntry],
    categories: Option<&CategoryMap>,
    delimiter: u8,
) -> Result<(), TableError> {
    if !delimiter.is_ascii() {
        return Err(TableError::NonAsciiDelimiter { byte: delimiter });
    }

    let mut out = WriterBuilder::new().delimiter(delimiter).from_writer(writer);

    let mut header: SmallVec<[&str; 4]> = SmallVec::new();
    header.extend([RANK_COLUMN, WORD_COLUMN, COUNT_COLUMN]);
    if categories.is_some() {
        header.push(CATEGORY_COLUMN);
    }
    out.write_record(header.iter()).map_err(write_failed)?;

    for entry in ranked {
        let rank = entry.rank.to_string();
        let count = entry.count.to_string();
        let mut record: SmallVec<[&str; 4]> = SmallVec::new();
        record.extend([rank.as_str(), entry.token.as_str(), count.as_str()]);
        if let Some(map) = categories {
            record.push(map.category_of(&entry.token).unwrap_or(""));
        }
        out.write_record(record.iter()).map_err(write_failed)?;
    }

    out.flush().map_err(|err| TableError::Write {
        message: err.to_string(),
    })?;
    tracing::debug!(rows = ranked.len(), "ranked table exported");
    Ok(())
}

fn write_failed(err: csv::Error) -> TableError {
    TableError::Write {
        message: err.to_string(),
    }
}
