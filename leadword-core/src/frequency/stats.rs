//! Row-accounting summary.

use crate::frequency::types::FrequencyTable;
use leadword_types::Count;

/// A snapshot of how the rows of one pass were bucketed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStats {
    /// Rows processed.
    pub total_rows: Count,
    /// Rows that contributed to a token count.
    pub counted_rows: Count,
    /// Rows excluded by the ignore set or the length filter.
    pub ignored_rows: Count,
    /// Rows with no extractable word.
    pub empty_rows: Count,
    /// Distinct counted tokens.
    pub distinct_tokens: usize,
}

impl FrequencyTable {
    /// Returns the row-accounting summary.
    pub fn stats(&self) -> RowStats {
        RowStats::from_table(self)
    }
}

impl RowStats {
    /// Constructs stats from a table.
    pub fn from_table(table: &FrequencyTable) -> Self {
        Self {
            total_rows: table.total_rows,
            counted_rows: table.counted_rows(),
            ignored_rows: table.ignored_rows,
            empty_rows: table.empty_rows,
            distinct_tokens: table.len(),
        }
    }

    /// Returns `true` if every row is accounted for exactly once.
    pub fn is_balanced(&self) -> bool {
        self.counted_rows + self.ignored_rows + self.empty_rows == self.total_rows
    }

    /// Share of rows that were counted, in `0.0..=1.0`.
    pub fn coverage(&self) -> f64 {
        if self.total_rows == 0 {
            return 0.0;
        }
        self.counted_rows as f64 / self.total_rows as f64
    }
}

impl core::fmt::Display for RowStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} rows, {} counted in {} words, {} ignored, {} empty",
            self.total_rows,
            self.counted_rows,
            self.distinct_tokens,
            self.ignored_rows,
            self.empty_rows
        )?;

        if self.total_rows > 0 {
            write!(f, " ({:.1}% coverage)", self.coverage() * 100.0)?;
        }

        Ok(())
    }
}
