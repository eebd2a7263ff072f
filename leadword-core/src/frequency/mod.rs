//! First-word frequency aggregation.
//!
//! Turns a sequence of descriptions into a [`FrequencyTable`]: a token ->
//! count mapping plus row accounting (total, ignored, empty).
//!
//! Tables are rebuilt from scratch on every pass. There is no incremental
//! update path; a changed ignore list or a new upload simply means calling
//! [`Aggregator::aggregate`] again.

mod aggregate;
mod stats;
mod types;

pub use aggregate::{aggregate, Aggregator};
pub use stats::RowStats;
pub use types::FrequencyTable;
