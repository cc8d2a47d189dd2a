//! Per-call aggregation metrics.
//!
//! [`AggregateMetrics`] describes a single
//! [`aggregate_with_metrics`](crate::CountAggregator::aggregate_with_metrics)
//! call: input sizes, how the schema was reconciled and how long it took.

use crate::encode::Encoding;

/// Sizes and timing collected during a single aggregation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AggregateMetrics {
    /// Wall-clock time for the entire call, in microseconds.
    pub total_us: u64,
    /// Rows in the region table, duplicates included.
    pub regions: usize,
    /// Rows in the feature table.
    pub features: usize,
    /// Rows in the link table.
    pub links: usize,
    /// Encoding used, `None` when the feature table was empty.
    pub encoding: Option<Encoding>,
    /// Indicator columns produced before reconciliation.
    pub indicator_columns: usize,
    /// Expected columns that had to be zero-filled.
    pub filled_columns: usize,
    /// Indicator columns discarded by reconciliation.
    pub dropped_columns: usize,
    /// Links whose feature key is not in the feature table.
    pub unmatched_links: usize,
    /// Columns in the returned embedding.
    pub output_columns: usize,
}
