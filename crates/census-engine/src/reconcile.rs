//! Projection of region counts onto an expected schema.

use std::collections::HashMap;

use census_schema::ExpectedSchema;
use tracing::debug;

use crate::counts::RegionCounts;

/// What reconciliation changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Expected columns absent from the counts, filled with zeros.
    pub filled: usize,
    /// Count columns not in the expected schema, discarded.
    pub dropped: usize,
}

/// Reconcile `counts` with `expected`.
///
/// Without a schema the counts pass through unchanged. Otherwise the
/// result has exactly the expected columns in expected order: missing
/// ones are zero, unexpected ones are gone.
pub fn reconcile(
    counts: RegionCounts,
    expected: Option<&ExpectedSchema>,
) -> (RegionCounts, ReconcileStats) {
    let Some(schema) = expected else {
        return (counts, ReconcileStats::default());
    };

    let mut current: HashMap<&str, usize> = HashMap::with_capacity(counts.columns().len());
    for (i, name) in counts.columns().iter().enumerate() {
        current.entry(name.as_str()).or_insert(i);
    }

    let positions: Vec<Option<usize>> = schema
        .columns()
        .iter()
        .map(|name| current.get(name.as_str()).copied())
        .collect();
    let stats = ReconcileStats {
        filled: positions.iter().filter(|p| p.is_none()).count(),
        dropped: counts
            .columns()
            .iter()
            .filter(|name| !schema.contains(name))
            .count(),
    };
    debug!(
        expected = schema.len(),
        filled = stats.filled,
        dropped = stats.dropped,
        "reconciled counts with expected schema"
    );

    let reconciled = counts.remap(schema.columns().to_vec(), |row| {
        positions
            .iter()
            .map(|p| p.map_or(0, |i| row[i]))
            .collect()
    });
    (reconciled, stats)
}
