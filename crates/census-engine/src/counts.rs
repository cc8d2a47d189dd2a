//! Link join and per-region summation.

use std::collections::HashMap;

use census_core::{FeatureTable, Key, LinkTable};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::encode::IndicatorTable;

/// Per-region sums of every indicator column.
///
/// Rows are kept in first-linked order; only regions that appear in at
/// least one link have a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionCounts {
    columns: Vec<String>,
    rows: IndexMap<Key, Vec<i64>>,
}

impl RegionCounts {
    /// Counts with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: IndexMap::new(),
        }
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Counts of `region`, if any link referenced it.
    pub fn row(&self, region: &Key) -> Option<&[i64]> {
        self.rows.get(region).map(Vec::as_slice)
    }

    /// Regions with a row, in first-linked order.
    pub fn regions(&self) -> impl Iterator<Item = &Key> {
        self.rows.keys()
    }

    /// Number of regions with a row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no region has a row.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace the column layout.
    ///
    /// `project` receives each old row and returns the new one.
    pub(crate) fn remap<F>(self, columns: Vec<String>, mut project: F) -> Self
    where
        F: FnMut(&[i64]) -> Vec<i64>,
    {
        let rows = self
            .rows
            .into_iter()
            .map(|(region, row)| {
                let row = project(&row);
                (region, row)
            })
            .collect();
        Self { columns, rows }
    }
}

/// Result of joining links to features.
#[derive(Clone, Debug)]
pub struct JoinedCounts {
    /// Per-region indicator sums.
    pub counts: RegionCounts,
    /// Links whose feature key is absent from the feature table.
    pub unmatched_links: usize,
}

/// Join every link to the indicator rows of its feature and sum per
/// region.
///
/// A feature key occurring on several feature rows contributes every one
/// of them. A link to an unknown feature still gives its region a row but
/// adds nothing to it.
pub fn count_by_region(
    links: &LinkTable,
    features: &FeatureTable,
    indicators: &IndicatorTable,
) -> JoinedCounts {
    let mut feature_rows: HashMap<&Key, SmallVec<[usize; 1]>> =
        HashMap::with_capacity(features.len());
    for (row, key) in features.keys().iter().enumerate() {
        feature_rows.entry(key).or_default().push(row);
    }

    let width = indicators.width();
    let mut counts = RegionCounts::new(indicators.columns().to_vec());
    let mut unmatched_links = 0;

    for (region, feature) in links.pairs() {
        let sums = counts
            .rows
            .entry(region.clone())
            .or_insert_with(|| vec![0; width]);
        let Some(rows) = feature_rows.get(feature) else {
            unmatched_links += 1;
            continue;
        };
        for &row in rows {
            for &slot in indicators.row(row) {
                sums[slot as usize] += 1;
            }
        }
    }

    JoinedCounts {
        counts,
        unmatched_links,
    }
}
