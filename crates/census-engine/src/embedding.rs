//! The aggregation output: one `i32` count vector per region.

use census_core::{Key, RegionTable};
use indexmap::IndexSet;

use crate::counts::RegionCounts;

/// Per-region feature counts.
///
/// Rows follow the first occurrence of each distinct key in the region
/// table. Values are stored row-major in a single buffer of
/// `len() * columns().len()` entries, the fixed-width layout downstream
/// models consume.
///
/// # Examples
///
/// ```
/// use census_core::{FeatureTable, Index, Key, LinkTable, RegionTable, TagColumn};
/// use census_engine::CountAggregator;
///
/// let regions = RegionTable::new(Index::new("region_id", ["r1", "r2"]));
/// let features = FeatureTable::from_columns(
///     Index::new("feature_id", ["f1"]),
///     [("amenity", TagColumn::categorical([Some("pub")]))],
/// )
/// .unwrap();
/// let links = LinkTable::new("region_id", "feature_id", [("r2", "f1")]);
///
/// let embedding = CountAggregator::default()
///     .aggregate(&regions, &features, &links)
///     .unwrap();
/// assert_eq!(embedding.columns(), ["amenity_pub"]);
/// assert_eq!(embedding.get(&Key::from("r2"), "amenity_pub"), Some(1));
/// assert_eq!(embedding.row(&Key::from("r1")), Some(&[0][..]));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Embedding {
    index_name: String,
    columns: Vec<String>,
    regions: IndexSet<Key>,
    values: Vec<i32>,
}

impl Embedding {
    /// Every region, every column, all zeros.
    pub(crate) fn zeros(index_name: &str, regions: &RegionTable, columns: Vec<String>) -> Self {
        let regions: IndexSet<Key> = regions.keys().iter().cloned().collect();
        let values = vec![0; regions.len() * columns.len()];
        Self {
            index_name: index_name.to_owned(),
            columns,
            regions,
            values,
        }
    }

    /// Left-join `counts` onto the regions, filling absent regions with
    /// zeros and saturating each count to `i32`.
    pub(crate) fn from_counts(index_name: &str, regions: &RegionTable, counts: RegionCounts) -> Self {
        let mut embedding = Self::zeros(index_name, regions, counts.columns().to_vec());
        let width = embedding.columns.len();
        for (slot, region) in embedding.regions.iter().enumerate() {
            if let Some(row) = counts.row(region) {
                let out = &mut embedding.values[slot * width..(slot + 1) * width];
                for (cell, &count) in out.iter_mut().zip(row) {
                    *cell = saturate(count);
                }
            }
        }
        embedding
    }

    /// Identity name of the region index.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Output column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Region keys in row order.
    pub fn regions(&self) -> impl ExactSizeIterator<Item = &Key> {
        self.regions.iter()
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Counts of `region`.
    pub fn row(&self, region: &Key) -> Option<&[i32]> {
        self.regions
            .get_index_of(region)
            .map(|slot| self.row_at(slot))
    }

    /// Count of `column` in `region`. The first column of that name wins.
    pub fn get(&self, region: &Key, column: &str) -> Option<i32> {
        let col = self.column_index(column)?;
        self.row(region).map(|row| row[col])
    }

    /// Every region's count of `column`, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<i32>> {
        let col = self.column_index(name)?;
        Some((0..self.len()).map(|slot| self.row_at(slot)[col]).collect())
    }

    /// `(region, counts)` pairs in row order.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &[i32])> {
        self.regions
            .iter()
            .enumerate()
            .map(|(slot, region)| (region, self.row_at(slot)))
    }

    /// Flat row-major count buffer.
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    /// Copy with rows in ascending key order.
    pub fn sorted_by_region(&self) -> Self {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&a, &b| self.regions[a].cmp(&self.regions[b]));

        let mut regions = IndexSet::with_capacity(self.len());
        let mut values = Vec::with_capacity(self.values.len());
        for slot in order {
            regions.insert(self.regions[slot].clone());
            values.extend_from_slice(self.row_at(slot));
        }
        Self {
            index_name: self.index_name.clone(),
            columns: self.columns.clone(),
            regions,
            values,
        }
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn row_at(&self, slot: usize) -> &[i32] {
        let width = self.columns.len();
        &self.values[slot * width..(slot + 1) * width]
    }
}

fn saturate(count: i64) -> i32 {
    i32::try_from(count).unwrap_or(if count < 0 { i32::MIN } else { i32::MAX })
}
