//! Input table types: [`Index`], [`RegionTable`], [`FeatureTable`],
//! [`TagColumn`], and [`LinkTable`].
//!
//! Tables carry only what counting needs. Identity names are kept
//! optional so that malformed inputs stay representable and can be
//! rejected by validation rather than by construction.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::SchemaError;
use crate::id::{Key, GEOMETRY_COLUMN};

/// A named, ordered list of keys identifying the rows of a table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    name: Option<String>,
    keys: Vec<Key>,
}

impl Index {
    /// Create a named index.
    pub fn new<K: Into<Key>>(name: impl Into<String>, keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            name: Some(name.into()),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an index without a name.
    pub fn unnamed<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            name: None,
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The identity name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Row keys in table order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// The regions counts are aggregated into.
///
/// Geometry is irrelevant to counting, so a region table is just its index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionTable {
    index: Index,
}

impl RegionTable {
    /// Wrap an index as a region table.
    pub fn new(index: Index) -> Self {
        Self { index }
    }

    /// The region identity.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Region keys in table order (duplicates preserved).
    pub fn keys(&self) -> &[Key] {
        self.index.keys()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Values of one tag column, one entry per feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagColumn {
    /// Categorical values; `None` is a missing tag.
    Categorical(Vec<Option<String>>),
    /// Boolean flags.
    Boolean(Vec<bool>),
}

impl TagColumn {
    /// Build a categorical column from optional string-like values.
    pub fn categorical<S: Into<String>>(values: impl IntoIterator<Item = Option<S>>) -> Self {
        Self::Categorical(values.into_iter().map(|v| v.map(Into::into)).collect())
    }

    /// Build a boolean column.
    pub fn boolean(values: impl IntoIterator<Item = bool>) -> Self {
        Self::Boolean(values.into_iter().collect())
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Categorical(v) => v.len(),
            Self::Boolean(v) => v.len(),
        }
    }

    /// Whether the column has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is a boolean column.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Whether row `row` holds a value. Booleans are always present.
    pub fn is_present(&self, row: usize) -> bool {
        match self {
            Self::Categorical(v) => v.get(row).is_some_and(Option::is_some),
            Self::Boolean(v) => row < v.len(),
        }
    }

    /// Label of row `row` as used in one-hot column names.
    ///
    /// Booleans label as `"true"` / `"false"`; missing values have no label.
    pub fn label(&self, row: usize) -> Option<&str> {
        match self {
            Self::Categorical(v) => v.get(row).and_then(|s| s.as_deref()),
            Self::Boolean(v) => v.get(row).map(|&b| if b { "true" } else { "false" }),
        }
    }
}

/// Features with their tag columns, in wide format.
///
/// Column order is insertion order. Every column has exactly one value
/// per feature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureTable {
    index: Index,
    columns: IndexMap<String, TagColumn>,
}

impl FeatureTable {
    /// Create a feature table with no columns.
    pub fn new(index: Index) -> Self {
        Self {
            index,
            columns: IndexMap::new(),
        }
    }

    /// Build a feature table from `(name, column)` pairs.
    pub fn from_columns<S: Into<String>>(
        index: Index,
        columns: impl IntoIterator<Item = (S, TagColumn)>,
    ) -> Result<Self, SchemaError> {
        columns
            .into_iter()
            .try_fold(Self::new(index), |table, (name, column)| {
                table.with_column(name, column)
            })
    }

    /// Append a column, checking its length and name.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        column: TagColumn,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        if column.len() != self.index.len() {
            return Err(SchemaError::ColumnLength {
                column: name,
                expected: self.index.len(),
                found: column.len(),
            });
        }
        if self.columns.contains_key(&name) {
            return Err(SchemaError::DuplicateColumn { column: name });
        }
        self.columns.insert(name, column);
        Ok(self)
    }

    /// The feature identity.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Feature keys in table order.
    pub fn keys(&self) -> &[Key] {
        self.index.keys()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&TagColumn> {
        self.columns.get(name)
    }

    /// All columns, including a geometry column if one is present.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &TagColumn)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Tag columns: every column except the geometry column.
    pub fn tag_columns(&self) -> impl Iterator<Item = (&str, &TagColumn)> {
        self.columns().filter(|(name, _)| *name != GEOMETRY_COLUMN)
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no features.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

/// Region-feature membership pairs under a two-level identity.
///
/// The level names are stored separately from the pairs so that an
/// identity with the wrong number of levels can still be expressed and
/// rejected by validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTable {
    level_names: SmallVec<[Option<String>; 2]>,
    pairs: Vec<(Key, Key)>,
}

impl LinkTable {
    /// Create a link table with a `(region, feature)` identity.
    pub fn new<R: Into<Key>, F: Into<Key>>(
        region_level: impl Into<String>,
        feature_level: impl Into<String>,
        pairs: impl IntoIterator<Item = (R, F)>,
    ) -> Self {
        Self::with_levels(
            [Some(region_level.into()), Some(feature_level.into())],
            pairs,
        )
    }

    /// Create a link table with arbitrary identity level names.
    pub fn with_levels<R: Into<Key>, F: Into<Key>>(
        level_names: impl IntoIterator<Item = Option<String>>,
        pairs: impl IntoIterator<Item = (R, F)>,
    ) -> Self {
        Self {
            level_names: level_names.into_iter().collect(),
            pairs: pairs
                .into_iter()
                .map(|(r, f)| (r.into(), f.into()))
                .collect(),
        }
    }

    /// Identity level names, region level first.
    pub fn level_names(&self) -> &[Option<String>] {
        &self.level_names
    }

    /// `(region, feature)` pairs in table order.
    pub fn pairs(&self) -> &[(Key, Key)] {
        &self.pairs
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no links.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::FEATURES_INDEX;
    use proptest::prelude::*;

    fn two_features() -> Index {
        Index::new(FEATURES_INDEX, ["a", "b"])
    }

    #[test]
    fn with_column_rejects_length_mismatch() {
        let err = FeatureTable::new(two_features())
            .with_column("amenity", TagColumn::categorical([Some("pub")]))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::ColumnLength {
                column: "amenity".into(),
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn with_column_rejects_duplicate_name() {
        let err = FeatureTable::from_columns(
            two_features(),
            [
                ("amenity", TagColumn::boolean([true, false])),
                ("amenity", TagColumn::boolean([false, false])),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn { .. }));
    }

    #[test]
    fn tag_columns_skip_geometry() {
        let table = FeatureTable::from_columns(
            two_features(),
            [
                ("leisure", TagColumn::categorical([Some("park"), None])),
                (
                    GEOMETRY_COLUMN,
                    TagColumn::categorical([Some("POINT (0 0)"), Some("POINT (1 1)")]),
                ),
                ("amenity", TagColumn::categorical::<String>([None, None])),
            ],
        )
        .unwrap();
        let names: Vec<&str> = table.tag_columns().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["leisure", "amenity"]);
        assert_eq!(table.columns().count(), 3);
    }

    #[test]
    fn labels_and_presence() {
        let cat = TagColumn::categorical([Some("pub"), None]);
        assert_eq!(cat.label(0), Some("pub"));
        assert_eq!(cat.label(1), None);
        assert!(cat.is_present(0));
        assert!(!cat.is_present(1));
        assert!(!cat.is_present(5));

        let flags = TagColumn::boolean([true, false]);
        assert_eq!(flags.label(0), Some("true"));
        assert_eq!(flags.label(1), Some("false"));
        assert!(flags.is_present(1));
        assert!(flags.is_boolean());
    }

    #[test]
    fn link_table_keeps_levels_and_pairs() {
        let links = LinkTable::new("region_id", "feature_id", [("r1", 3), ("r2", 4)]);
        assert_eq!(
            links.level_names(),
            &[Some("region_id".to_string()), Some("feature_id".to_string())]
        );
        assert_eq!(links.pairs()[1], (Key::from("r2"), Key::from(4)));
        assert_eq!(links.len(), 2);
    }

    proptest! {
        #[test]
        fn column_accepted_iff_length_matches(rows in 0usize..16, col_len in 0usize..16) {
            let index = Index::new(FEATURES_INDEX, (0..rows as i64).collect::<Vec<_>>());
            let result = FeatureTable::new(index)
                .with_column("flag", TagColumn::boolean(vec![true; col_len]));
            prop_assert_eq!(result.is_ok(), rows == col_len);
        }
    }
}
