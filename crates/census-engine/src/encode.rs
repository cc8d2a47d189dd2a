//! Per-feature indicator encoding.
//!
//! Turns the tag columns of a [`FeatureTable`] into a sparse 0/1
//! [`IndicatorTable`]: for each feature, the indicator slots it sets. The
//! [`Encoding`] is chosen from the counting mode and the tag column types:
//!
//! | `count_subcategories` | all boolean | encoding |
//! |---|---|---|
//! | on | no | [`Encoding::OneHot`] |
//! | on | yes | rejected |
//! | off | yes | [`Encoding::Flag`] |
//! | off | no | [`Encoding::Presence`] |

use census_core::{FeatureTable, InputError, TagColumn};
use census_schema::naming::flat_column;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// Set indicator slots of one feature, ascending and unique.
type SetSlots = SmallVec<[u32; 4]>;

/// How tag columns become indicator columns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    /// One indicator per observed `tag_value` name.
    OneHot,
    /// One indicator per boolean tag column, equal to the flag.
    Flag,
    /// One indicator per tag column, 1 when the value is present.
    Presence,
}

impl Encoding {
    /// Pick the encoding for a counting mode and column typing.
    pub fn select(count_subcategories: bool, all_boolean: bool) -> Result<Self, InputError> {
        match (count_subcategories, all_boolean) {
            (true, true) => Err(InputError::SubcategoriesOfBooleanColumns),
            (true, false) => Ok(Self::OneHot),
            (false, true) => Ok(Self::Flag),
            (false, false) => Ok(Self::Presence),
        }
    }
}

/// Whether every tag column is boolean.
///
/// Vacuously true for a table without tag columns.
pub fn all_boolean(features: &FeatureTable) -> bool {
    features.tag_columns().all(|(_, column)| column.is_boolean())
}

/// Sparse 0/1 matrix: one row per feature, one column per distinct
/// indicator name. Each row lists only the slots that are 1, so memory
/// follows the number of set cells rather than `rows × width`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndicatorTable {
    columns: Vec<String>,
    rows: Vec<SetSlots>,
}

impl IndicatorTable {
    /// Indicator column names, all distinct.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of indicator columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Number of feature rows.
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Slots set on feature row `row`, ascending.
    ///
    /// # Panics
    ///
    /// Panics if `row >= self.rows()`.
    pub fn row(&self, row: usize) -> &[u32] {
        &self.rows[row]
    }

    /// Whether slot `slot` is set on feature row `row`.
    pub fn is_set(&self, row: usize, slot: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|slots| slots.iter().any(|&s| s as usize == slot))
    }
}

/// Encode the tag columns of `features`.
pub fn encode_features(features: &FeatureTable, encoding: Encoding) -> IndicatorTable {
    let tags: Vec<(&str, &TagColumn)> = features.tag_columns().collect();
    let rows = features.len();

    match encoding {
        Encoding::OneHot => one_hot(&tags, rows),
        Encoding::Flag => per_column(&tags, rows, |column, row| {
            matches!(column, TagColumn::Boolean(flags) if flags[row])
        }),
        Encoding::Presence => per_column(&tags, rows, TagColumn::is_present),
    }
}

/// One indicator per tag column, set where `indicator` holds.
///
/// Tag column names are unique, so slot `i` is column `i`.
fn per_column<F>(tags: &[(&str, &TagColumn)], rows: usize, indicator: F) -> IndicatorTable
where
    F: Fn(&TagColumn, usize) -> bool,
{
    let set = (0..rows)
        .map(|row| {
            tags.iter()
                .enumerate()
                .filter(|(_, (_, column))| indicator(*column, row))
                .map(|(slot, _)| slot as u32)
                .collect::<SetSlots>()
        })
        .collect();
    IndicatorTable {
        columns: tags.iter().map(|(name, _)| (*name).to_owned()).collect(),
        rows: set,
    }
}

/// Two-pass one-hot expansion.
///
/// Pass 1 names every observed `(column, label)` pair and gives each
/// distinct *name* one slot, in first-observed order; pairs that spell the
/// same name (`a_b` + `c`, `a` + `b_c`) share it. Pass 2 lists, per
/// feature, the slots of its labelled cells. Missing values get no slot.
fn one_hot(tags: &[(&str, &TagColumn)], rows: usize) -> IndicatorTable {
    let mut names: IndexMap<String, u32> = IndexMap::new();
    let mut slots: Vec<IndexMap<&str, u32>> = Vec::with_capacity(tags.len());

    for (name, column) in tags {
        let mut labels = IndexMap::new();
        for row in 0..rows {
            if let Some(label) = column.label(row) {
                labels.entry(label).or_insert_with(|| {
                    let next = names.len() as u32;
                    *names.entry(flat_column(name, label)).or_insert(next)
                });
            }
        }
        slots.push(labels);
    }

    let set = (0..rows)
        .map(|row| {
            let mut set: SetSlots = tags
                .iter()
                .zip(&slots)
                .filter_map(|((_, column), labels)| {
                    column.label(row).and_then(|label| labels.get(label).copied())
                })
                .collect();
            set.sort_unstable();
            set.dedup();
            set
        })
        .collect();

    IndicatorTable {
        columns: names.into_keys().collect(),
        rows: set,
    }
}
