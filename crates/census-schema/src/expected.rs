//! Compilation of [`ExpectedFeatures`] into a frozen [`ExpectedSchema`].
//!
//! Compilation happens once, when an aggregator is constructed. Filters
//! compile to a sorted, deduplicated column list; explicit lists are
//! kept verbatim. An empty result means "no expected schema".

use std::collections::BTreeSet;

use census_core::InputError;
use tracing::debug;

use crate::naming::{grouped_column, tag_value_column, FLAT_DELIMITER, GROUPED_DELIMITER};
use crate::spec::{ExpectedFeatures, GroupedTagFilter, TagFilter, TagFilterValue};

/// Ordered list of output columns every aggregation must produce.
///
/// # Examples
///
/// ```
/// use census_schema::{ExpectedFeatures, ExpectedSchema, TagFilterValue};
///
/// let features = ExpectedFeatures::flat([
///     ("leisure", TagFilterValue::from("park")),
///     ("amenity", TagFilterValue::values(["pub", "bar"])),
/// ]);
/// let schema = ExpectedSchema::compile(Some(&features), true).unwrap().unwrap();
/// assert_eq!(schema.columns(), ["amenity_bar", "amenity_pub", "leisure_park"]);
///
/// let keys_only = ExpectedSchema::compile(Some(&features), false).unwrap().unwrap();
/// assert_eq!(keys_only.columns(), ["amenity", "leisure"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedSchema {
    columns: Vec<String>,
}

impl ExpectedSchema {
    /// Compile expected features for the given counting mode.
    ///
    /// Returns `Ok(None)` when nothing was given or when the features
    /// compile to no columns at all.
    pub fn compile(
        features: Option<&ExpectedFeatures>,
        count_subcategories: bool,
    ) -> Result<Option<Self>, InputError> {
        let columns = match features {
            None => return Ok(None),
            Some(ExpectedFeatures::ExplicitList(names)) => names.clone(),
            Some(ExpectedFeatures::FlatFilter(filter)) => {
                parse_tag_filter(filter, count_subcategories, FLAT_DELIMITER)?
            }
            Some(ExpectedFeatures::GroupedFilter(groups)) => {
                parse_grouped_filter(groups, count_subcategories)?
            }
        };

        if columns.is_empty() {
            debug!("expected features compiled to no columns; schema left unset");
            return Ok(None);
        }
        debug!(
            columns = columns.len(),
            count_subcategories, "compiled expected schema"
        );
        Ok(Some(Self { columns }))
    }

    /// Output columns in their required order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of output columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`: an empty schema is never constructed.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether `column` is part of the schema.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// Column names produced by a flat filter.
///
/// Without subcategories the tag keys themselves; with subcategories one
/// `key{delimiter}value` per allowed value. A `true` entry cannot be
/// expanded and is rejected; a `false` entry contributes nothing.
fn parse_tag_filter(
    filter: &TagFilter,
    count_subcategories: bool,
    delimiter: char,
) -> Result<Vec<String>, InputError> {
    let mut columns = BTreeSet::new();

    if !count_subcategories {
        columns.extend(filter.keys().cloned());
    } else {
        for (key, value) in filter {
            match value {
                TagFilterValue::Bool(true) => {
                    return Err(InputError::AmbiguousBooleanFilter { key: key.clone() });
                }
                TagFilterValue::Bool(false) => {}
                TagFilterValue::Value(v) => {
                    columns.insert(tag_value_column(key, v, delimiter));
                }
                TagFilterValue::Values(vs) => {
                    columns.extend(vs.iter().map(|v| tag_value_column(key, v, delimiter)));
                }
            }
        }
    }

    Ok(columns.into_iter().collect())
}

/// Column names produced by a grouped filter.
///
/// Without subcategories the group names; with subcategories every
/// inner name (`key=value`) prefixed with its group.
fn parse_grouped_filter(
    groups: &GroupedTagFilter,
    count_subcategories: bool,
) -> Result<Vec<String>, InputError> {
    let mut columns = BTreeSet::new();

    if !count_subcategories {
        columns.extend(groups.keys().cloned());
    } else {
        for (group, filter) in groups {
            let inner = parse_tag_filter(filter, true, GROUPED_DELIMITER)?;
            columns.extend(inner.iter().map(|name| grouped_column(group, name)));
        }
    }

    Ok(columns.into_iter().collect())
}
